//! # Validate Subcommand
//!
//! Validates each named record file against the record schema, then checks
//! its operator names against the basis definitions for its scope. Every
//! file is reported before the exit status is decided.
//!
//! Exit status: 0 when every file is valid, 1 when any file is invalid or
//! when the run cannot start (no files given, unusable schema, no basis
//! definitions).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use eftb_basis::{BasisCatalog, DirectoryDiscovery};
use eftb_core::load_document;
use eftb_schema::StructuralValidator;
use eftb_validate::{BatchReport, DocumentReport, Pipeline};

use crate::config::CliConfig;
use crate::OutputFormat;

/// Arguments for the `eftb validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Record files to validate (JSON or YAML).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory containing the basis definition files.
    #[arg(long, value_name = "DIR")]
    pub basis_dir: Option<PathBuf>,

    /// Record schema to use instead of the bundled one.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print each parsed document as JSON before validating it.
    #[arg(long)]
    pub print_document: bool,

    /// Only check records against the schema.
    #[arg(long)]
    pub structural_only: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    if args.files.is_empty() {
        println!("Usage: eftb validate FILE [FILE ...]");
        return Ok(1);
    }

    let config = config
        .clone()
        .with_overrides(args.basis_dir.as_deref(), args.schema.as_deref());
    let pipeline = build_pipeline(&config, args.structural_only)?;

    let batch = match args.format {
        OutputFormat::Text => {
            let mut out = std::io::stdout().lock();
            validate_streaming(&pipeline, &args.files, args.print_document, &mut out)?
        }
        OutputFormat::Json => {
            let batch = pipeline
                .validate_batch(&args.files)
                .context("validation aborted")?;
            println!(
                "{}",
                serde_json::to_string_pretty(&batch).context("failed to serialize report")?
            );
            batch
        }
    };

    if batch.all_passed() {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Compile the configured schema and set up basis discovery.
pub fn build_pipeline(config: &CliConfig, structural_only: bool) -> Result<Pipeline> {
    let structural = match &config.schema {
        Some(path) => StructuralValidator::from_path(path),
        None => StructuralValidator::bundled(),
    }
    .context("failed to load record schema")?;

    let basis_dir = config.basis_dir();
    tracing::info!(
        schema = structural.schema_name(),
        basis_dir = %basis_dir.display(),
        "validation pipeline ready"
    );

    let catalog = BasisCatalog::new(DirectoryDiscovery::new(basis_dir));
    Ok(Pipeline::new(structural, catalog).structural_only(structural_only))
}

/// Validate one file at a time, writing each verdict as it is produced.
///
/// Each file is read once; with `print_document` the parsed document is
/// echoed as JSON before its verdict.
pub fn validate_streaming(
    pipeline: &Pipeline,
    files: &[PathBuf],
    print_document: bool,
    out: &mut impl Write,
) -> Result<BatchReport> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        writeln!(out, "=== Validating {} ===", path.display())?;
        let label = path.display().to_string();
        let report = match load_document(path) {
            Ok(document) => {
                if print_document {
                    writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
                }
                pipeline
                    .validate_value(&label, &document)
                    .with_context(|| format!("validation aborted at {label}"))?
            }
            Err(e) => DocumentReport::unreadable(label, &e),
        };
        writeln!(out, "{}", render_document(&report))?;
        reports.push(report);
    }

    let batch = BatchReport::new(reports);
    writeln!(out)?;
    writeln!(out, "{}", summary_line(&batch))?;
    Ok(batch)
}

/// Verdict and diagnostics for one document.
pub fn render_document(report: &DocumentReport) -> String {
    if report.passed {
        "PASS".to_string()
    } else {
        format!("FAIL ({} stage)\n{}", report.stage, report.result)
    }
}

/// Last line of text output, naming the files that failed.
pub fn summary_line(batch: &BatchReport) -> String {
    if batch.all_passed() {
        return "All files are valid.".to_string();
    }
    let failed: Vec<&str> = batch.failures().map(|d| d.document.as_str()).collect();
    format!(
        "ERROR: {} of {} file(s) are not valid according to the schema and/or basis definitions: {}",
        batch.failed,
        batch.total,
        failed.join(", ")
    )
}
