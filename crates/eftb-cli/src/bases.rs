//! # Bases Subcommand
//!
//! Loads every basis definition under the configured directory and lists
//! the scopes it defines with their operator counts. Files that could not be
//! loaded are listed after the scopes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use eftb_basis::{BasisCatalog, DirectoryDiscovery};

use crate::config::CliConfig;
use crate::OutputFormat;

/// Arguments for the `eftb bases` subcommand.
#[derive(Args, Debug, Default)]
pub struct BasesArgs {
    /// Directory containing the basis definition files.
    #[arg(long, value_name = "DIR")]
    pub basis_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeEntry {
    /// The EFT name.
    pub eft: String,
    /// The basis name within the EFT.
    pub basis: String,
    /// Number of valid operator names in the scope.
    pub operators: usize,
}

/// Execute the bases subcommand.
pub fn run_bases(args: &BasesArgs, config: &CliConfig) -> Result<u8> {
    let config = config.clone().with_overrides(args.basis_dir.as_deref(), None);
    let basis_dir = config.basis_dir();
    let catalog = BasisCatalog::new(DirectoryDiscovery::new(basis_dir.clone()));
    let summary = catalog
        .ensure_populated()
        .with_context(|| format!("failed to load basis definitions from {}", basis_dir.display()))?;

    let entries = list_scopes(&catalog);
    match args.format {
        OutputFormat::Text => {
            for entry in &entries {
                println!("{:<12} {:<16} {:>6} operators", entry.eft, entry.basis, entry.operators);
            }
            for skipped in &summary.skipped {
                println!("SKIPPED: {skipped}");
            }
            println!(
                "\n{} scope(s) from {} file(s), {} skipped.",
                entries.len(),
                summary.sources,
                summary.skipped.len()
            );
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).context("failed to serialize listing")?
            );
        }
    }

    Ok(0)
}

/// Registered scopes in sorted order.
pub fn list_scopes(catalog: &BasisCatalog) -> Vec<ScopeEntry> {
    let registry = catalog.registry();
    registry
        .scopes()
        .into_iter()
        .map(|scope| ScopeEntry {
            operators: registry.operator_count(&scope).unwrap_or(0),
            eft: scope.domain.to_string(),
            basis: scope.basis.to_string(),
        })
        .collect()
}
