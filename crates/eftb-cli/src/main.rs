//! # eftb CLI entry point
//!
//! Parses command-line arguments, sets up logging, loads configuration and
//! dispatches to the subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eftb_cli::bases::{run_bases, BasesArgs};
use eftb_cli::validate::{run_validate, ValidateArgs};
use eftb_cli::CliConfig;

/// Validate EFT bounds records against the record schema and the basis
/// definitions of their (EFT, basis) scope.
#[derive(Parser, Debug)]
#[command(name = "eftb", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate record files.
    Validate(ValidateArgs),

    /// List the scopes defined by the installed basis files.
    Bases(BasesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report. RUST_LOG applies only
    // when no -v flag was given.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "eftb starting");

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Bases(args) => run_bases(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use eftb_cli::OutputFormat;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validate_with_flags() {
        let cli = Cli::try_parse_from([
            "eftb",
            "-vv",
            "validate",
            "--basis-dir",
            "ref",
            "--format",
            "json",
            "--structural-only",
            "a.json",
            "b.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
                assert_eq!(args.basis_dir, Some(PathBuf::from("ref")));
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.structural_only);
                assert!(!args.print_document);
            }
            other => panic!("Expected Validate, got: {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_zero_files() {
        let cli = Cli::try_parse_from(["eftb", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate(ref a) if a.files.is_empty()));
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["eftb", "bases", "--config", "eftb.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("eftb.yaml")));
        assert!(matches!(cli.command, Commands::Bases(_)));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["eftb", "validate", "--format", "xml", "a.json"]).is_err());
    }
}
