//! # eftb-cli — Command-Line Front End
//!
//! Provides the `eftb` binary.
//!
//! ## Subcommands
//!
//! - `eftb validate FILE...`: structural and semantic validation of bound
//!   records. Exit status 0 iff every file is valid.
//! - `eftb bases`: list the scopes defined by the installed basis files.
//!
//! ```bash
//! eftb validate results/*.json
//! eftb validate --basis-dir ./bases --format json fit.yaml
//! eftb -v bases
//! ```
//!
//! ## Crate Policy
//!
//! - The library crates never print; everything written to stdout happens
//!   here.
//! - `anyhow` is used only in this crate.

pub mod bases;
pub mod config;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::ValueEnum;

pub use config::{CliConfig, ConfigError};

/// How reports are written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One pretty-printed JSON document.
    Json,
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
