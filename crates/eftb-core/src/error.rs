//! # Error Types
//!
//! Errors stop an operation; diagnostics (see [`crate::diagnostic`]) do
//! not. Only conditions a caller cannot turn into a per-document verdict
//! belong here.

use thiserror::Error;

use crate::scope::Scope;

/// Top-level error type shared by the `eftb-*` crates.
#[derive(Error, Debug)]
pub enum EftbError {
    /// No basis definition is registered for the scope.
    #[error("unknown scope: EFT {} with basis {}", .0.domain, .0.basis)]
    UnknownScope(Scope),

    /// A document could not be read from storage.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path of the document.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// A document was read but is not valid JSON/YAML.
    #[error("cannot parse {path} as {format}: {reason}")]
    Parse {
        /// Path or label of the document.
        path: String,
        /// Format that was attempted.
        format: &'static str,
        /// Parser message.
        reason: String,
    },
}
