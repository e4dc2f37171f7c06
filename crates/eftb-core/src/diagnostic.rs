//! # Diagnostics and Validation Results
//!
//! Every expected validation failure is a [`Diagnostic`]. A
//! [`ValidationResult`] is an ordered list of them; it passes iff the list is
//! empty. Later diagnostics never displace earlier ones, so a document with
//! several problems reports all of them.

use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// A single violation found while validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The document could not be read or parsed.
    Unreadable {
        /// Why the document could not be loaded.
        reason: String,
    },

    /// The document does not conform to the record schema.
    Structural {
        /// JSON Pointer to the violating value in the document.
        instance_path: String,
        /// JSON Pointer to the schema keyword that rejected it.
        schema_path: String,
        /// Human-readable description, including expected vs actual shape.
        message: String,
    },

    /// The document does not declare both scope fields.
    MissingScopeFields {
        /// Names of the absent (or non-string) fields.
        missing: Vec<String>,
    },

    /// No basis definition is registered for the document's scope.
    UnknownScope {
        /// The scope the document declared.
        scope: Scope,
    },

    /// `values` is present but is not a mapping.
    MalformedValues {
        /// JSON type that was found instead.
        found: String,
    },

    /// A key of `values` is not a valid operator name in the scope.
    UnknownOperator {
        /// The offending key.
        name: String,
        /// The scope it was checked against.
        scope: Scope,
    },
}

impl Diagnostic {
    /// True for diagnostics raised by the structural stage.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { reason } => write!(f, "cannot load document: {reason}"),
            Self::Structural {
                instance_path,
                message,
                ..
            } => {
                if instance_path.is_empty() {
                    write!(f, "(root): {message}")
                } else {
                    write!(f, "{instance_path}: {message}")
                }
            }
            Self::MissingScopeFields { missing } => write!(
                f,
                "document is missing top-level field(s): {}",
                missing.join(", ")
            ),
            Self::UnknownScope { scope } => write!(
                f,
                "EFT {} with basis {} is not defined in any basis definition",
                scope.domain, scope.basis
            ),
            Self::MalformedValues { found } => write!(
                f,
                "'values' must be an object mapping operator names to bound arrays, found {found}"
            ),
            Self::UnknownOperator { name, scope } => write!(
                f,
                "operator '{name}' is not a valid name in the {} {} basis",
                scope.domain, scope.basis
            ),
        }
    }
}

/// Outcome of one validation stage (or of a whole pipeline run) on one
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// A passing result with no diagnostics.
    pub fn pass() -> Self {
        Self::default()
    }

    /// A result carrying exactly one diagnostic.
    pub fn single(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }

    /// Build a result from an ordered list of diagnostics.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Append a diagnostic, keeping all earlier ones.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// True iff no diagnostic was recorded.
    pub fn is_pass(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in the order they were found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {d}")?;
        }
        Ok(())
    }
}
