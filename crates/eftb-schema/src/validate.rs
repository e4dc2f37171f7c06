//! # Structural Validation
//!
//! Checks candidate records against a JSON Schema (Draft 2020-12).
//!
//! The schema is compiled once, when the [`StructuralValidator`] is built.
//! Compilation failure means the schema itself is broken; that is a
//! [`SchemaError`] and aborts the run. Checking a document never fails:
//! every violation becomes a `Diagnostic::Structural` carrying the
//! instance path, schema path, and the expected-vs-actual message from
//! `jsonschema`.
//!
//! `$ref` resolution is local only. Any reference the schema does not
//! resolve internally is rejected at build time instead of being fetched.

use std::path::Path;

use eftb_core::{Diagnostic, ValidationResult};
use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// The record schema shipped with this crate.
pub const BUNDLED_SCHEMA: &str = include_str!("../schemas/bounds.schema.json");

/// Name used for the bundled schema in messages.
pub const BUNDLED_SCHEMA_NAME: &str = "bounds.schema.json";

/// The declarative schema itself is unusable.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or is not JSON.
    #[error("failed to load schema {path}: {reason}")]
    Load {
        /// Path or name of the schema.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The schema parsed but is not a valid JSON Schema.
    #[error("failed to compile schema {schema_name}: {reason}")]
    Invalid {
        /// Path or name of the schema.
        schema_name: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Retriever that refuses every external reference.
struct LocalOnlyRetriever;

impl Retrieve for LocalOnlyRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not resolved: {}", uri.as_str()).into())
    }
}

/// A compiled record schema.
pub struct StructuralValidator {
    schema_name: String,
    validator: Validator,
}

impl std::fmt::Debug for StructuralValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuralValidator")
            .field("schema_name", &self.schema_name)
            .finish()
    }
}

impl StructuralValidator {
    /// Compile `schema`. `schema_name` labels it in messages.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] if `schema` is not a valid JSON
    /// Schema or references something outside itself.
    pub fn new(schema_name: impl Into<String>, schema: &Value) -> Result<Self, SchemaError> {
        let schema_name = schema_name.into();
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .with_retriever(LocalOnlyRetriever)
            .build(schema)
            .map_err(|e| SchemaError::Invalid {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(schema = %schema_name, "compiled record schema");
        Ok(Self {
            schema_name,
            validator,
        })
    }

    /// Compile the schema bundled with this crate.
    pub fn bundled() -> Result<Self, SchemaError> {
        let schema: Value =
            serde_json::from_str(BUNDLED_SCHEMA).map_err(|e| SchemaError::Load {
                path: BUNDLED_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::new(BUNDLED_SCHEMA_NAME, &schema)
    }

    /// Load and compile a schema file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::new(path.display().to_string(), &schema)
    }

    /// Name of the compiled schema.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Check `document`, reporting every violation.
    pub fn check(&self, document: &Value) -> ValidationResult {
        let diagnostics = self
            .validator
            .iter_errors(document)
            .map(|err| Diagnostic::Structural {
                instance_path: err.instance_path.to_string(),
                schema_path: err.schema_path.to_string(),
                message: err.to_string(),
            })
            .collect();
        ValidationResult::from_diagnostics(diagnostics)
    }
}

/// One-shot check of `document` against `schema`.
pub fn check(document: &Value, schema: &Value) -> Result<ValidationResult, SchemaError> {
    Ok(StructuralValidator::new("inline", schema)?.check(document))
}
