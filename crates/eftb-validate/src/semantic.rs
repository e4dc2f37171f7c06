//! # Semantic Validation
//!
//! Cross-checks the operator names used in a record against the basis
//! definitions for the record's scope.
//!
//! The check stops early, with a single diagnostic, when the record has no
//! scope, when its scope is not registered, or when `values` is not a
//! mapping. Otherwise every unknown key in `values` is reported, in the
//! order the record lists them.

use eftb_basis::{BasisCatalog, CatalogError};
use eftb_core::{Diagnostic, Scope, ValidationResult};
use serde_json::Value;

/// Field of a record holding the operator → bound mapping.
pub const VALUES_FIELD: &str = "values";

/// Validates operator names against a [`BasisCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct SemanticValidator<'a> {
    catalog: &'a BasisCatalog,
}

impl<'a> SemanticValidator<'a> {
    /// Borrow `catalog` for lookups. The catalog is populated lazily on the
    /// first record whose scope it does not already know.
    pub fn new(catalog: &'a BasisCatalog) -> Self {
        Self { catalog }
    }

    /// Check every key of the record's `values` mapping.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] only when basis definitions cannot be
    /// obtained at all. That is a run-level condition, not a verdict on
    /// this record.
    pub fn check_operators(&self, document: &Value) -> Result<ValidationResult, CatalogError> {
        let scope = match Scope::from_document(document) {
            Ok(scope) => scope,
            Err(missing) => {
                return Ok(ValidationResult::single(Diagnostic::MissingScopeFields {
                    missing: missing.into_iter().map(str::to_string).collect(),
                }));
            }
        };

        let Some(valid) = self.catalog.resolve(&scope)? else {
            return Ok(ValidationResult::single(Diagnostic::UnknownScope { scope }));
        };

        let values = match document.get(VALUES_FIELD) {
            None => return Ok(ValidationResult::pass()),
            Some(Value::Object(values)) => values,
            Some(other) => {
                return Ok(ValidationResult::single(Diagnostic::MalformedValues {
                    found: json_type_name(other).to_string(),
                }));
            }
        };

        let mut result = ValidationResult::pass();
        for name in values.keys() {
            if !valid.contains(name) {
                result.push(Diagnostic::UnknownOperator {
                    name: name.clone(),
                    scope: scope.clone(),
                });
            }
        }

        tracing::debug!(
            scope = %scope,
            checked = values.len(),
            unknown = result.len(),
            "checked operator names"
        );
        Ok(result)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
