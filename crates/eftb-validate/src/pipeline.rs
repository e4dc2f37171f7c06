//! # Two-Stage Pipeline
//!
//! Structural validation first, semantic validation second, per document.
//! A document that fails to load or fails the structural stage is reported
//! at that stage and goes no further.

use std::path::{Path, PathBuf};

use eftb_basis::{BasisCatalog, CatalogError};
use eftb_core::load_document;
use eftb_schema::StructuralValidator;
use serde_json::Value;
use thiserror::Error;

use crate::report::{BatchReport, DocumentReport, Stage};
use crate::semantic::SemanticValidator;

/// Conditions that abort a whole run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Basis definitions could not be obtained.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Validates records against a compiled schema and a basis catalog.
#[derive(Debug)]
pub struct Pipeline {
    structural: StructuralValidator,
    catalog: BasisCatalog,
    structural_only: bool,
}

impl Pipeline {
    /// Build a pipeline running both stages.
    pub fn new(structural: StructuralValidator, catalog: BasisCatalog) -> Self {
        Self {
            structural,
            catalog,
            structural_only: false,
        }
    }

    /// Stop after the structural stage when `enabled`.
    pub fn structural_only(mut self, enabled: bool) -> Self {
        self.structural_only = enabled;
        self
    }

    /// The basis catalog used by the semantic stage.
    pub fn catalog(&self) -> &BasisCatalog {
        &self.catalog
    }

    /// Validate an already-parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] if the semantic stage needs basis
    /// definitions and none can be obtained.
    pub fn validate_value(
        &self,
        label: &str,
        document: &Value,
    ) -> Result<DocumentReport, PipelineError> {
        let structural = self.structural.check(document);
        if !structural.is_pass() || self.structural_only {
            tracing::debug!(document = label, passed = structural.is_pass(), "structural stage");
            return Ok(DocumentReport::new(label, Stage::Structural, structural));
        }

        let semantic = SemanticValidator::new(&self.catalog).check_operators(document)?;
        tracing::debug!(document = label, passed = semantic.is_pass(), "semantic stage");
        Ok(DocumentReport::new(label, Stage::Semantic, semantic))
    }

    /// Load and validate the document at `path`.
    ///
    /// A document that cannot be read or parsed yields a failing report at
    /// [`Stage::Load`], not an error.
    pub fn validate_path(&self, path: &Path) -> Result<DocumentReport, PipelineError> {
        let label = path.display().to_string();
        match load_document(path) {
            Ok(document) => self.validate_value(&label, &document),
            Err(e) => Ok(DocumentReport::unreadable(label, &e)),
        }
    }

    /// Validate every document in `paths`, in order.
    ///
    /// A failing document never prevents validation of the next one.
    pub fn validate_batch(&self, paths: &[PathBuf]) -> Result<BatchReport, PipelineError> {
        let mut reports = Vec::with_capacity(paths.len());
        for path in paths {
            reports.push(self.validate_path(path)?);
        }
        let report = BatchReport::new(reports);
        tracing::info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            "batch validated"
        );
        Ok(report)
    }
}
