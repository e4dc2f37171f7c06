//! # Validation Reports
//!
//! Per-document and per-batch outcomes. Both serialize with `serde` so a
//! caller can emit them as JSON.

use chrono::{DateTime, Utc};
use eftb_core::{Diagnostic, EftbError, ValidationResult};
use serde::Serialize;

/// The pipeline stage at which a document's verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The document could not be read or parsed.
    Load,
    /// Structural (schema) validation.
    Structural,
    /// Semantic (operator name) validation.
    Semantic,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Load => "load",
            Self::Structural => "structural",
            Self::Semantic => "semantic",
        };
        f.write_str(s)
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Path or label of the document.
    pub document: String,
    /// Last stage that ran. A passing document always reaches the final
    /// stage configured for the pipeline.
    pub stage: Stage,
    /// Whether every stage that ran passed.
    pub passed: bool,
    /// Diagnostics of the stage that decided the verdict.
    pub result: ValidationResult,
}

impl DocumentReport {
    /// Build a report; `passed` is derived from `result`.
    pub fn new(document: impl Into<String>, stage: Stage, result: ValidationResult) -> Self {
        Self {
            document: document.into(),
            stage,
            passed: result.is_pass(),
            result,
        }
    }

    /// A failing [`Stage::Load`] report for a document that could not be
    /// read or parsed.
    pub fn unreadable(document: impl Into<String>, error: &EftbError) -> Self {
        Self::new(
            document,
            Stage::Load,
            ValidationResult::single(Diagnostic::Unreadable {
                reason: error.to_string(),
            }),
        )
    }
}

/// Outcome of validating a batch of documents.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// When the batch finished.
    pub generated_at: DateTime<Utc>,
    /// Number of documents.
    pub total: usize,
    /// Number that passed every stage.
    pub passed: usize,
    /// Number that failed.
    pub failed: usize,
    /// One report per document, in input order.
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Summarize `documents`.
    pub fn new(documents: Vec<DocumentReport>) -> Self {
        let passed = documents.iter().filter(|d| d.passed).count();
        Self {
            generated_at: Utc::now(),
            total: documents.len(),
            passed,
            failed: documents.len() - passed,
            documents,
        }
    }

    /// True iff every document passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Reports of the documents that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eftb_core::Scope;

    fn failing() -> ValidationResult {
        ValidationResult::single(Diagnostic::UnknownScope {
            scope: Scope::new("SMEFT", "Higgs"),
        })
    }

    #[test]
    fn document_report_derives_passed() {
        let ok = DocumentReport::new("a.json", Stage::Semantic, ValidationResult::pass());
        let bad = DocumentReport::new("b.json", Stage::Semantic, failing());
        assert!(ok.passed);
        assert!(!bad.passed);
    }

    #[test]
    fn unreadable_report_fails_at_load() {
        let err = EftbError::Parse {
            path: "c.json".to_string(),
            format: "JSON",
            reason: "expected value".to_string(),
        };
        let report = DocumentReport::unreadable("c.json", &err);
        assert!(!report.passed);
        assert_eq!(report.stage, Stage::Load);
        assert!(matches!(
            report.result.diagnostics(),
            [Diagnostic::Unreadable { reason }] if reason.contains("expected value")
        ));
    }

    #[test]
    fn batch_counts() {
        let batch = BatchReport::new(vec![
            DocumentReport::new("d1.json", Stage::Semantic, ValidationResult::pass()),
            DocumentReport::new("d2.json", Stage::Semantic, failing()),
            DocumentReport::new("d3.json", Stage::Semantic, ValidationResult::pass()),
        ]);
        assert_eq!(batch.total, 3);
        assert_eq!(batch.passed, 2);
        assert_eq!(batch.failed, 1);
        assert!(!batch.all_passed());
        let failed: Vec<&str> = batch.failures().map(|d| d.document.as_str()).collect();
        assert_eq!(failed, vec!["d2.json"]);
    }

    #[test]
    fn empty_batch_passes() {
        let batch = BatchReport::new(Vec::new());
        assert!(batch.all_passed());
        assert_eq!(batch.total, 0);
    }

    #[test]
    fn batch_serializes_stage_and_diagnostics() {
        let batch = BatchReport::new(vec![DocumentReport::new(
            "d.json",
            Stage::Structural,
            failing(),
        )]);
        let v = serde_json::to_value(&batch).unwrap();
        assert_eq!(v["failed"], 1);
        assert_eq!(v["documents"][0]["stage"], "structural");
        assert_eq!(
            v["documents"][0]["result"]["diagnostics"][0]["kind"],
            "unknown_scope"
        );
        assert!(v["generated_at"].is_string());
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Load.to_string(), "load");
        assert_eq!(Stage::Semantic.to_string(), "semantic");
    }
}
