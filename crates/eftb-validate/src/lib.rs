//! # eftb-validate — The Validation Pipeline
//!
//! Runs a candidate record through both stages:
//!
//! 1. **Structural** ([`eftb_schema::StructuralValidator`]): JSON Schema
//!    conformance. Failure here short-circuits; a record without a usable
//!    `values` mapping cannot be checked meaningfully.
//! 2. **Semantic** ([`SemanticValidator`]): every key of `values` must be a
//!    valid operator name for the record's (EFT, basis), as known to the
//!    [`eftb_basis::BasisCatalog`].
//!
//! [`Pipeline`] combines the two per document and aggregates a batch into a
//! [`BatchReport`]. One failing document never stops the batch; only a
//! run-level [`PipelineError`] does.
//!
//! ## Crate Policy
//!
//! - Library code never prints; reporting belongs to the caller.
//! - Expected failures are diagnostics, not errors.

pub mod pipeline;
pub mod report;
pub mod semantic;

pub use pipeline::{Pipeline, PipelineError};
pub use report::{BatchReport, DocumentReport, Stage};
pub use semantic::SemanticValidator;
