//! # eftb-core — Foundational Types for EFT Bounds Validation
//!
//! Shared vocabulary for every other `eftb-*` crate. Nothing here performs
//! validation; it only defines what a scope is, what a diagnostic looks
//! like, and how a document on disk becomes a `serde_json::Value`.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for scope keys.** `Domain` and `Basis` are distinct types,
//!    so a basis name can never be passed where an EFT name is expected.
//!    `Scope` pairs them and is the key of the basis registry.
//!
//! 2. **Diagnostics are values.** Expected validation failures are
//!    `Diagnostic` variants collected into a `ValidationResult`. Errors
//!    (`EftbError`) are reserved for conditions that stop an operation.
//!
//! 3. **Order-preserving documents.** `serde_json` is built with
//!    `preserve_order`, so the `values` mapping of a record is iterated in
//!    the order it was written and diagnostics are reproducible.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `eftb-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod scope;

// Re-export primary types for ergonomic imports.
pub use diagnostic::{Diagnostic, ValidationResult};
pub use document::{load_document, parse_document, DocumentFormat};
pub use error::EftbError;
pub use scope::{Basis, Domain, Scope};
