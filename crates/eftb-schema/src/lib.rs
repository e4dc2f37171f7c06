//! # eftb-schema — Structural Validation
//!
//! First stage of the pipeline: does a candidate record have the shape of
//! a bounds record at all? Conformance is checked with the `jsonschema`
//! crate against a declarative schema, by default the one bundled in
//! `schemas/bounds.schema.json`.
//!
//! ## Error policy
//!
//! - A document that does not conform yields `Diagnostic::Structural`
//!   values in a `ValidationResult`, one per violation, each carrying the
//!   JSON Pointer of the offending value.
//! - A schema that is itself malformed is a [`SchemaError`], raised when
//!   the validator is constructed, before any document is looked at.
//!
//! ## Crate Policy
//!
//! - Depends only on `eftb-core` internally.
//! - Never fetches remote `$ref` targets.

pub mod validate;

pub use validate::{SchemaError, StructuralValidator, BUNDLED_SCHEMA, BUNDLED_SCHEMA_NAME};
