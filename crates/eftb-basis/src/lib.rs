//! # eftb-basis — Basis Definitions and the Operator Registry
//!
//! Knows which operator names are valid for which (EFT, basis) scope.
//!
//! ## Pipeline
//!
//! 1. A [`BasisDiscovery`] implementation enumerates basis-definition
//!    sources (a directory of `*.basis.json` files, or an in-memory batch).
//! 2. The [`loader`] parses each source into a [`BasisDefinition`]: its
//!    scope plus the flat union of operator names across all sectors.
//! 3. [`loader::populate`] stores each definition in a [`BasisRegistry`],
//!    skipping malformed sources with a warning.
//! 4. A [`BasisCatalog`] ties the three together and runs discovery at most
//!    once, on the first lookup of a scope that is not yet registered.
//!
//! ## Crate Policy
//!
//! - Depends only on `eftb-core` internally.
//! - The loader never writes to the registry; only `populate` does.
//! - Registry entries are replaced whole, never edited in place.

pub mod catalog;
pub mod discovery;
pub mod loader;
pub mod registry;

pub use catalog::{BasisCatalog, CatalogError};
pub use discovery::{BasisDiscovery, BasisSource, DirectoryDiscovery, DiscoveryError, StaticDiscovery};
pub use loader::{load, populate, BasisDefinition, LoaderError, PopulationSummary};
pub use registry::{BasisRegistry, NameSet, PutOutcome};
