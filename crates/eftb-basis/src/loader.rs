//! # Basis Loader
//!
//! Turns one basis-definition document into a [`BasisDefinition`]: the
//! scope it declares and the flat set of operator names it defines.
//!
//! A basis document has the shape
//!
//! ```yaml
//! eft: SMEFT
//! basis: Warsaw
//! sectors:
//!   dB=dL=0:
//!     phiG: { real: true }
//!     phiW: { real: true }
//!   "1111":
//!     ll_1111: { real: true }
//! ```
//!
//! The valid names are the union of the keys of every sector mapping. The
//! per-operator metadata is ignored.
//!
//! [`load`] is pure. [`populate`] is the only function here that writes to a
//! [`BasisRegistry`].

use std::collections::BTreeSet;

use eftb_core::{parse_document, DocumentFormat, Scope};
use serde_json::Value;
use thiserror::Error;

use crate::discovery::BasisSource;
use crate::registry::{BasisRegistry, PutOutcome};

/// Top-level field holding the sector mappings.
pub const SECTORS_FIELD: &str = "sectors";

/// A basis source that cannot be turned into a definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    /// Scope fields or `sectors` are missing or have the wrong shape.
    #[error("malformed basis document {origin}: {reason}")]
    MalformedBasisDocument {
        /// Origin label of the source.
        origin: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// The operator names valid in one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisDefinition {
    /// Scope declared by the document.
    pub scope: Scope,
    /// Union of operator names over all sectors.
    pub names: BTreeSet<String>,
}

/// Parse and flatten one basis source.
///
/// # Errors
///
/// Returns [`LoaderError::MalformedBasisDocument`] if the text does not
/// parse, if `eft`/`basis` are not top-level strings, if `sectors` is not a
/// mapping, or if any sector is not a mapping.
pub fn load(source: &BasisSource) -> Result<BasisDefinition, LoaderError> {
    let doc = parse_document(
        &source.content,
        DocumentFormat::from_path(&source.origin),
        &source.origin,
    )
    .map_err(|e| malformed(&source.origin, e.to_string()))?;
    load_value(&source.origin, &doc)
}

/// Flatten an already-parsed basis document.
pub fn load_value(origin: &str, doc: &Value) -> Result<BasisDefinition, LoaderError> {
    let scope = Scope::from_document(doc).map_err(|missing| {
        malformed(
            origin,
            format!("missing or non-string field(s): {}", missing.join(", ")),
        )
    })?;

    let sectors = doc
        .get(SECTORS_FIELD)
        .ok_or_else(|| malformed(origin, "missing 'sectors'".to_string()))?
        .as_object()
        .ok_or_else(|| malformed(origin, "'sectors' is not a mapping".to_string()))?;

    let mut names = BTreeSet::new();
    for (sector, operators) in sectors {
        let operators = operators.as_object().ok_or_else(|| {
            malformed(origin, format!("sector '{sector}' is not a mapping"))
        })?;
        names.extend(operators.keys().cloned());
    }

    Ok(BasisDefinition { scope, names })
}

fn malformed(origin: &str, reason: String) -> LoaderError {
    LoaderError::MalformedBasisDocument {
        origin: origin.to_string(),
        reason,
    }
}

/// One definition stored by [`populate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBasis {
    /// Scope that was registered.
    pub scope: Scope,
    /// Source it came from.
    pub origin: String,
    /// Number of operator names registered.
    pub operators: usize,
    /// Effect on the registry.
    pub outcome: PutOutcome,
}

/// Result of loading one discovery batch into a registry.
#[derive(Debug, Clone, Default)]
pub struct PopulationSummary {
    /// Number of sources offered.
    pub sources: usize,
    /// Sources that were registered, in batch order.
    pub loaded: Vec<LoadedBasis>,
    /// Sources that were skipped.
    pub skipped: Vec<LoaderError>,
}

/// Load every source in `sources` into `registry`.
///
/// A malformed source is logged and recorded in
/// [`PopulationSummary::skipped`]; it never stops the rest of the batch.
pub fn populate(registry: &BasisRegistry, sources: &[BasisSource]) -> PopulationSummary {
    let mut summary = PopulationSummary {
        sources: sources.len(),
        ..PopulationSummary::default()
    };

    for source in sources {
        match load(source) {
            Ok(def) => {
                let operators = def.names.len();
                let scope = def.scope.clone();
                let outcome = registry.put(def.scope.domain, def.scope.basis, def.names);
                if outcome == PutOutcome::Replaced {
                    tracing::warn!(
                        scope = %scope,
                        origin = %source.origin,
                        "basis definition replaces an earlier one for the same scope"
                    );
                }
                tracing::info!(
                    "Found {operators} valid operators for {} {} (from {})",
                    scope.domain,
                    scope.basis,
                    source.origin
                );
                summary.loaded.push(LoadedBasis {
                    scope,
                    origin: source.origin.clone(),
                    operators,
                    outcome,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping basis definition");
                summary.skipped.push(e);
            }
        }
    }

    summary
}
