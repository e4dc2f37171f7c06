//! # Basis Catalog
//!
//! Owns a [`BasisRegistry`] and the [`BasisDiscovery`] that feeds it.
//! Lookups of a scope that is already registered go straight to the
//! registry. The first lookup of an unregistered scope triggers discovery
//! and loads *every* available source, so a batch of documents touching
//! many scopes reads each basis file once.
//!
//! Population runs at most once per catalog. The `OnceLock` doubles as the
//! barrier for concurrent callers: one thread runs discovery, the others
//! block until it finishes and then read the populated registry.

use std::sync::OnceLock;

use eftb_core::Scope;
use thiserror::Error;

use crate::discovery::{BasisDiscovery, DiscoveryError};
use crate::loader::{populate, PopulationSummary};
use crate::registry::{BasisRegistry, NameSet};

/// Run-level failure to obtain basis definitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Discovery could not enumerate sources.
    #[error("basis discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Discovery succeeded but found nothing to load.
    #[error("no basis definition sources were found")]
    NoBasisSources,
}

/// Lazily populated basis registry.
pub struct BasisCatalog {
    registry: BasisRegistry,
    discovery: Box<dyn BasisDiscovery>,
    population: OnceLock<Result<PopulationSummary, DiscoveryError>>,
}

impl std::fmt::Debug for BasisCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasisCatalog")
            .field("scopes", &self.registry.len())
            .field("populated", &self.is_populated())
            .finish()
    }
}

impl BasisCatalog {
    /// Create a catalog with an empty registry.
    pub fn new(discovery: impl BasisDiscovery + 'static) -> Self {
        Self {
            registry: BasisRegistry::new(),
            discovery: Box::new(discovery),
            population: OnceLock::new(),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &BasisRegistry {
        &self.registry
    }

    /// Whether discovery has already run (successfully or not).
    pub fn is_populated(&self) -> bool {
        self.population.get().is_some()
    }

    /// Run discovery and load every source, unless that already happened.
    ///
    /// The outcome of the first run is remembered; a failed discovery is
    /// not retried.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Discovery`] if sources could not be enumerated,
    /// [`CatalogError::NoBasisSources`] if none were found.
    pub fn ensure_populated(&self) -> Result<&PopulationSummary, CatalogError> {
        let outcome = self.population.get_or_init(|| {
            tracing::info!("Loading basis definitions");
            let sources = self.discovery.discover()?;
            Ok(populate(&self.registry, &sources))
        });

        match outcome {
            Ok(summary) if summary.sources == 0 => Err(CatalogError::NoBasisSources),
            Ok(summary) => Ok(summary),
            Err(e) => Err(CatalogError::Discovery(e.clone())),
        }
    }

    /// The valid operator names for `scope`, populating on first miss.
    ///
    /// Returns `Ok(None)` when the scope is still unknown after population.
    pub fn resolve(&self, scope: &Scope) -> Result<Option<NameSet>, CatalogError> {
        if let Ok(names) = self.registry.get(&scope.domain, &scope.basis) {
            return Ok(Some(names));
        }
        self.ensure_populated()?;
        Ok(self.registry.get(&scope.domain, &scope.basis).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{BasisSource, StaticDiscovery};
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingDiscovery {
        calls: Arc<AtomicUsize>,
        inner: StaticDiscovery,
    }

    impl BasisDiscovery for CountingDiscovery {
        fn discover(&self) -> Result<Vec<BasisSource>, DiscoveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.discover()
        }
    }

    struct FailingDiscovery;

    impl BasisDiscovery for FailingDiscovery {
        fn discover(&self) -> Result<Vec<BasisSource>, DiscoveryError> {
            Err(DiscoveryError::Unreadable {
                path: "/nowhere".to_string(),
                reason: "not found".to_string(),
            })
        }
    }

    fn warsaw_source() -> BasisSource {
        BasisSource::new(
            "smeft_warsaw.basis.json",
            r#"{"eft": "SMEFT", "basis": "Warsaw", "sectors": {"s1": {"phiW": {}, "G": {}}}}"#,
        )
    }

    fn counting(sources: Vec<BasisSource>) -> (BasisCatalog, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let catalog = BasisCatalog::new(CountingDiscovery {
            calls: Arc::clone(&calls),
            inner: StaticDiscovery::new(sources),
        });
        (catalog, calls)
    }

    #[test]
    fn resolve_populates_on_first_miss() {
        let (catalog, calls) = counting(vec![warsaw_source()]);
        assert!(!catalog.is_populated());
        let names = catalog.resolve(&Scope::new("SMEFT", "Warsaw")).unwrap().unwrap();
        assert!(names.contains("phiW"));
        assert!(catalog.is_populated());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_scope_does_not_rediscover() {
        let (catalog, calls) = counting(vec![warsaw_source()]);
        assert!(catalog.resolve(&Scope::new("WET", "JMS")).unwrap().is_none());
        assert!(catalog.resolve(&Scope::new("WET", "flavio")).unwrap().is_none());
        assert!(catalog.resolve(&Scope::new("SMEFT", "Warsaw")).unwrap().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn preloaded_scope_skips_discovery() {
        let (catalog, calls) = counting(vec![warsaw_source()]);
        let names: BTreeSet<String> = ["X".to_string()].into_iter().collect();
        catalog.registry().put(
            eftb_core::Domain::new("WET"),
            eftb_core::Basis::new("JMS"),
            names,
        );
        assert!(catalog.resolve(&Scope::new("WET", "JMS")).unwrap().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!catalog.is_populated());
    }

    #[test]
    fn empty_discovery_is_no_basis_sources() {
        let (catalog, _) = counting(Vec::new());
        let err = catalog.resolve(&Scope::new("SMEFT", "Warsaw")).unwrap_err();
        assert_eq!(err, CatalogError::NoBasisSources);
    }

    #[test]
    fn discovery_failure_is_remembered() {
        let catalog = BasisCatalog::new(FailingDiscovery);
        let first = catalog.ensure_populated().unwrap_err();
        let second = catalog.ensure_populated().unwrap_err();
        assert!(matches!(first, CatalogError::Discovery(_)));
        assert_eq!(first, second);
    }

    #[test]
    fn concurrent_resolve_discovers_once() {
        let (catalog, calls) = counting(vec![warsaw_source()]);
        let catalog = Arc::new(catalog);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    catalog
                        .resolve(&Scope::new("SMEFT", "Warsaw"))
                        .unwrap()
                        .map(|n| n.len())
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Some(2));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
