//! # Basis Registry
//!
//! Maps `domain → basis → set of operator names`. The registry is small
//! (tens of scopes) and lives for the whole run; there is no eviction.
//!
//! Name sets are stored behind `Arc`, so [`BasisRegistry::get`] hands out a
//! cheap handle to an immutable set. A `put` for an existing scope swaps the
//! `Arc` under the write lock, so readers see either the old set or the new
//! one, never a mix.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use eftb_core::{Basis, Domain, EftbError, Scope};
use parking_lot::RwLock;

/// Shared, immutable set of valid operator names for one scope.
pub type NameSet = Arc<BTreeSet<String>>;

/// What a [`BasisRegistry::put`] did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The scope was not registered before.
    Inserted,
    /// The scope was registered with identical names; nothing changed.
    Unchanged,
    /// The scope was registered with different names and was replaced.
    Replaced,
}

/// Thread-safe (domain, basis) → operator-name cache.
///
/// `parking_lot::RwLock` is non-poisoning, so a panic in one reader does not
/// make the registry unusable for the rest of the run.
#[derive(Debug, Default)]
pub struct BasisRegistry {
    scopes: RwLock<HashMap<Domain, HashMap<Basis, NameSet>>>,
}

impl BasisRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a name set is registered for (domain, basis).
    pub fn has(&self, domain: &Domain, basis: &Basis) -> bool {
        self.scopes
            .read()
            .get(domain)
            .is_some_and(|bases| bases.contains_key(basis))
    }

    /// The name set registered for (domain, basis).
    ///
    /// # Errors
    ///
    /// Returns [`EftbError::UnknownScope`] if nothing is registered.
    pub fn get(&self, domain: &Domain, basis: &Basis) -> Result<NameSet, EftbError> {
        self.scopes
            .read()
            .get(domain)
            .and_then(|bases| bases.get(basis))
            .cloned()
            .ok_or_else(|| EftbError::UnknownScope(Scope {
                domain: domain.clone(),
                basis: basis.clone(),
            }))
    }

    /// Register `names` for (domain, basis), replacing any previous set.
    ///
    /// Re-registering identical content leaves the stored `Arc` untouched.
    pub fn put(&self, domain: Domain, basis: Basis, names: BTreeSet<String>) -> PutOutcome {
        let mut guard = self.scopes.write();
        let bases = guard.entry(domain).or_default();
        match bases.get(&basis) {
            Some(existing) if **existing == names => PutOutcome::Unchanged,
            Some(_) => {
                bases.insert(basis, Arc::new(names));
                PutOutcome::Replaced
            }
            None => {
                bases.insert(basis, Arc::new(names));
                PutOutcome::Inserted
            }
        }
    }

    /// All registered scopes, sorted by domain then basis.
    pub fn scopes(&self) -> Vec<Scope> {
        let guard = self.scopes.read();
        let mut scopes: Vec<Scope> = guard
            .iter()
            .flat_map(|(domain, bases)| {
                bases.keys().map(move |basis| Scope {
                    domain: domain.clone(),
                    basis: basis.clone(),
                })
            })
            .collect();
        scopes.sort();
        scopes
    }

    /// Number of operator names registered for a scope, if it is registered.
    pub fn operator_count(&self, scope: &Scope) -> Option<usize> {
        self.scopes
            .read()
            .get(&scope.domain)
            .and_then(|bases| bases.get(&scope.basis))
            .map(|names| names.len())
    }

    /// Number of registered scopes.
    pub fn len(&self) -> usize {
        self.scopes.read().values().map(HashMap::len).sum()
    }

    /// Returns true if no scope is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
