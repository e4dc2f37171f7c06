//! # Scope Identifiers
//!
//! A *scope* is the pair (EFT, basis) under which a set of operator names is
//! valid. Both halves are opaque strings; this crate never interprets them.
//!
//! Records and basis definitions both declare their scope with top-level
//! string fields. The EFT is written as `eft` in WCxf-style documents, with
//! `domain` accepted as an alias.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level field naming the EFT.
pub const DOMAIN_FIELD: &str = "eft";

/// Alternative spelling of [`DOMAIN_FIELD`].
pub const DOMAIN_ALIAS: &str = "domain";

/// Top-level field naming the basis.
pub const BASIS_FIELD: &str = "basis";

/// Name of an effective field theory (e.g. `SMEFT`, `WET`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

/// Name of a basis convention within a domain (e.g. `Warsaw`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Basis(String);

impl Domain {
    /// Wrap a domain name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Basis {
    /// Wrap a basis name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The (domain, basis) key of the basis registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    /// The EFT.
    pub domain: Domain,
    /// The basis within that EFT.
    pub basis: Basis,
}

impl Scope {
    /// Build a scope from two names.
    pub fn new(domain: impl Into<String>, basis: impl Into<String>) -> Self {
        Self {
            domain: Domain::new(domain),
            basis: Basis::new(basis),
        }
    }

    /// Read the scope declared at the top level of `doc`.
    ///
    /// Returns the names of the fields that are absent or not strings when
    /// the scope cannot be formed. A non-object `doc` reports both fields.
    pub fn from_document(doc: &Value) -> Result<Self, Vec<&'static str>> {
        let domain = doc
            .get(DOMAIN_FIELD)
            .or_else(|| doc.get(DOMAIN_ALIAS))
            .and_then(Value::as_str);
        let basis = doc.get(BASIS_FIELD).and_then(Value::as_str);

        match (domain, basis) {
            (Some(d), Some(b)) => Ok(Self::new(d, b)),
            (d, b) => {
                let mut missing = Vec::new();
                if d.is_none() {
                    missing.push(DOMAIN_FIELD);
                }
                if b.is_none() {
                    missing.push(BASIS_FIELD);
                }
                Err(missing)
            }
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.domain, self.basis)
    }
}
