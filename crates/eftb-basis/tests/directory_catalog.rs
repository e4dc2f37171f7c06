//! Integration test: populate a catalog from a basis directory on disk.

use std::fs;
use std::path::Path;

use eftb_basis::{BasisCatalog, CatalogError, DirectoryDiscovery};
use eftb_core::Scope;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn reference_data() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "smeft/warsaw.basis.json",
        r#"{"eft": "SMEFT", "basis": "Warsaw", "sectors": {
            "dB=dL=0": {"phiW": {}, "phiB": {}},
            "1111": {"ll_1111": {"real": false}}
        }}"#,
    );
    write(
        dir.path(),
        "wet/jms.basis.yaml",
        "eft: WET\nbasis: JMS\nsectors:\n  nunu:\n    VnunuLL_1111: {}\n",
    );
    write(dir.path(), "README.md", "not a basis file");
    write(dir.path(), "notes.json", r#"{"eft": "SMEFT", "basis": "Ignored"}"#);
    dir
}

#[test]
fn test_directory_catalog_resolves_every_scope() {
    let dir = reference_data();
    let catalog = BasisCatalog::new(DirectoryDiscovery::new(dir.path()));

    let warsaw = catalog
        .resolve(&Scope::new("SMEFT", "Warsaw"))
        .unwrap()
        .expect("Warsaw basis should be registered");
    let names: Vec<&str> = warsaw.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["ll_1111", "phiB", "phiW"]);

    // The YAML file was loaded in the same population pass.
    assert_eq!(catalog.registry().len(), 2);
    let jms = catalog.resolve(&Scope::new("WET", "JMS")).unwrap().unwrap();
    assert!(jms.contains("VnunuLL_1111"));
}

#[test]
fn test_files_without_basis_suffix_are_ignored() {
    let dir = reference_data();
    let discovery = DirectoryDiscovery::new(dir.path());
    let files = discovery.find_basis_files().unwrap();
    assert_eq!(files.len(), 2);

    let catalog = BasisCatalog::new(discovery);
    assert!(catalog
        .resolve(&Scope::new("SMEFT", "Ignored"))
        .unwrap()
        .is_none());
}

#[test]
fn test_malformed_file_does_not_block_others() {
    let dir = reference_data();
    write(dir.path(), "broken.basis.json", r#"{"eft": "SMEFT", "sectors": {}}"#);
    write(dir.path(), "garbage.basis.json", "{ not json");

    let catalog = BasisCatalog::new(DirectoryDiscovery::new(dir.path()));
    let summary = catalog.ensure_populated().unwrap();
    assert_eq!(summary.sources, 4);
    assert_eq!(summary.loaded.len(), 2);
    assert_eq!(summary.skipped.len(), 2);
    assert_eq!(
        catalog.registry().scopes(),
        vec![Scope::new("SMEFT", "Warsaw"), Scope::new("WET", "JMS")]
    );
}

#[test]
fn test_empty_directory_reports_no_sources() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = BasisCatalog::new(DirectoryDiscovery::new(dir.path()));
    assert_eq!(
        catalog.resolve(&Scope::new("SMEFT", "Warsaw")).unwrap_err(),
        CatalogError::NoBasisSources
    );
}

#[test]
fn test_missing_directory_reports_discovery_failure() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = BasisCatalog::new(DirectoryDiscovery::new(dir.path().join("absent")));
    assert!(matches!(
        catalog.ensure_populated().unwrap_err(),
        CatalogError::Discovery(_)
    ));
    // The failure is remembered, not retried.
    assert!(catalog.is_populated());
}
