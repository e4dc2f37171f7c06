//! # Basis Discovery
//!
//! Enumerates the basis-definition sources available to a run. The registry
//! never looks at the filesystem itself; it asks a [`BasisDiscovery`] for a
//! batch of [`BasisSource`] values and hands them to the loader.
//!
//! [`DirectoryDiscovery`] walks an installed reference-data directory for
//! `*.basis.json` / `*.basis.yml` / `*.basis.yaml` files. Entries that
//! cannot be read are logged and skipped; only an unreadable root is an
//! error. Symlinks are followed, but every directory and file is reached at
//! most once, so a link cycle cannot repeat a basis file. [`StaticDiscovery`] serves a fixed in-memory batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name suffixes recognised as basis definitions.
pub const BASIS_FILE_SUFFIXES: [&str; 3] = [".basis.json", ".basis.yml", ".basis.yaml"];

/// Raw text of one basis-definition document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisSource {
    /// Where the text came from: a file path or an in-memory label. The
    /// extension selects the parser.
    pub origin: String,
    /// Document text.
    pub content: String,
}

impl BasisSource {
    /// Wrap document text with its origin label.
    pub fn new(origin: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            content: content.into(),
        }
    }
}

/// Failure to enumerate basis sources at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The reference-data root does not exist or cannot be listed.
    #[error("cannot read basis directory {path}: {reason}")]
    Unreadable {
        /// The directory that was scanned.
        path: String,
        /// Why it could not be read.
        reason: String,
    },
}

/// Source of basis-definition documents.
pub trait BasisDiscovery: Send + Sync {
    /// Return every available source. Order carries no meaning.
    fn discover(&self) -> Result<Vec<BasisSource>, DiscoveryError>;
}

/// Recursively scans a directory for basis-definition files.
#[derive(Debug, Clone)]
pub struct DirectoryDiscovery {
    root: PathBuf,
}

impl DirectoryDiscovery {
    /// Scan `root` and all of its subdirectories.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Paths of every basis-definition file under the root, sorted.
    pub fn find_basis_files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| DiscoveryError::Unreadable {
            path: self.root.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut visited = Visited::default();
        visited.dirs.insert(canonical(&self.root));
        let mut found = Vec::new();
        walk_entries(entries, &self.root, &mut found, &mut visited);
        found.sort();
        Ok(found)
    }
}

impl BasisDiscovery for DirectoryDiscovery {
    fn discover(&self) -> Result<Vec<BasisSource>, DiscoveryError> {
        let paths = self.find_basis_files()?;
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            match std::fs::read_to_string(&path) {
                Ok(content) => sources.push(BasisSource::new(path.display().to_string(), content)),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable basis file"
                    );
                }
            }
        }
        tracing::debug!(
            root = %self.root.display(),
            count = sources.len(),
            "discovered basis files"
        );
        Ok(sources)
    }
}

fn is_basis_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|name| BASIS_FILE_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Directories and files already reached, by canonical path. Symlinks are
/// followed, so a cycle or an alias would otherwise repeat files.
#[derive(Default)]
struct Visited {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn walk_entries(
    entries: std::fs::ReadDir,
    dir: &Path,
    acc: &mut Vec<PathBuf>,
    visited: &mut Visited,
) {
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(e) => paths.push(e.path()),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
            }
        }
    }
    // Sorted so the first alias of a file or directory wins deterministically.
    paths.sort();

    for path in paths {
        if path.is_dir() {
            if !visited.dirs.insert(canonical(&path)) {
                tracing::debug!(dir = %path.display(), "directory already visited");
                continue;
            }
            match std::fs::read_dir(&path) {
                Ok(sub) => walk_entries(sub, &path, acc, visited),
                Err(e) => {
                    tracing::warn!(
                        dir = %path.display(),
                        error = %e,
                        "failed to read directory during basis walk"
                    );
                }
            }
        } else if is_basis_file(&path) && visited.files.insert(canonical(&path)) {
            acc.push(path);
        }
    }
}

/// A fixed, in-memory batch of sources.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    sources: Vec<BasisSource>,
}

impl StaticDiscovery {
    /// Serve `sources` on every call.
    pub fn new(sources: Vec<BasisSource>) -> Self {
        Self { sources }
    }
}

impl BasisDiscovery for StaticDiscovery {
    fn discover(&self) -> Result<Vec<BasisSource>, DiscoveryError> {
        Ok(self.sources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_basis_file_matches_suffixes() {
        assert!(is_basis_file(Path::new("x/smeft_warsaw.basis.json")));
        assert!(is_basis_file(Path::new("wet_jms.basis.yml")));
        assert!(is_basis_file(Path::new("wet_jms.basis.yaml")));
        assert!(!is_basis_file(Path::new("record.json")));
        assert!(!is_basis_file(Path::new("basis.json")));
    }

    #[test]
    fn missing_root_is_error() {
        let discovery = DirectoryDiscovery::new("/tmp/eftb-test-nonexistent-basis-dir-xyz");
        let err = discovery.discover().unwrap_err();
        assert!(matches!(err, DiscoveryError::Unreadable { .. }));
    }

    #[test]
    fn empty_root_yields_no_sources() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DirectoryDiscovery::new(dir.path()).discover().unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn finds_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let smeft = dir.path().join("smeft");
        let wet = dir.path().join("wet").join("deep");
        std::fs::create_dir_all(&smeft).unwrap();
        std::fs::create_dir_all(&wet).unwrap();
        std::fs::write(wet.join("jms.basis.yml"), "eft: WET").unwrap();
        std::fs::write(smeft.join("warsaw.basis.json"), "{}").unwrap();
        std::fs::write(smeft.join("README.md"), "ignore me").unwrap();
        std::fs::write(dir.path().join("record.json"), "{}").unwrap();

        let discovery = DirectoryDiscovery::new(dir.path());
        let files = discovery.find_basis_files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0] < files[1], "Results should be sorted: {files:?}");

        let sources = discovery.discover().unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources.iter().any(|s| s.content == "eft: WET"));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_yields_each_file_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.basis.json"), "{}").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let sources = DirectoryDiscovery::new(dir.path()).discover().unwrap();
        assert_eq!(sources.len(), 1, "sources: {sources:?}");
        assert!(sources[0].origin.ends_with("a.basis.json"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_alias_of_a_directory_is_walked_once() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("smeft");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("warsaw.basis.json"), "{}").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("zz-alias")).unwrap();
        std::os::unix::fs::symlink(
            real.join("warsaw.basis.json"),
            dir.path().join("copy.basis.json"),
        )
        .unwrap();

        let files = DirectoryDiscovery::new(dir.path()).find_basis_files().unwrap();
        assert_eq!(files, vec![dir.path().join("copy.basis.json")]);
    }

    #[test]
    fn static_discovery_repeats_batch() {
        let discovery = StaticDiscovery::new(vec![BasisSource::new("a.basis.json", "{}")]);
        assert_eq!(discovery.discover().unwrap().len(), 1);
        assert_eq!(discovery.discover().unwrap().len(), 1);
    }
}
