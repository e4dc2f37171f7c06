//! CLI configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. an optional YAML file given with `--config`,
//! 2. the environment (`EFTB_BASIS_DIR`, `EFTB_SCHEMA`),
//! 3. subcommand flags.
//!
//! Relative paths in a config file are resolved against the file's own
//! directory. Unset values fall back to `./bases` and the bundled schema.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the basis directory.
pub const ENV_BASIS_DIR: &str = "EFTB_BASIS_DIR";

/// Environment variable overriding the record schema.
pub const ENV_SCHEMA: &str = "EFTB_SCHEMA";

/// Basis directory used when nothing else is configured.
pub const DEFAULT_BASIS_DIR: &str = "bases";

/// Resolved CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Directory scanned for basis-definition files.
    #[serde(default)]
    pub basis_dir: Option<PathBuf>,
    /// Record schema file. `None` selects the bundled schema.
    #[serde(default)]
    pub schema: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid YAML for [`CliConfig`].
    #[error("invalid config file {path}: {reason}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Parser message.
        reason: String,
    },
}

impl CliConfig {
    /// Load the file at `path`, or start from defaults when `None`, then
    /// apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }

    /// Parse a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_yaml(&content).map_err(|reason| ConfigError::Parse {
            path: path.display().to_string(),
            reason,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.basis_dir = config.basis_dir.map(|p| crate::resolve_path(&p, base));
        config.schema = config.schema.map(|p| crate::resolve_path(&p, base));
        tracing::debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }

    fn from_yaml(content: &str) -> Result<Self, String> {
        // An empty file deserializes as null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply `EFTB_BASIS_DIR` and `EFTB_SCHEMA`.
    pub fn with_env(self) -> Self {
        self.with_env_from(|var| std::env::var(var).ok())
    }

    /// Apply environment overrides read through `lookup`. Empty values are
    /// ignored.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from);
        if let Some(dir) = var(ENV_BASIS_DIR) {
            self.basis_dir = Some(dir);
        }
        if let Some(schema) = var(ENV_SCHEMA) {
            self.schema = Some(schema);
        }
        self
    }

    /// Apply command-line flags.
    pub fn with_overrides(mut self, basis_dir: Option<&Path>, schema: Option<&Path>) -> Self {
        if let Some(dir) = basis_dir {
            self.basis_dir = Some(dir.to_path_buf());
        }
        if let Some(schema) = schema {
            self.schema = Some(schema.to_path_buf());
        }
        self
    }

    /// The basis directory, defaulting to `./bases`.
    pub fn basis_dir(&self) -> PathBuf {
        self.basis_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASIS_DIR))
    }
}
