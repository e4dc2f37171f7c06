//! # Document Loading
//!
//! Candidate records and basis definitions are JSON or YAML. The format is
//! chosen from the file extension: `.yaml`/`.yml` are YAML, everything else
//! is parsed as JSON. Both are decoded into an order-preserving
//! `serde_json::Value`.

use std::path::Path;

use serde_json::Value;

use crate::error::EftbError;

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text (JSON-compatible subset).
    Yaml,
}

impl DocumentFormat {
    /// Pick the format for a path or label from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// Upper-case format name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Parse document text. `label` names the document in error messages.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    label: &str,
) -> Result<Value, EftbError> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| EftbError::Parse {
        path: label.to_string(),
        format: format.as_str(),
        reason,
    })
}

/// Read and parse the document at `path`.
pub fn load_document(path: &Path) -> Result<Value, EftbError> {
    let content = std::fs::read_to_string(path).map_err(|source| EftbError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(
        &content,
        DocumentFormat::from_path(path),
        &path.display().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path("a/b.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path("b.yaml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("b.basis.yml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("no_extension"), DocumentFormat::Json);
    }

    #[test]
    fn json_keeps_insertion_order() {
        let v = parse_document(
            r#"{"values": {"z": [0, 1], "a": [0, 1], "m": [0, 1]}}"#,
            DocumentFormat::Json,
            "inline",
        )
        .unwrap();
        let keys: Vec<&String> = v["values"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn yaml_keeps_insertion_order() {
        let yaml = "eft: SMEFT\nbasis: Warsaw\nvalues:\n  phiW: [-1, 1]\n  G: [-0.5, 0.5]\n";
        let v = parse_document(yaml, DocumentFormat::Yaml, "inline.yaml").unwrap();
        assert_eq!(v["eft"], "SMEFT");
        let keys: Vec<&String> = v["values"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["phiW", "G"]);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_document("{not json", DocumentFormat::Json, "bad.json").unwrap_err();
        match err {
            EftbError::Parse { path, format, .. } => {
                assert_eq!(path, "bad.json");
                assert_eq!(format, "JSON");
            }
            other => panic!("Expected Parse, got: {other}"),
        }
    }

    #[test]
    fn load_document_missing_file_is_read_error() {
        let err = load_document(Path::new("/tmp/eftb-no-such-file.json")).unwrap_err();
        assert!(matches!(err, EftbError::Read { .. }));
    }

    #[test]
    fn load_document_reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.yml");
        std::fs::write(&path, "eft: WET\nbasis: JMS\n").unwrap();
        let v = load_document(&path).unwrap();
        assert_eq!(v["basis"], "JMS");
    }
}
