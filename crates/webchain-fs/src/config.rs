//! Format-agnostic configuration loading

use std::fs;

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result};

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and deserializes transparently.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let native_path = path.to_native();
        let content = fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))?;
        let extension = path.extension().unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: native_path,
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: native_path,
                format: "JSON".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Load configuration, or `None` when the file does not exist.
    pub fn load_optional<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<Option<T>> {
        if !path.is_file() {
            tracing::debug!(path = %path, "config file absent, using defaults");
            return Ok(None);
        }
        self.load(path).map(Some)
    }
}

/// Canonicalize a directory for use as a project root.
///
/// Uses `dunce` so Windows roots do not carry the `\\?\` prefix.
pub fn canonical_root(path: &std::path::Path) -> Result<NormalizedPath> {
    dunce::canonicalize(path)
        .map(NormalizedPath::new)
        .map_err(|e| Error::io(path, e))
}
