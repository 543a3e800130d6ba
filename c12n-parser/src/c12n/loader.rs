//! Entry points for reading a definition document.
//!
//! The configuration endpoint serves YAML; exported snapshots are often JSON.
//! Both decode into the same [`DefinitionDocument`] and go through
//! [`Definition::new`] for validation.

use crate::c12n::definition::{Definition, DefinitionDocument};
use crate::c12n::error::DefinitionError;
use std::fs;
use std::path::Path;

impl Definition {
    pub fn from_yaml_str(source: &str) -> Result<Self, DefinitionError> {
        let document: DefinitionDocument = serde_yaml::from_str(source)?;
        Self::new(document)
    }

    pub fn from_json_str(source: &str) -> Result<Self, DefinitionError> {
        let document: DefinitionDocument = serde_json::from_str(source)?;
        Self::new(document)
    }

    /// Load a definition file. `.json` files are decoded as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading classification definition");
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }
}
