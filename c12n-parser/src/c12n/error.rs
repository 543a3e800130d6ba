//! Errors raised while loading and compiling a classification definition.
//!
//! Only the definition boundary can fail. Parsing, formatting, joining and access
//! checks are total over any input string.

use crate::c12n::resolver::Category;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("definition declares no levels")]
    NoLevels,

    #[error("{category} entry has an empty name")]
    EmptyName { category: Category },

    #[error("{category} name '{name}' contains a reserved separator")]
    ReservedCharacter { category: Category, name: String },

    #[error("{category} name '{name}' is declared more than once")]
    DuplicateName { category: Category, name: String },

    #[error("levels '{first}' and '{second}' share rank {rank}")]
    DuplicateRank {
        rank: u32,
        first: String,
        second: String,
    },

    #[error("subgroup '{subgroup}' references unknown group '{group}'")]
    UnknownGroupReference { subgroup: String, group: String },

    #[error("{field} marking '{marking}' does not resolve to a level")]
    InvalidDefaultMarking {
        field: &'static str,
        marking: String,
    },

    #[error("failed to read definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON definition: {0}")]
    Json(#[from] serde_json::Error),
}
