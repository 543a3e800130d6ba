//! Shared configuration loader for the c12n toolchain.
//!
//! `defaults/c12n.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files,
//! environment variables and command-line overrides on top of those defaults via
//! [`Loader`] before deserializing into [`C12nConfig`].

use c12n_parser::Style;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/c12n.default.toml");

/// Top-level configuration consumed by c12n applications.
#[derive(Debug, Clone, Deserialize)]
pub struct C12nConfig {
    #[serde(default)]
    pub definition: DefinitionConfig,
    pub display: DisplayConfig,
    pub access: AccessConfig,
    pub logging: LoggingConfig,
}

/// Where the classification definition lives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefinitionConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub style: DisplayStyle,
    pub mobile: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStyle {
    Long,
    Short,
}

impl From<DisplayStyle> for Style {
    fn from(style: DisplayStyle) -> Self {
        match style {
            DisplayStyle::Long => Style::Long,
            DisplayStyle::Short => Style::Short,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    pub enforce: EnforceMode,
}

/// Whether access checks are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnforceMode {
    /// Follow the definition's own `enforce` flag.
    Definition,
    Always,
    Never,
}

impl EnforceMode {
    pub fn resolve(self, definition_enforces: bool) -> bool {
        match self {
            EnforceMode::Definition => definition_enforces,
            EnforceMode::Always => true,
            EnforceMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

/// Layers user settings over the embedded defaults, lowest precedence first.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Add a TOML file. It must exist when [`Loader::build`] runs.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        let file = File::from(path.as_ref()).format(FileFormat::Toml);
        Loader {
            builder: self.builder.add_source(file),
        }
    }

    /// Add `PREFIX_SECTION__KEY` variables, e.g. `C12N_DISPLAY__STYLE=short`.
    pub fn with_env_prefix(self, prefix: &str) -> Self {
        let environment = Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        Loader {
            builder: self.builder.add_source(environment),
        }
    }

    /// Pin `key` (dotted path) to `value` above every other layer.
    pub fn set_override(self, key: &str, value: impl Into<ValueKind>) -> Result<Self, ConfigError> {
        Ok(Loader {
            builder: self.builder.set_override(key, value)?,
        })
    }

    pub fn build(self) -> Result<C12nConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
