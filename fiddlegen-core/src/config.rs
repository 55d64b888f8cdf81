//! Generator configuration (`fiddlegen.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub output: OutputConfig,
    pub catalog: CatalogConfig,
}

/// Where and how artifacts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Artifact directory.
    pub dir: PathBuf,
    /// Path the generated code imports the runtime crate under.
    pub runtime_crate: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("generated"),
            runtime_crate: "fiddlegen_runtime".into(),
        }
    }
}

/// Which catalog functions are walked and how they are classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Functions never generated.
    pub banned_functions: Vec<String>,
    /// Display-name substring marking a period-style optional input.
    pub period_marker: String,
    /// When non-empty, only these functions are generated.
    pub only: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            banned_functions: vec!["TRIX".into()],
            period_marker: "Period".into(),
            only: Vec::new(),
        }
    }
}

impl CatalogConfig {
    pub fn is_banned(&self, name: &str) -> bool {
        self.banned_functions.iter().any(|b| b == name)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|o| o == name)
    }
}

impl GeneratorConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.period_marker.is_empty() {
            return Err(ConfigError::Invalid("catalog.period_marker must not be empty".into()));
        }
        if !is_rust_path(&self.output.runtime_crate) {
            return Err(ConfigError::Invalid(format!(
                "output.runtime_crate '{}' is not a Rust path",
                self.output.runtime_crate
            )));
        }
        Ok(())
    }
}

fn is_rust_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
