//! Tool configuration loaded from `config.toml`

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where persisted variables live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// `setx` on Windows, the file store everywhere else
    #[default]
    Auto,
    /// Windows user environment via `setx`
    Setx,
    /// `env.toml` + `env.sh` in the store directory
    File,
}

impl StoreKind {
    /// Resolve `Auto` for the current platform
    pub fn resolve(self) -> StoreKind {
        match self {
            StoreKind::Auto if cfg!(windows) => StoreKind::Setx,
            StoreKind::Auto => StoreKind::File,
            other => other,
        }
    }
}

/// Names of the persisted variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableNames {
    /// Serialized `YYYYMMDD=YYYYMMDD;...` table
    pub date_map: String,

    /// Resolved date consumed by downstream jobs
    pub evaluation_date: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            date_map: "date_map".to_string(),
            evaluation_date: "evaluation_date".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalDateConfig {
    /// Store backend
    pub store: StoreKind,

    /// Directory for the file store (defaults to `<data_dir>/evaldate`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,

    /// Variable names
    pub variables: VariableNames,
}

impl EvalDateConfig {
    /// Default config location: `<config_dir>/evaldate/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("evaldate").join("config.toml"))
    }

    /// Load config from an explicit path, or the default location if present
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: EvalDateConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Directory used by the file store
    pub fn resolved_store_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.store_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("evaldate"))
            .ok_or_else(|| anyhow::anyhow!("Cannot find data directory; set store_dir in config"))
    }
}
