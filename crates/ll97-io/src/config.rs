//! Toolkit configuration.
//!
//! [`Ll97Config`] is stored as TOML, by default in `~/.ll97/config.toml`.
//! Every section is optional; unspecified values use defaults, so an empty
//! file is a valid configuration.

use anyhow::{Context, Result};
use ll97_core::DEFAULT_PENALTY_RATE;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration for the CLI and the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ll97Config {
    /// Reference data locations.
    pub data: DataConfig,

    /// Calculation parameters.
    pub calc: CalcConfig,

    /// HTTP server settings.
    pub server: ServerConfig,
}

/// Paths to the factor tables. `None` uses the bundled copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub emissions_factors: Option<PathBuf>,
    pub limit_factors: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Dollars per tCO2e of overage.
    pub penalty_rate: f64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            penalty_rate: DEFAULT_PENALTY_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,

    /// Directory of front-end assets.
    pub static_dir: PathBuf,

    /// When set, rendered reports are also written here.
    pub output_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            static_dir: PathBuf::from("static"),
            output_dir: None,
        }
    }
}

impl Ll97Config {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ll97"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load from the default location, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config '{}'", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `explicit` when given (it must exist), else the default location.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("writing config '{}'", path.display()))?;
        Ok(())
    }
}
