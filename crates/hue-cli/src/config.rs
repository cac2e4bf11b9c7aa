//! YAML settings.
//!
//! Resolution order: built-in defaults, then the file given by `--config`
//! (or `HUE_CONFIG`), then command-line flags.
//!
//! ```yaml
//! cluster:
//!   eps: 2.5
//!   min_samples: 2
//!   weighted: false
//! histogram:
//!   bin_size: 0.1
//! swatch:
//!   width: 512
//!   height: 64
//! threads: 0
//! ```

use anyhow::{Context, Result, bail};
use hue_cluster::{DEFAULT_EPS, DEFAULT_MIN_SAMPLES};
use hue_color::histogram::DEFAULT_BIN_SIZE;
use hue_io::swatch::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "HUE_CONFIG";

/// All tunable settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub cluster: ClusterSettings,
    pub histogram: HistogramSettings,
    pub swatch: SwatchSettings,
    /// Worker threads, 0 = one per core.
    pub threads: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterSettings {
    pub eps: f64,
    pub min_samples: usize,
    pub weighted: bool,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_samples: DEFAULT_MIN_SAMPLES,
            weighted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramSettings {
    pub bin_size: f64,
    pub weighted: bool,
}

impl Default for HistogramSettings {
    fn default() -> Self {
        Self {
            bin_size: DEFAULT_BIN_SIZE,
            weighted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwatchSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for SwatchSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Settings {
    /// Loads settings from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses settings from YAML. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads `explicit`, else the file named by `HUE_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading settings");
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
