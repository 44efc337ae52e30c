//! Configuration file support for trainlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/trainlog/config.toml`.
//! Only preferences live here; recorded sets are never written to disk.

use crate::catalog::{default_favorites, DEFAULT_MAX_RECENTS};
use crate::numeric::NumericInput;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub suggestions: SuggestionsConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Exercise catalog seeding
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_max_recents")]
    pub max_recents: usize,

    #[serde(default = "default_favorite_names")]
    pub favorites: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_recents: default_max_recents(),
            favorites: default_favorite_names(),
        }
    }
}

/// Suggestion popup timing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SuggestionsConfig {
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
        }
    }
}

/// Bounds for typed weight and reps
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LimitsConfig {
    #[serde(default = "default_weight_min")]
    pub weight_min: u32,

    #[serde(default = "default_weight_max")]
    pub weight_max: u32,

    #[serde(default = "default_reps_min")]
    pub reps_min: u32,

    #[serde(default = "default_reps_max")]
    pub reps_max: u32,

    #[serde(default = "default_step")]
    pub step: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            weight_min: default_weight_min(),
            weight_max: default_weight_max(),
            reps_min: default_reps_min(),
            reps_max: default_reps_max(),
            step: default_step(),
        }
    }
}

// Default value functions
fn default_max_recents() -> usize {
    DEFAULT_MAX_RECENTS
}

fn default_favorite_names() -> Vec<String> {
    default_favorites().to_vec()
}

fn default_quiet_period_ms() -> u64 {
    300
}

fn default_weight_min() -> u32 {
    0
}

fn default_weight_max() -> u32 {
    500
}

fn default_reps_min() -> u32 {
    1
}

fn default_reps_max() -> u32 {
    100
}

fn default_step() -> u32 {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("trainlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject settings the domain types cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.catalog.max_recents == 0 {
            return Err(Error::Config("catalog.max_recents must be at least 1".into()));
        }
        if self.limits.weight_min > self.limits.weight_max {
            return Err(Error::Config(format!(
                "limits.weight_min {} > weight_max {}",
                self.limits.weight_min, self.limits.weight_max
            )));
        }
        if self.limits.reps_min > self.limits.reps_max {
            return Err(Error::Config(format!(
                "limits.reps_min {} > reps_max {}",
                self.limits.reps_min, self.limits.reps_max
            )));
        }
        if self.limits.step == 0 {
            return Err(Error::Config("limits.step must be at least 1".into()));
        }
        Ok(())
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.suggestions.quiet_period_ms)
    }

    pub fn weight_input(&self) -> NumericInput {
        NumericInput::new(
            f64::from(self.limits.weight_min),
            f64::from(self.limits.weight_max),
            f64::from(self.limits.step),
        )
    }

    pub fn reps_input(&self) -> NumericInput {
        NumericInput::new(
            f64::from(self.limits.reps_min),
            f64::from(self.limits.reps_max),
            f64::from(self.limits.step),
        )
    }
}
