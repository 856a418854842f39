//! Configuration file support for dietrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/dietrack/config.toml`.

use crate::{Error, FoodItem, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub defaults: ProfileDefaults,

    #[serde(default)]
    pub foods: FoodsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Values used when a profile is created without them
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileDefaults {
    #[serde(default = "default_activity_level")]
    pub activity_level: f64,

    #[serde(default = "default_calorie_deficit")]
    pub calorie_deficit: f64,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            activity_level: default_activity_level(),
            calorie_deficit: default_calorie_deficit(),
        }
    }
}

/// User-defined foods merged into the built-in catalog
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct FoodsConfig {
    #[serde(default)]
    pub custom: Vec<FoodItem>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dietrack")
}

fn default_activity_level() -> f64 {
    1.375
}

fn default_calorie_deficit() -> f64 {
    500.0
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

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dietrack")
            .join("config.toml")
    }

    /// Reject defaults that could never form a valid profile
    pub fn validate(&self) -> Result<()> {
        let level = self.defaults.activity_level;
        if !level.is_finite() || level <= 0.0 {
            return Err(Error::Config(format!(
                "defaults.activity_level must be a positive number, got {}",
                level
            )));
        }
        if !self.defaults.calorie_deficit.is_finite() {
            return Err(Error::Config(
                "defaults.calorie_deficit must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
