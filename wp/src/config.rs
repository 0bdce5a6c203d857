//! Wayplan configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Wayplan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Planner service connection
    pub service: ServiceConfig,

    /// Defaults applied when a trip request leaves fields unset
    pub defaults: TripDefaults,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .wayplan.yml
        let local_config = PathBuf::from(".wayplan.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/wayplan/wayplan.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("wayplan").join("wayplan.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Planner service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Maximum retries for transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 60_000,
            max_retries: 3,
        }
    }
}

/// Defaults for trip requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripDefaults {
    /// Default origin when none is given ("auto" lets the service decide)
    pub origin: String,

    /// Default travel style
    #[serde(rename = "travel-style")]
    pub travel_style: String,

    /// Default total budget in USD
    #[serde(rename = "budget-usd")]
    pub budget_usd: f64,
}

impl Default for TripDefaults {
    fn default() -> Self {
        Self {
            origin: "auto".to_string(),
            travel_style: "standard".to_string(),
            budget_usd: 2_000.0,
        }
    }
}
