//! Configuration loading and validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::tween::Easing;

/// Largest lattice the proximity graph is built for (`32³`)
pub const MAX_CUBES: usize = 32 * 32 * 32;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Fixed RNG seed for the lattice jitter (random when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub lattice: LatticeConfig,
    #[serde(default)]
    pub proximity: ProximityConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Cubes per axis
    #[serde(default = "default_extent")]
    pub extent: usize,
    /// Distance between neighboring cell centres
    #[serde(default = "default_margin")]
    pub margin: f32,
    /// Cube edge length, also the width of the per-axis jitter
    #[serde(default = "default_cube_size")]
    pub cube_size: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            extent: default_extent(),
            margin: default_margin(),
            cube_size: default_cube_size(),
        }
    }
}

fn default_extent() -> usize {
    8
}

fn default_margin() -> f32 {
    2.5
}

fn default_cube_size() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityConfig {
    /// Cubes strictly closer than this are neighbors
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f32 {
    3.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Color transition length in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            easing: Easing::default(),
        }
    }
}

fn default_duration_ms() -> u64 {
    1000
}

impl CascadeConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CascadeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the lattice or graph cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cubes = self.lattice.extent.checked_pow(3);
        if !cubes.is_some_and(|n| n <= MAX_CUBES) {
            return Err(ConfigError::Invalid(format!(
                "lattice.extent must yield at most {} cubes, got extent {}",
                MAX_CUBES, self.lattice.extent
            )));
        }
        if !(self.lattice.margin.is_finite() && self.lattice.margin > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lattice.margin must be positive, got {}",
                self.lattice.margin
            )));
        }
        if !(self.lattice.cube_size.is_finite() && self.lattice.cube_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lattice.cube_size must be positive, got {}",
                self.lattice.cube_size
            )));
        }
        if !(self.proximity.threshold.is_finite() && self.proximity.threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "proximity.threshold must be non-negative, got {}",
                self.proximity.threshold
            )));
        }
        if self.animation.duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation.duration_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from file, falling back to defaults when it does not exist
pub fn load_config(path: &Path) -> Result<CascadeConfig, ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config = CascadeConfig::from_toml(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(CascadeConfig::default())
    }
}

/// Save default configuration to file
pub fn save_default_config(path: &Path) -> Result<(), ConfigError> {
    let content = CascadeConfig::default().to_toml()?;
    std::fs::write(path, content)?;
    Ok(())
}
