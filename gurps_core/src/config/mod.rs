//! Configuration loading from TOML files

mod constants;

pub use constants::{CombatDefaults, LogConstants, SamplingConstants, SimulatorConstants};

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load simulator constants, rejecting values the simulator cannot run with
pub fn load_constants(path: &Path) -> Result<SimulatorConstants, ConfigError> {
    let constants: SimulatorConstants = load_toml(path)?;
    validate_constants(&constants)?;
    info!(path = %path.display(), "loaded simulator constants");
    Ok(constants)
}

pub fn validate_constants(constants: &SimulatorConstants) -> Result<(), ConfigError> {
    if constants.log.capacity == 0 {
        return Err(ConfigError::ValidationError(
            "log.capacity must be at least 1".to_string(),
        ));
    }
    if constants.sampling.chunk_size == 0 {
        return Err(ConfigError::ValidationError(
            "sampling.chunk_size must be at least 1".to_string(),
        ));
    }
    if constants.combat.target_max_hp <= 0 {
        return Err(ConfigError::ValidationError(format!(
            "combat.target_max_hp must be positive, got {}",
            constants.combat.target_max_hp
        )));
    }
    Ok(())
}
