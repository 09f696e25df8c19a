//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EdgeConfig = toml::from_str(&content)?;
    finalize(config)
}

/// Built-in defaults plus the environment overlay, validated.
pub fn default_config() -> Result<EdgeConfig, ConfigError> {
    finalize(EdgeConfig::default())
}

fn finalize(mut config: EdgeConfig) -> Result<EdgeConfig, ConfigError> {
    apply_env_overlay(&mut config, |name| std::env::var(name).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Fill `server_api_key` from the variable named by `api_key_env`.
///
/// Empty values count as unset.
pub fn apply_env_overlay<F>(config: &mut EdgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    config.gateway.server_api_key = lookup(&config.gateway.api_key_env)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}
