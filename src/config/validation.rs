//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (temperature, output length)
//! - Check addresses and paths are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::EdgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("upstream.host must not be empty")]
    EmptyUpstreamHost,

    #[error("upstream.scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("gateway.model must not be empty")]
    EmptyModel,

    #[error("gateway.temperature {0} is outside 0.0..=2.0")]
    TemperatureOutOfRange(f32),

    #[error("gateway.max_output_tokens must be greater than zero")]
    ZeroOutputTokens,

    #[error("gateway.chat_path {0:?} must start with '/'")]
    RelativeChatPath(String),

    #[error("gateway.chat_path {0:?} collides with the page route '/'")]
    RootChatPath(String),

    #[error("gateway.chat_path {0:?} must be a literal path without '{{', '}}', '*' or ':'")]
    PatternChatPath(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.host.trim().is_empty() {
        errors.push(ValidationError::EmptyUpstreamHost);
    }
    if !matches!(config.upstream.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::UnsupportedScheme(config.upstream.scheme.clone()));
    }
    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let gateway = &config.gateway;
    if gateway.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModel);
    }
    if !(0.0..=2.0).contains(&gateway.temperature) {
        errors.push(ValidationError::TemperatureOutOfRange(gateway.temperature));
    }
    if gateway.max_output_tokens == 0 {
        errors.push(ValidationError::ZeroOutputTokens);
    }
    let chat_path = &gateway.chat_path;
    if !chat_path.starts_with('/') {
        errors.push(ValidationError::RelativeChatPath(chat_path.clone()));
    } else if chat_path.trim_end_matches('/').is_empty() {
        errors.push(ValidationError::RootChatPath(chat_path.clone()));
    }
    if chat_path.contains(['{', '}', '*', ':']) {
        errors.push(ValidationError::PatternChatPath(chat_path.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
