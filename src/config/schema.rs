//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Sentinel meaning "no credential baked into this deployment".
pub const UNCONFIGURED_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Root configuration shared by both entry points.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Fixed upstream authority.
    pub upstream: UpstreamConfig,

    /// Chat gateway settings.
    pub gateway: ChatConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// The single upstream every request is sent to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// URL scheme. Deployments keep `https`; tests point at plain-HTTP fakes.
    pub scheme: String,

    /// Upstream host, optionally with an explicit port.
    pub host: String,

    /// Reported as `location` in synthetic transport-failure bodies.
    pub proxy_identifier: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "generativelanguage.googleapis.com".to_string(),
            proxy_identifier: "edge-proxy".to_string(),
        }
    }
}

/// Chat gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Path accepting conversation payloads.
    pub chat_path: String,

    /// Model identifier used in the generation endpoint.
    pub model: String,

    /// API version path segment (e.g., "v1beta").
    pub api_version: String,

    /// Credential baked into the deployment.
    pub builtin_api_key: String,

    /// Environment variable holding the operator credential.
    pub api_key_env: String,

    /// Operator credential, overlaid from `api_key_env` at load time.
    #[serde(skip)]
    pub server_api_key: Option<String>,

    /// Sampling temperature sent with every generation request.
    pub temperature: f32,

    /// Output length cap sent with every generation request.
    pub max_output_tokens: u32,

    /// Maximum inbound chat payload size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            chat_path: "/api/chat".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_version: "v1beta".to_string(),
            builtin_api_key: UNCONFIGURED_KEY_PLACEHOLDER.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            server_api_key: None,
            temperature: 0.7,
            max_output_tokens: 2048,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
