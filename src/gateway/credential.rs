//! Credential resolution.
//!
//! Precedence is fixed: operator (environment) key, then the key baked into
//! the deployment, then a key supplied by the caller. Empty values and the
//! unconfigured placeholder count as absent.

use std::fmt;

use thiserror::Error;

use crate::config::{ChatConfig, UNCONFIGURED_KEY_PLACEHOLDER};

/// Opaque upstream access token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where the effective key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Server,
    Builtin,
    Caller,
}

impl CredentialSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialSource::Server => "server",
            CredentialSource::Builtin => "builtin",
            CredentialSource::Caller => "caller",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no usable API key configured")]
pub struct CredentialError;

fn usable(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty() && *v != UNCONFIGURED_KEY_PLACEHOLDER)
}

/// Pick the effective key for one request.
pub fn resolve_credential(
    server: Option<&str>,
    builtin: Option<&str>,
    caller: Option<&str>,
) -> Result<(ApiKey, CredentialSource), CredentialError> {
    [
        (server, CredentialSource::Server),
        (builtin, CredentialSource::Builtin),
        (caller, CredentialSource::Caller),
    ]
    .into_iter()
    .find_map(|(value, source)| usable(value).map(|v| (ApiKey(v.to_string()), source)))
    .ok_or(CredentialError)
}

impl ChatConfig {
    /// Resolve against this deployment's keys.
    pub fn resolve_credential(
        &self,
        caller: Option<&str>,
    ) -> Result<(ApiKey, CredentialSource), CredentialError> {
        resolve_credential(
            self.server_api_key.as_deref(),
            Some(self.builtin_api_key.as_str()),
            caller,
        )
    }

    /// True when requests succeed without a caller-supplied key.
    pub fn has_server_key(&self) -> bool {
        self.resolve_credential(None).is_ok()
    }
}
