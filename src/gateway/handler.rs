//! Chat gateway handler.
//!
//! # Responsibilities
//! - Validate the conversation payload before any upstream call
//! - Resolve the credential and build the generate-content request
//! - Relay the upstream JSON, success or error, without reshaping it
//!
//! # Design Decisions
//! - Upstream errors keep their status; only local failures become 500
//! - The credential travels in the URL query and is stripped from any error text
//! - Only relayed upstream bodies carry `Access-Control-Allow-Origin`

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::{ChatConfig, EdgeConfig, UpstreamConfig};
use crate::gateway::credential::{ApiKey, CredentialError};
use crate::gateway::types::{ChatRequest, GenerateContentRequest, GenerationConfig};
use crate::http::request::request_id;
use crate::http::response::{allow_any_origin, error_message};
use crate::http::server::AppState;
use crate::observability::metrics;

const SERVICE: &str = "gateway";

/// Every way a chat request can fail locally.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("empty message content")]
    EmptyConversation,

    #[error(
        "The server has no API key configured. Contact the administrator or append ?key=YOUR_API_KEY to the page URL."
    )]
    MissingCredential,

    #[error("failed to read request body: {0}")]
    ReadBody(axum::Error),

    #[error("{0}")]
    MalformedRequest(serde_json::Error),

    #[error("invalid upstream endpoint: {0}")]
    InvalidTarget(#[from] url::ParseError),

    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("upstream returned invalid JSON: {0}")]
    MalformedUpstream(serde_json::Error),
}

impl From<CredentialError> for GatewayError {
    fn from(_: CredentialError) -> Self {
        GatewayError::MissingCredential
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        // The URL carries the key.
        GatewayError::Transport(e.without_url())
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::EmptyConversation => StatusCode::BAD_REQUEST,
            GatewayError::MissingCredential => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        error_message(self.status(), self.to_string())
    }
}

/// Parsed upstream body plus the status it arrived with.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for UpstreamReply {
    fn into_response(self) -> Response {
        let status = if self.status.is_success() {
            StatusCode::OK
        } else {
            self.status
        };
        let mut headers = HeaderMap::new();
        allow_any_origin(&mut headers);
        (status, headers, Json(self.body)).into_response()
    }
}

/// `POST <chat_path>`.
pub async fn chat_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);

    let response = match relay_chat(&state.client, &state.config, request.into_body()).await {
        Ok(reply) => {
            if !reply.status.is_success() {
                tracing::warn!(request_id = %request_id, status = %reply.status, "Upstream returned an error");
            }
            reply.into_response()
        }
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!(request_id = %request_id, error = %e, "Chat request failed");
            } else {
                tracing::info!(request_id = %request_id, status = %e.status(), error = %e, "Chat request rejected");
            }
            e.into_response()
        }
    };

    metrics::record_request(SERVICE, "POST", response.status().as_u16(), start_time);
    response
}

/// Validate `body`, call the upstream once, and return its parsed reply.
pub async fn relay_chat(
    client: &reqwest::Client,
    config: &EdgeConfig,
    body: Body,
) -> Result<UpstreamReply, GatewayError> {
    let gateway = &config.gateway;

    let bytes = axum::body::to_bytes(body, gateway.max_body_bytes)
        .await
        .map_err(GatewayError::ReadBody)?;
    let chat: ChatRequest =
        serde_json::from_slice(&bytes).map_err(GatewayError::MalformedRequest)?;

    if chat.turns().is_empty() {
        return Err(GatewayError::EmptyConversation);
    }

    let (key, source) = gateway.resolve_credential(chat.api_key.as_deref())?;
    let url = generate_content_url(&config.upstream, gateway, &key)?;

    tracing::debug!(
        model = %gateway.model,
        turns = chat.turns().len(),
        credential_source = source.as_str(),
        "Calling generateContent"
    );

    let upstream_response = client
        .post(url)
        .json(&GenerateContentRequest {
            contents: chat.turns(),
            generation_config: GenerationConfig {
                temperature: gateway.temperature,
                max_output_tokens: gateway.max_output_tokens,
            },
        })
        .send()
        .await?;

    let status = upstream_response.status();
    let bytes = upstream_response.bytes().await?;
    let body = serde_json::from_slice(&bytes).map_err(GatewayError::MalformedUpstream)?;

    Ok(UpstreamReply { status, body })
}

/// `{scheme}://{host}/{version}/models/{model}:generateContent?key=...`
pub fn generate_content_url(
    upstream: &UpstreamConfig,
    gateway: &ChatConfig,
    key: &ApiKey,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!(
        "{}://{}/{}/models/{}:generateContent",
        upstream.scheme, upstream.host, gateway.api_version, gateway.model
    ))?;
    url.query_pairs_mut().append_pair("key", key.expose());
    Ok(url)
}
