//! Transparent rewriting proxy handler.
//!
//! # Responsibilities
//! - Forward any method/path/query to the fixed upstream
//! - Stream request and response bodies without buffering
//! - Add permissive CORS headers to whatever the upstream returns
//! - Turn transport failures into a parseable 500
//!
//! # Design Decisions
//! - No retries, no caching, no timeouts beyond the client defaults
//! - Redirects are followed by the outbound client
//! - Targets that cannot be forwarded unchanged fail before any upstream call

use std::time::Instant;

use axum::{
    body::{Body, HttpBody},
    extract::State,
    http::Request,
    response::Response,
};
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::http::request::request_id;
use crate::http::response::{apply_permissive_cors, transport_failure};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::rewrite::{filter_headers, outbound_url, rewrite_uri, TargetError};

const SERVICE: &str = "proxy";

/// Failure to obtain any upstream response.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    InvalidTarget(#[from] TargetError),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ProxyError {
    /// The synthetic 500 sent in place of an upstream response.
    pub fn into_response(self, location: &str) -> Response {
        transport_failure(self.to_string(), location)
    }
}

/// Main proxy handler, mounted on every path and method.
pub async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);
    let method = request.method().clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.uri().path(),
        "Proxying request"
    );

    let response = match forward(&state.client, &state.config.upstream, request).await {
        Ok(response) => {
            tracing::debug!(request_id = %request_id, status = %response.status(), "Upstream responded");
            response
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream request failed");
            e.into_response(&state.config.upstream.proxy_identifier)
        }
    };

    metrics::record_request(SERVICE, method.as_str(), response.status().as_u16(), start_time);
    response
}

/// Send `request` to the upstream and relay its response.
pub async fn forward(
    client: &reqwest::Client,
    upstream: &UpstreamConfig,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let target = rewrite_uri(&parts.uri, upstream).map_err(TargetError::from)?;
    let url = outbound_url(&target)?;

    let mut outbound = client
        .request(parts.method, url)
        .headers(filter_headers(&parts.headers));
    if !body.is_end_stream() {
        outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let upstream_response = outbound.send().await?;

    let status = upstream_response.status();
    let mut headers = upstream_response.headers().clone();
    apply_permissive_cors(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
