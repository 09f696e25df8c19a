//! Target rewriting for the transparent proxy.
//!
//! # Responsibilities
//! - Swap the inbound authority for the fixed upstream one
//! - Drop headers that identify the caller-facing host or origin
//!
//! # Design Decisions
//! - Path and query are never touched; a target the outbound URL parser would
//!   normalize (dot segments, re-encoded query bytes) is refused instead
//! - The inbound port is never carried over; only the configured authority counts
//! - `Host` is removed rather than rewritten so the client derives it from the URL

use std::str::FromStr;

use axum::http::{
    header,
    uri::{Authority, PathAndQuery, Scheme},
    HeaderMap, HeaderName, Uri,
};
use thiserror::Error;
use url::{Position, Url};

use crate::config::UpstreamConfig;

/// Why an inbound target cannot be sent upstream.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid upstream target: {0}")]
    Uri(#[from] axum::http::Error),

    #[error("invalid upstream target: {0}")]
    Url(#[from] url::ParseError),

    #[error("path and query {inbound:?} would be sent as {outbound:?}; refusing to alter it")]
    Altered { inbound: String, outbound: String },
}

/// Headers removed before forwarding.
pub const STRIPPED_HEADERS: [HeaderName; 3] = [header::HOST, header::REFERER, header::ORIGIN];

/// Point `original` at the upstream, keeping its path and query.
pub fn rewrite_uri(original: &Uri, upstream: &UpstreamConfig) -> Result<Uri, axum::http::Error> {
    let scheme = Scheme::from_str(&upstream.scheme)?;
    let authority = Authority::from_str(&upstream.host)?;
    let path_and_query = original
        .path_and_query()
        .cloned()
        .unwrap_or_else(|| PathAndQuery::from_static("/"));

    let uri = Uri::builder()
        .scheme(scheme)
        .authority(authority)
        .path_and_query(path_and_query)
        .build()?;
    Ok(uri)
}

/// Outbound URL for an already rewritten `target`.
///
/// Fails unless the URL keeps the target's path and query byte for byte.
pub fn outbound_url(target: &Uri) -> Result<Url, TargetError> {
    let url = Url::parse(&target.to_string())?;

    let inbound = target.path_and_query().map(PathAndQuery::as_str).unwrap_or("/");
    let outbound = &url[Position::BeforePath..Position::AfterQuery];
    if inbound != outbound {
        return Err(TargetError::Altered {
            inbound: inbound.to_string(),
            outbound: outbound.to_string(),
        });
    }
    Ok(url)
}

/// Copy of `inbound` without [`STRIPPED_HEADERS`].
pub fn filter_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    for name in &STRIPPED_HEADERS {
        headers.remove(name);
    }
    headers
}
