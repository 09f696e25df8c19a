//! Outbound HTTP client.
//!
//! One client per process, shared by every handler for connection reuse.
//! It holds no per-request state.

use reqwest::redirect::Policy;

const MAX_REDIRECTS: usize = 10;

/// Build the client used for all upstream calls.
///
/// Redirects are followed; no timeout is set.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
}
