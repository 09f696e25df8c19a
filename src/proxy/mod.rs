//! Transparent rewriting proxy.
//!
//! # Data Flow
//! ```text
//! Inbound request (any method, any path)
//!     → rewrite.rs (swap authority, strip Host/Referer/Origin)
//!     → forward.rs (stream body to upstream, follow redirects)
//!     → upstream response + CORS headers
//!        or synthetic 500 { error, location } on transport failure
//! ```

pub mod forward;
pub mod rewrite;

pub use forward::{forward, proxy_handler, ProxyError};
pub use rewrite::{filter_headers, rewrite_uri, STRIPPED_HEADERS};
