//! Chat gateway.
//!
//! # Data Flow
//! ```text
//! POST /api/chat { messages, apiKey? }
//!     → handler.rs (read + parse body, reject empty conversation)
//!     → credential.rs (server > builtin > caller)
//!     → handler.rs (POST models/{model}:generateContent?key=...)
//!     → upstream JSON relayed with its status (2xx collapses to 200)
//!
//! GET /          → page.rs (companion chat page)
//! anything else  → 404 "Not Found"
//! ```

pub mod credential;
pub mod handler;
pub mod page;
pub mod types;

pub use credential::{resolve_credential, ApiKey, CredentialError, CredentialSource};
pub use handler::{chat_handler, relay_chat, GatewayError, UpstreamReply};
pub use page::{not_found, page_handler};
pub use types::{ChatRequest, Part, Role, Turn};
