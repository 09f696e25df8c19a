//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, entry point selection)
//!     → request.rs (assign request ID)
//!     → proxy:: or gateway:: handler
//!     → response.rs (CORS headers, JSON error bodies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, EntryPoint, HttpServer};
