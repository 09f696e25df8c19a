//! Edge gateway library: a transparent rewriting proxy and a chat gateway
//! in front of a single fixed upstream API host.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod upstream;

pub use config::schema::EdgeConfig;
pub use http::{EntryPoint, HttpServer};
pub use lifecycle::Shutdown;
