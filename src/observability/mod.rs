//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Both entry points produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Credentials never reach a log field; only their source does
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
