//! Edge gateway
//!
//! Two stateless entry points in front of one fixed upstream API host.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 EDGE GATEWAY                 │
//!                       │                                              │
//!   Client Request      │  ┌─────────┐   ┌──────────────────────────┐  │
//!   ────────────────────┼─▶│  http   │──▶│ proxy   (any path)       │──┼──▶ https://<upstream>/<same path>
//!                       │  │ server  │   │  rewrite → forward       │  │
//!                       │  └─────────┘   ├──────────────────────────┤  │
//!                       │                │ gateway (/api/chat)      │──┼──▶ https://<upstream>/v1beta/models/
//!                       │                │  credential → relay      │  │       <model>:generateContent
//!                       │                └──────────────────────────┘  │
//!                       │  ┌────────────────────────────────────────┐  │
//!                       │  │ config · observability · lifecycle     │  │
//!                       │  └────────────────────────────────────────┘  │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;

use edge_gateway::config::{default_config, load_config};
use edge_gateway::lifecycle::signals::wait_for_termination;
use edge_gateway::observability::{logging, metrics};
use edge_gateway::{EntryPoint, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "edge-gateway")]
#[command(about = "Rewriting proxy and chat gateway for a fixed upstream API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forward every request to the upstream host
    Proxy(ServeArgs),
    /// Serve the chat page and the chat endpoint
    Gateway(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (entry, args) = match cli.command {
        Commands::Proxy(args) => (EntryPoint::Proxy, args),
        Commands::Gateway(args) => (EntryPoint::Gateway, args),
    };

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("edge-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        entry = %entry,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.host,
        model = %config.gateway.model,
        server_key = config.gateway.server_api_key.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, entry)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_termination().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
