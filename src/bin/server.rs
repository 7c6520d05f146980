//! kvcache Server Binary
//!
//! Starts the TCP server for kvcache.

use std::sync::Arc;

use clap::Parser;
use kvcache::network::Server;
use kvcache::{Config, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// kvcache Server
#[derive(Parser, Debug)]
#[command(name = "kvcache-server")]
#[command(about = "In-memory key-value cache with a binary TCP protocol")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Listen port, overriding the port part of --listen
    #[arg(short, long)]
    port: Option<u16>,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Number of store shards
    #[arg(short, long, default_value = "16")]
    shards: usize,

    /// Idle read timeout in milliseconds (0 disables)
    #[arg(long, default_value = "30000")]
    read_timeout_ms: u64,

    /// Largest accepted key+value size per frame, in bytes
    #[arg(long, default_value = "16777216")]
    max_frame_size: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kvcache=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    // Build config from args
    let mut builder = Config::builder()
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .num_shards(args.shards)
        .read_timeout_ms(args.read_timeout_ms)
        .max_frame_size(args.max_frame_size);
    if let Some(port) = args.port {
        builder = builder.port(port);
    }
    let config = builder.build();

    tracing::info!("kvcache Server v{}", kvcache::VERSION);
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Store shards: {}", config.num_shards);

    let store = Arc::new(Store::with_shards(config.num_shards));

    let server = match Server::bind(config, store) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    // Set up Ctrl+C / SIGTERM handler
    let shutdown = server.shutdown_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("Received shutdown signal, initiating shutdown...");
        shutdown.shutdown();
    }) {
        tracing::warn!("Failed to install signal handler: {}", e);
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
