//! vexd — the vex extraction server.
//!
//! Serves bounding-box extracts over HTTP by running the extraction engine
//! once per request and streaming its stdout to the client.
//!
//! # Usage
//!
//! ```text
//! VEX_DB=/var/osm/db VEX_CMD=vex VEX_PORT=8282 vexd
//! vexd --db /var/osm/db --cmd /usr/local/bin/vex --host 127.0.0.1 --port 8282
//! ```
//!
//! Every setting is read once at startup; flags override the environment.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vex_core::config::{
    DEFAULT_DATABASE, DEFAULT_EXECUTABLE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RELAY_CAPACITY,
    DEFAULT_RELAY_CHUNK_SIZE, ENV_DATABASE, ENV_EXECUTABLE, ENV_HOST, ENV_PORT,
    ENV_RELAY_CAPACITY, ENV_RELAY_CHUNK_SIZE,
};
use vex_core::{RelayConfig, VexConfig};

const DEFAULT_LOG_FILTER: &str = "info,vexd=debug,vex_api=debug,vex_extract=debug";

#[derive(Parser, Debug)]
#[command(name = "vexd", about = "Vex extraction server", version)]
struct Cli {
    /// Database directory passed to the extraction engine.
    #[arg(long, env = ENV_DATABASE, default_value = DEFAULT_DATABASE)]
    db: PathBuf,

    /// Extraction engine executable.
    #[arg(long = "cmd", env = ENV_EXECUTABLE, default_value = DEFAULT_EXECUTABLE)]
    executable: PathBuf,

    /// Address to bind; 0.0.0.0 for all interfaces.
    #[arg(long, env = ENV_HOST, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on.
    #[arg(long, env = ENV_PORT, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Bytes read from the engine per chunk.
    #[arg(long, env = ENV_RELAY_CHUNK_SIZE, default_value_t = DEFAULT_RELAY_CHUNK_SIZE)]
    relay_chunk_size: usize,

    /// Chunks buffered per request before reading pauses.
    #[arg(long, env = ENV_RELAY_CAPACITY, default_value_t = DEFAULT_RELAY_CAPACITY)]
    relay_capacity: usize,

    /// Emit logs as JSON lines.
    #[arg(long, env = "VEX_LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> VexConfig {
        VexConfig {
            database: self.db,
            executable: self.executable,
            host: self.host,
            port: self.port,
            relay: RelayConfig {
                chunk_size: self.relay_chunk_size,
                capacity: self.relay_capacity,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.into_config();
    config.validate()?;

    serve(config).await
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve(config: VexConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let router = vex_api::build_router(&config);

    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        database = %config.database.display(),
        executable = %config.executable.display(),
        "vex server running"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("vex server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
