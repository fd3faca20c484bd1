//! Container test application
//!
//! Serves health, info, status, config, log and echo endpoints.
//! Configuration comes from environment variables; `--host`/`--port`
//! override them.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use container_test_app::{init_tracing, AppConfig, ServerError, ServerHandle, ServerOptions};

#[derive(Debug, Parser)]
#[command(name = "container-test-app", version, about = "Container test application")]
struct Cli {
    /// Listen address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg.with_overrides(cli.host, cli.port),
        Err(e) => {
            init_tracing(&AppConfig::default());
            error!("{}", ServerError::from(e));
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);
    info!("Configuration loaded from environment");

    let handle = match ServerHandle::start(ServerOptions::new(config)).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    match handle.wait().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
