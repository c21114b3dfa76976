//! Gateway daemon entry point.
//!
//! Startup order: parse arguments, load config, initialize logging and
//! metrics, bind the listener, serve until a shutdown signal arrives, then
//! drain in-flight runtime calls.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use runtime_gateway::config::{self, GatewayConfig};
use runtime_gateway::http::HttpServer;
use runtime_gateway::lifecycle::{signals, Shutdown};
use runtime_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "runtime-gateway")]
#[command(about = "HTTP front end for a local application runtime", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grace period for draining in-flight calls at shutdown, in seconds.
    #[arg(long, default_value_t = 5)]
    drain_grace_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!("runtime-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        app_id = %config.app.app_id,
        evaluate_url = %config.runtime.evaluate_url,
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
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            signals::shutdown_signal().await;
            shutdown.trigger();
        });
    }

    let server = HttpServer::new(config)?;
    let dispatcher = server.dispatcher();
    server.run(listener, shutdown.subscribe()).await?;

    dispatcher
        .drain(Duration::from_secs(args.drain_grace_secs))
        .await;
    tracing::info!("Shutdown complete");
    Ok(())
}
