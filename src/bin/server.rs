//! Equitrix Trading Bot Server
//!
//! Starts the HTTP server exposing the `/doWork` decision endpoint plus
//! health and metrics endpoints. One invocation of `/doWork` runs one full
//! decision cycle against the brokerage and market-data providers.

use dotenvy::dotenv;
use equitrix::config::{get_environment, Config};
use equitrix::core::http::start_server;
use equitrix::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let env = get_environment();

    info!("Starting Equitrix Trading Bot");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        watchlist_size = config.watchlist.len(),
        "Watchlist: {}",
        config.watchlist.join(", ")
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
