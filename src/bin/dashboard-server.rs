//! Disha Dashboard Server
//!
//! Loads both index series once at startup and serves chart payloads, data
//! tables and market direction as JSON for an external charting front end.

use disha::config::{get_environment, DashboardConfig};
use disha::core::dashboard::Dashboard;
use disha::core::http::start_server;
use disha::logging;
use disha::metrics::Metrics;
use disha::services::yahoo::YahooMarketDataProvider;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = DashboardConfig::from_env()?;
    info!("Starting Disha Dashboard Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        start = %config.range.start,
        end = %config.range.end,
        "Fetching index data"
    );

    let metrics = Arc::new(Metrics::new()?);
    let provider = YahooMarketDataProvider::from_config(&config)?;
    let dashboard = Dashboard::load(&provider, config.range, Some(metrics.as_ref())).await;

    if dashboard.has_any_data() {
        info!(message = %dashboard.fetch_message(), "Index data loaded");
    } else {
        warn!(message = %dashboard.fetch_message(), "No index data available, serving status only");
    }

    let port = config.port;
    let dashboard = Arc::new(dashboard);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, dashboard, metrics).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down dashboard server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
