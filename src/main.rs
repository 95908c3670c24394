//! Disha command-line report
//!
//! Fetches the Nifty Bank and Nifty 50 daily series once, prints the selected
//! view and the market direction section.
//!
//! Usage: `disha [bank|nifty50|table]`

use disha::config::DashboardConfig;
use disha::core::dashboard::{Dashboard, ViewOption};
use disha::core::report::render_report;
use disha::logging;
use disha::services::yahoo::YahooMarketDataProvider;
use dotenvy::dotenv;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let view: ViewOption = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => ViewOption::default(),
    };

    let config = DashboardConfig::from_env()?;
    info!(
        start = %config.range.start,
        end = %config.range.end,
        view = ?view,
        "Loading index data"
    );

    let provider = YahooMarketDataProvider::from_config(&config)?;
    let dashboard = Dashboard::load(&provider, config.range, None).await;

    print!("{}", render_report(&dashboard, view)?);

    Ok(())
}
