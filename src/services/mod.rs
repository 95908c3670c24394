//! External data sources.

pub mod market_data;
pub mod yahoo;

pub use market_data::{DateRange, MarketDataProvider};
