//! Yahoo Finance market data provider

pub mod messages;
pub mod provider;

pub use provider::YahooMarketDataProvider;
