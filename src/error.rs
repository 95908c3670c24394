//! Error types shared across the analysis, data and configuration layers.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the pure computations over a price series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("moving average window must be at least 1")]
    InvalidWindow,

    #[error("bars out of order at position {index}: {current} does not follow {previous}")]
    NonChronological {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("non-finite close price on {date}")]
    NonFiniteClose { date: NaiveDate },
}

/// Failures while retrieving a series from a market data provider.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid provider url: {0}")]
    Url(#[from] url::ParseError),

    #[error("provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("no data returned for {symbol}: {reason}")]
    NoData { symbol: String, reason: String },

    #[error("invalid series: {0}")]
    InvalidSeries(#[from] AnalysisError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },

    #[error("start date {start} must be before end date {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },
}

/// Reasons a dashboard view for one index cannot be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("{index} data unavailable: {message}")]
    Unavailable { index: String, message: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
