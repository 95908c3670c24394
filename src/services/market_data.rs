//! Market data provider interface.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, MarketDataError};
use crate::models::PriceSeries;

/// Inclusive start, exclusive end, in calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if start >= end {
            return Err(ConfigError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Unix timestamp of the start of `start`, UTC.
    pub fn start_timestamp(&self) -> i64 {
        self.start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp()
    }

    /// Unix timestamp of the start of `end`, UTC.
    pub fn end_timestamp(&self) -> i64 {
        self.end.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2023, 8, 24).unwrap_or_default(),
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch daily bars for `symbol` within `range`. One attempt; failures are
    /// returned to the caller.
    async fn get_series(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<PriceSeries, MarketDataError>;
}
