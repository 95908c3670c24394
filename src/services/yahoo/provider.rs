//! Yahoo Finance chart API provider implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use tracing::{debug, info, warn};
use url::Url;

use super::messages::{ChartEnvelope, ChartResult};
use crate::config::{DashboardConfig, DEFAULT_YAHOO_BASE_URL};
use crate::error::MarketDataError;
use crate::models::{Candle, PriceSeries};
use crate::services::market_data::{DateRange, MarketDataProvider};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooMarketDataProvider {
    pub fn new() -> Self {
        Self::with_client(DEFAULT_YAHOO_BASE_URL, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, MarketDataError> {
        let client = build_client(config.request_timeout)?;
        Ok(Self::with_client(config.yahoo_base_url.clone(), client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chart_url(&self, symbol: &str, range: &DateRange) -> Result<Url, MarketDataError> {
        let encoded: String = url::form_urlencoded::byte_serialize(symbol.as_bytes()).collect();
        let mut url = Url::parse(&format!(
            "{}/v8/finance/chart/{}",
            self.base_url, encoded
        ))?;
        url.query_pairs_mut()
            .append_pair("period1", &range.start_timestamp().to_string())
            .append_pair("period2", &range.end_timestamp().to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }
}

impl Default for YahooMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, MarketDataError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_series(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<PriceSeries, MarketDataError> {
        let url = self.chart_url(symbol, range)?;
        debug!(symbol, url = %url, "Requesting chart data");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ChartEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.chart.error)
                .map(|error| error.description)
                .filter(|description| !description.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            warn!(symbol, status = status.as_u16(), %message, "Chart request rejected");
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ChartEnvelope = serde_json::from_str(&body)
            .map_err(|e| MarketDataError::Malformed(e.to_string()))?;

        if let Some(error) = envelope.chart.error {
            return Err(MarketDataError::NoData {
                symbol: symbol.to_string(),
                reason: format!("{}: {}", error.code, error.description),
            });
        }

        let result = envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::NoData {
                symbol: symbol.to_string(),
                reason: "empty result".to_string(),
            })?;

        let candles = candles_from_chart(result)?;
        if candles.is_empty() {
            return Err(MarketDataError::NoData {
                symbol: symbol.to_string(),
                reason: "no bars in range".to_string(),
            });
        }

        let series = PriceSeries::new(symbol, candles)?;
        info!(
            symbol,
            bars = series.len(),
            first = ?series.first_date(),
            last = ?series.last_date(),
            "Fetched chart data"
        );
        Ok(series)
    }
}

/// Convert the column-oriented chart result into daily candles.
///
/// Rows with a missing price are dropped, missing volume becomes zero and a
/// later row replaces an earlier one on the same exchange-local date.
pub fn candles_from_chart(result: ChartResult) -> Result<Vec<Candle>, MarketDataError> {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;

    let mut candles: Vec<Candle> = Vec::with_capacity(result.timestamp.len());
    for (i, &timestamp) in result.timestamp.iter().enumerate() {
        let date = local_date(timestamp, offset).ok_or_else(|| {
            MarketDataError::Malformed(format!("timestamp out of range: {}", timestamp))
        })?;

        let column = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) = (
            column(&quote.open),
            column(&quote.high),
            column(&quote.low),
            column(&quote.close),
        ) else {
            debug!(%date, "Skipping bar without prices");
            continue;
        };
        let volume = column(&quote.volume).unwrap_or(0.0);

        let candle = Candle::new(date, open, high, low, close, volume);
        match candles.last_mut() {
            Some(last) if last.date == date => *last = candle,
            _ => candles.push(candle),
        }
    }

    Ok(candles)
}

fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    timestamp
        .checked_add(gmtoffset)
        .and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.date_naive())
}
