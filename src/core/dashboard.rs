//! Session state of the index dashboard.
//!
//! Every index is fetched exactly once when the dashboard loads. A failed
//! fetch is kept as a message and the index is treated as absent for the rest
//! of the session; nothing downstream is computed for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{AnalysisError, DashboardError};
use crate::indicators::trend::sma_overlays;
use crate::metrics::Metrics;
use crate::models::{Candle, ChartPayload, DirectionLabel, MarketDirection, PriceSeries};
use crate::services::market_data::{DateRange, MarketDataProvider};
use crate::signals::direction::{determine_market_direction, SMA_WINDOWS};

pub const FETCH_SUCCESS_MESSAGE: &str = "Stock data fetched successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKey {
    #[serde(rename = "nifty-bank")]
    NiftyBank,
    #[serde(rename = "nifty-50")]
    Nifty50,
}

impl IndexKey {
    pub const ALL: [IndexKey; 2] = [IndexKey::NiftyBank, IndexKey::Nifty50];

    pub fn symbol(&self) -> &'static str {
        match self {
            IndexKey::NiftyBank => "^NSEBANK",
            IndexKey::Nifty50 => "^NSEI",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndexKey::NiftyBank => "Nifty Bank",
            IndexKey::Nifty50 => "Nifty 50",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            IndexKey::NiftyBank => "nifty-bank",
            IndexKey::Nifty50 => "nifty-50",
        }
    }

    pub fn chart_title(&self) -> &'static str {
        match self {
            IndexKey::NiftyBank => "BANK NIFTY Spot Price with Simple Moving Averages",
            IndexKey::Nifty50 => "NIFTY 50 Spot Price with Simple Moving Averages",
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndexKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nifty-bank" | "niftybank" | "bank" => Ok(IndexKey::NiftyBank),
            "nifty-50" | "nifty50" => Ok(IndexKey::Nifty50),
            other => Err(format!("unknown index: {}", other)),
        }
    }
}

/// What the user asked to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewOption {
    #[default]
    NiftyBankChart,
    Nifty50Chart,
    DataTable,
}

impl ViewOption {
    /// The index whose chart this view shows, `None` for the table view.
    pub fn index(&self) -> Option<IndexKey> {
        match self {
            ViewOption::NiftyBankChart => Some(IndexKey::NiftyBank),
            ViewOption::Nifty50Chart => Some(IndexKey::Nifty50),
            ViewOption::DataTable => None,
        }
    }
}

impl FromStr for ViewOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bank" | "nifty-bank" | "niftybank" => Ok(ViewOption::NiftyBankChart),
            "nifty50" | "nifty-50" => Ok(ViewOption::Nifty50Chart),
            "table" | "data-table" => Ok(ViewOption::DataTable),
            other => Err(format!(
                "unknown view '{}' (expected bank, nifty50 or table)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndexData {
    Loaded(PriceSeries),
    Unavailable { message: String },
}

/// Per-index status for listings.
#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub index: IndexKey,
    pub name: &'static str,
    pub symbol: &'static str,
    pub available: bool,
    pub bars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One line of the market direction section.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionReport {
    pub index: IndexKey,
    pub name: &'static str,
    /// `null` when the direction could not be computed.
    pub label: Option<DirectionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<MarketDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Dashboard {
    range: DateRange,
    entries: Vec<(IndexKey, IndexData)>,
}

impl Dashboard {
    /// Fetch every index once through `provider`.
    pub async fn load(
        provider: &dyn MarketDataProvider,
        range: DateRange,
        metrics: Option<&Metrics>,
    ) -> Self {
        let mut entries = Vec::with_capacity(IndexKey::ALL.len());

        for key in IndexKey::ALL {
            let data = match provider.get_series(key.symbol(), &range).await {
                Ok(series) => {
                    info!(index = %key, symbol = key.symbol(), bars = series.len(), "Index loaded");
                    IndexData::Loaded(series)
                }
                Err(e) => {
                    error!(index = %key, symbol = key.symbol(), error = %e, "Error fetching stock data");
                    IndexData::Unavailable {
                        message: e.to_string(),
                    }
                }
            };
            if let Some(metrics) = metrics {
                metrics.record_fetch(matches!(data, IndexData::Loaded(_)));
            }
            entries.push((key, data));
        }

        Self { range, entries }
    }

    pub fn from_entries(range: DateRange, entries: Vec<(IndexKey, IndexData)>) -> Self {
        Self { range, entries }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn data(&self, key: IndexKey) -> Option<&IndexData> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, data)| data)
    }

    pub fn series(&self, key: IndexKey) -> Result<&PriceSeries, DashboardError> {
        match self.data(key) {
            Some(IndexData::Loaded(series)) => Ok(series),
            Some(IndexData::Unavailable { message }) => Err(DashboardError::Unavailable {
                index: key.name().to_string(),
                message: message.clone(),
            }),
            None => Err(DashboardError::Unavailable {
                index: key.name().to_string(),
                message: "not loaded".to_string(),
            }),
        }
    }

    pub fn is_available(&self, key: IndexKey) -> bool {
        matches!(self.data(key), Some(IndexData::Loaded(_)))
    }

    pub fn has_any_data(&self) -> bool {
        IndexKey::ALL.iter().any(|&key| self.is_available(key))
    }

    /// Messages of every failed fetch, prefixed with the index name.
    pub fn fetch_errors(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(key, data)| match data {
                IndexData::Unavailable { message } => Some(format!("{}: {}", key.name(), message)),
                IndexData::Loaded(_) => None,
            })
            .collect()
    }

    /// Status line shown after loading.
    pub fn fetch_message(&self) -> String {
        let errors = self.fetch_errors();
        if errors.is_empty() {
            FETCH_SUCCESS_MESSAGE.to_string()
        } else {
            format!("Error fetching stock data: {}", errors.join("; "))
        }
    }

    pub fn summaries(&self) -> Vec<IndexSummary> {
        self.entries
            .iter()
            .map(|(key, data)| {
                let (available, bars, message) = match data {
                    IndexData::Loaded(series) => (true, series.len(), None),
                    IndexData::Unavailable { message } => (false, 0, Some(message.clone())),
                };
                IndexSummary {
                    index: *key,
                    name: key.name(),
                    symbol: key.symbol(),
                    available,
                    bars,
                    message,
                }
            })
            .collect()
    }

    pub fn chart(&self, key: IndexKey) -> Result<ChartPayload, DashboardError> {
        let series = self.series(key)?;
        let overlays = sma_overlays(series, &SMA_WINDOWS)?;

        Ok(ChartPayload {
            symbol: series.symbol().to_string(),
            title: key.chart_title().to_string(),
            x_axis_title: "Date".to_string(),
            y_axis_title: "Spot Price".to_string(),
            candles: series.candles().to_vec(),
            overlays,
        })
    }

    pub fn table(&self, key: IndexKey) -> Result<&[Candle], DashboardError> {
        Ok(self.series(key)?.candles())
    }

    pub fn direction(&self, key: IndexKey) -> Result<MarketDirection, DashboardError> {
        let series = self.series(key)?;
        determine_market_direction(series).map_err(|e| {
            if let AnalysisError::InsufficientData { required, actual } = &e {
                warn!(index = %key, required, actual, "Not enough bars to classify direction");
            }
            DashboardError::from(e)
        })
    }

    /// Directions of every loaded index; indices that failed to load are left out.
    pub fn market_directions(&self) -> Vec<DirectionReport> {
        IndexKey::ALL
            .iter()
            .filter(|&&key| self.is_available(key))
            .map(|&key| {
                let (direction, error) = match self.direction(key) {
                    Ok(direction) => (Some(direction), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                DirectionReport {
                    index: key,
                    name: key.name(),
                    label: direction.as_ref().map(|d| d.label),
                    direction,
                    error,
                }
            })
            .collect()
    }
}
