//! Validated, chronologically ordered price series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AnalysisError;
use crate::models::candle::Candle;

/// Daily bars for one symbol, strictly increasing by date with finite closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Result<Self, AnalysisError> {
        for (index, candle) in candles.iter().enumerate() {
            if !candle.close.is_finite() {
                return Err(AnalysisError::NonFiniteClose { date: candle.date });
            }
            if index > 0 {
                let previous = candles[index - 1].date;
                if candle.date <= previous {
                    return Err(AnalysisError::NonChronological {
                        index,
                        previous,
                        current: candle.date,
                    });
                }
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            candles,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.candles.first().map(|c| c.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.candles.last().map(|c| c.date)
    }
}
