use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Directional call derived from the alignment of the 9/15/20 SMAs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionLabel {
    BuyLong,
    ShortMarket,
    Sideways,
}

impl DirectionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionLabel::BuyLong => "Buy long",
            DirectionLabel::ShortMarket => "Short the market",
            DirectionLabel::Sideways => "Sideways market",
        }
    }
}

impl fmt::Display for DirectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result together with the averages it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDirection {
    pub symbol: String,
    pub label: DirectionLabel,
    pub as_of: NaiveDate,
    pub sma_short: f64,
    pub sma_medium: f64,
    pub sma_long: f64,
}
