//! Market direction from the alignment of three simple moving averages.
//!
//! The short, medium and long averages are compared at the final bar. A
//! strictly descending stack (short above medium above long) is a long call,
//! a strictly ascending one a short call, anything else is sideways.

use tracing::debug;

use crate::error::AnalysisError;
use crate::indicators::trend::sma_series;
use crate::models::{DirectionLabel, MarketDirection, PriceSeries};

pub const SHORT_WINDOW: usize = 9;
pub const MEDIUM_WINDOW: usize = 15;
pub const LONG_WINDOW: usize = 20;

/// Windows of the overlays drawn on the chart, shortest first.
pub const SMA_WINDOWS: [usize; 3] = [SHORT_WINDOW, MEDIUM_WINDOW, LONG_WINDOW];

/// Fewest bars for which every average has a value at the final position.
pub const MIN_BARS: usize = LONG_WINDOW;

/// Compare the latest short/medium/long averages.
pub fn classify(short: f64, medium: f64, long: f64) -> DirectionLabel {
    if short > medium && medium > long {
        DirectionLabel::BuyLong
    } else if short < medium && medium < long {
        DirectionLabel::ShortMarket
    } else {
        DirectionLabel::Sideways
    }
}

/// Classify the trend of `series` at its final bar.
pub fn determine_market_direction(series: &PriceSeries) -> Result<MarketDirection, AnalysisError> {
    let insufficient = || AnalysisError::InsufficientData {
        required: MIN_BARS,
        actual: series.len(),
    };

    let as_of = series.last_date().ok_or_else(insufficient)?;
    let sma_short = sma_series(series, SHORT_WINDOW)?.last().ok_or_else(insufficient)?;
    let sma_medium = sma_series(series, MEDIUM_WINDOW)?.last().ok_or_else(insufficient)?;
    let sma_long = sma_series(series, LONG_WINDOW)?.last().ok_or_else(insufficient)?;

    let label = classify(sma_short, sma_medium, sma_long);
    debug!(
        symbol = series.symbol(),
        sma_short,
        sma_medium,
        sma_long,
        label = %label,
        "Classified market direction"
    );

    Ok(MarketDirection {
        symbol: series.symbol().to_string(),
        label,
        as_of,
        sma_short,
        sma_medium,
        sma_long,
    })
}
