//! SMA (Simple Moving Average) indicator

use crate::error::AnalysisError;
use crate::models::{MovingAverage, PriceSeries};

/// Rolling simple moving average over `closes`.
///
/// Each value is the mean of its own trailing window, summed afresh, so two
/// identical windows always produce the same value.
pub fn rolling_sma(closes: &[f64], period: usize) -> Result<MovingAverage, AnalysisError> {
    if period == 0 {
        return Err(AnalysisError::InvalidWindow);
    }

    let warmup = (period - 1).min(closes.len());
    let mut values = vec![None; warmup];
    values.extend(
        closes
            .windows(period)
            .map(|window| Some(window.iter().sum::<f64>() / period as f64)),
    );

    Ok(MovingAverage { period, values })
}

/// SMA over the closing prices of a series.
pub fn sma_series(series: &PriceSeries, period: usize) -> Result<MovingAverage, AnalysisError> {
    rolling_sma(&series.closes(), period)
}

/// One overlay per requested period, in the order given.
pub fn sma_overlays(
    series: &PriceSeries,
    periods: &[usize],
) -> Result<Vec<MovingAverage>, AnalysisError> {
    let closes = series.closes();
    periods
        .iter()
        .map(|&period| rolling_sma(&closes, period))
        .collect()
}
