use serde::Serialize;

use crate::models::candle::Candle;
use crate::models::indicators::MovingAverage;

/// Everything an external charting surface needs to draw a candlestick chart
/// with moving average overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub symbol: String,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub candles: Vec<Candle>,
    pub overlays: Vec<MovingAverage>,
}
