//! Shared data models spanning the engine layers.

pub mod candle;
pub mod chart;
pub mod indicators;
pub mod series;
pub mod signal;

pub use candle::Candle;
pub use chart::ChartPayload;
pub use indicators::MovingAverage;
pub use series::PriceSeries;
pub use signal::{DirectionLabel, MarketDirection};
