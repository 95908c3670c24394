use serde::{Deserialize, Serialize};

/// Simple moving average aligned position-for-position with its series.
///
/// The first `period - 1` entries are `None`: their trailing window is not
/// yet full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    pub period: usize,
    pub values: Vec<Option<f64>>,
}

impl MovingAverage {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the final position, `None` if the series is shorter than the period.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Legend label used for chart overlays, e.g. `SMA 9`.
    pub fn name(&self) -> String {
        format!("SMA {}", self.period)
    }
}
