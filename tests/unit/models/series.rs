//! Unit tests for price series validation

use chrono::NaiveDate;
use disha::error::AnalysisError;
use disha::models::{Candle, PriceSeries};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, d).unwrap()
}

fn candle(d: u32, close: f64) -> Candle {
    Candle::new(day(d), close, close, close, close, 0.0)
}

#[test]
fn test_accepts_increasing_dates_with_gaps() {
    let series = PriceSeries::new("^NSEBANK", vec![candle(1, 1.0), candle(2, 2.0), candle(6, 3.0)])
        .unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.symbol(), "^NSEBANK");
    assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    assert_eq!(series.first_date(), Some(day(1)));
    assert_eq!(series.last_date(), Some(day(6)));
}

#[test]
fn test_accepts_empty_series() {
    let series = PriceSeries::new("^NSEI", Vec::new()).unwrap();
    assert!(series.is_empty());
    assert!(series.last().is_none());
}

#[test]
fn test_rejects_duplicate_dates() {
    let err = PriceSeries::new("X", vec![candle(1, 1.0), candle(1, 2.0)]).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::NonChronological {
            index: 1,
            previous: day(1),
            current: day(1),
        }
    );
}

#[test]
fn test_rejects_out_of_order_dates() {
    let err = PriceSeries::new("X", vec![candle(1, 1.0), candle(3, 2.0), candle(2, 3.0)])
        .unwrap_err();
    assert!(matches!(err, AnalysisError::NonChronological { index: 2, .. }));
}

#[test]
fn test_rejects_non_finite_close() {
    let err = PriceSeries::new("X", vec![candle(1, 1.0), candle(2, f64::NAN)]).unwrap_err();
    assert_eq!(err, AnalysisError::NonFiniteClose { date: day(2) });
}

#[test]
fn test_candle_direction() {
    let up = Candle::new(day(1), 10.0, 12.0, 9.0, 11.0, 0.0);
    let down = Candle::new(day(2), 11.0, 11.5, 9.0, 9.5, 0.0);
    assert!(up.is_increasing());
    assert!(!down.is_increasing());
}
