//! Unit tests for the market direction classifier

use chrono::{Duration, NaiveDate};
use disha::error::AnalysisError;
use disha::models::{Candle, DirectionLabel, PriceSeries};
use disha::signals::direction::{
    classify, determine_market_direction, LONG_WINDOW, MEDIUM_WINDOW, MIN_BARS, SHORT_WINDOW,
};

fn create_test_series(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                start + Duration::days(i as i64),
                close - 0.5,
                close + 2.0,
                close - 2.0,
                close,
                1000.0,
            )
        })
        .collect();
    PriceSeries::new("^NSEI", candles).unwrap()
}

#[test]
fn test_windows() {
    assert_eq!((SHORT_WINDOW, MEDIUM_WINDOW, LONG_WINDOW), (9, 15, 20));
    assert_eq!(MIN_BARS, 20);
}

#[test]
fn test_reference_scenario() {
    let closes: Vec<f64> = (100..120).map(f64::from).collect();
    let direction = determine_market_direction(&create_test_series(&closes)).unwrap();

    assert_eq!(direction.label, DirectionLabel::BuyLong);
    assert_eq!(direction.sma_short, 115.0);
    assert_eq!(direction.sma_medium, 112.0);
    assert_eq!(direction.sma_long, 109.5);
    assert_eq!(direction.symbol, "^NSEI");
    assert_eq!(direction.as_of, NaiveDate::from_ymd_opt(2021, 1, 20).unwrap());
}

#[test]
fn test_increasing_series_is_buy_long() {
    for len in [20, 21, 50, 250] {
        let closes: Vec<f64> = (0..len).map(|i| 17_500.0 + i as f64 * 12.5).collect();
        let direction = determine_market_direction(&create_test_series(&closes)).unwrap();
        assert_eq!(direction.label, DirectionLabel::BuyLong, "len {}", len);
    }
}

#[test]
fn test_decreasing_series_is_short_market() {
    for len in [20, 35, 120] {
        let closes: Vec<f64> = (0..len).map(|i| 44_000.0 - i as f64 * 40.0).collect();
        let direction = determine_market_direction(&create_test_series(&closes)).unwrap();
        assert_eq!(direction.label, DirectionLabel::ShortMarket, "len {}", len);
    }
}

#[test]
fn test_flat_series_is_sideways() {
    let closes = vec![100.0; 30];
    let direction = determine_market_direction(&create_test_series(&closes)).unwrap();
    assert_eq!(direction.label, DirectionLabel::Sideways);
    assert_eq!(direction.sma_short, direction.sma_long);
}

#[test]
fn test_reversal_is_sideways() {
    // Long rally followed by a sharp short drop: short SMA falls below the
    // medium one while the medium still sits above the long one.
    let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    closes.extend([130.0, 125.0, 120.0, 118.0, 116.0]);
    let direction = determine_market_direction(&create_test_series(&closes)).unwrap();
    assert!(direction.sma_short < direction.sma_medium);
    assert!(direction.sma_medium > direction.sma_long);
    assert_eq!(direction.label, DirectionLabel::Sideways);
}

#[test]
fn test_exactly_twenty_bars_is_defined() {
    let closes: Vec<f64> = (0..20).map(|i| 50.0 + (i % 3) as f64).collect();
    assert!(determine_market_direction(&create_test_series(&closes)).is_ok());
}

#[test]
fn test_nineteen_bars_is_insufficient() {
    let closes: Vec<f64> = (0..19).map(f64::from).collect();
    let err = determine_market_direction(&create_test_series(&closes)).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InsufficientData {
            required: 20,
            actual: 19
        }
    );
}

#[test]
fn test_empty_series_is_insufficient() {
    let err = determine_market_direction(&create_test_series(&[])).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData { actual: 0, .. }
    ));
}

#[test]
fn test_any_long_series_yields_a_label() {
    // Deterministic pseudo-random walk
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut price = 1_000.0;
    let mut closes = Vec::new();
    for _ in 0..300 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        price += (state % 21) as f64 - 10.0;
        closes.push(price);
    }

    for len in 20..=closes.len() {
        let series = create_test_series(&closes[..len]);
        assert!(determine_market_direction(&series).is_ok(), "len {}", len);
    }
}

#[test]
fn test_classify_requires_strict_ordering() {
    assert_eq!(classify(3.0, 2.0, 1.0), DirectionLabel::BuyLong);
    assert_eq!(classify(1.0, 2.0, 3.0), DirectionLabel::ShortMarket);
    assert_eq!(classify(2.0, 2.0, 1.0), DirectionLabel::Sideways);
    assert_eq!(classify(3.0, 2.0, 2.0), DirectionLabel::Sideways);
    assert_eq!(classify(1.0, 1.0, 1.0), DirectionLabel::Sideways);
    assert_eq!(classify(3.0, 1.0, 2.0), DirectionLabel::Sideways);
}

#[test]
fn test_label_display() {
    assert_eq!(DirectionLabel::BuyLong.to_string(), "Buy long");
    assert_eq!(DirectionLabel::ShortMarket.to_string(), "Short the market");
    assert_eq!(DirectionLabel::Sideways.to_string(), "Sideways market");
}
