//! Unit tests for chart response decoding

use chrono::NaiveDate;
use disha::error::MarketDataError;
use disha::services::yahoo::messages::{ChartEnvelope, ChartResult};
use disha::services::yahoo::provider::candles_from_chart;
use serde_json::json;

fn first_result(value: serde_json::Value) -> ChartResult {
    let envelope: ChartEnvelope = serde_json::from_value(value).unwrap();
    envelope.chart.result.unwrap().into_iter().next().unwrap()
}

// 2023-08-21, 2023-08-22 and 2023-08-23 at 09:15 IST (03:45 UTC)
const T1: i64 = 1_692_589_500;
const T2: i64 = 1_692_675_900;
const T3: i64 = 1_692_762_300;

#[test]
fn test_decodes_columns_into_local_dates() {
    let result = first_result(json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "^NSEI", "gmtoffset": 19800, "currency": "INR" },
                "timestamp": [T1, T2],
                "indicators": { "quote": [{
                    "open": [19_400.0, 19_450.5],
                    "high": [19_500.0, 19_520.0],
                    "low": [19_350.0, 19_410.0],
                    "close": [19_393.6, 19_396.45],
                    "volume": [250_300, null]
                }]}
            }],
            "error": null
        }
    }));

    let candles = candles_from_chart(result).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].date, NaiveDate::from_ymd_opt(2023, 8, 21).unwrap());
    assert_eq!(candles[0].open, 19_400.0);
    assert_eq!(candles[0].close, 19_393.6);
    assert_eq!(candles[0].volume, 250_300.0);
    assert_eq!(candles[1].date, NaiveDate::from_ymd_opt(2023, 8, 22).unwrap());
    assert_eq!(candles[1].volume, 0.0);
}

#[test]
fn test_gmtoffset_moves_late_utc_bar_to_next_local_day() {
    // 2023-08-21 20:00 UTC is 2023-08-22 01:30 IST
    let result = first_result(json!({
        "chart": { "result": [{
            "meta": { "gmtoffset": 19800 },
            "timestamp": [1_692_648_000],
            "indicators": { "quote": [{
                "open": [1.0], "high": [1.0], "low": [1.0], "close": [1.0], "volume": [0]
            }]}
        }]}
    }));

    let candles = candles_from_chart(result).unwrap();
    assert_eq!(candles[0].date, NaiveDate::from_ymd_opt(2023, 8, 22).unwrap());
}

#[test]
fn test_skips_rows_with_missing_prices() {
    let result = first_result(json!({
        "chart": { "result": [{
            "meta": { "gmtoffset": 19800 },
            "timestamp": [T1, T2, T3],
            "indicators": { "quote": [{
                "open": [1.0, null, 3.0],
                "high": [1.0, null, 3.0],
                "low": [1.0, null, 3.0],
                "close": [1.0, null, 3.0],
                "volume": [0, 0, 0]
            }]}
        }]}
    }));

    let candles = candles_from_chart(result).unwrap();
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    assert_eq!(closes, vec![1.0, 3.0]);
}

#[test]
fn test_later_row_wins_on_same_date() {
    let result = first_result(json!({
        "chart": { "result": [{
            "meta": { "gmtoffset": 19800 },
            "timestamp": [T1, T2, T2 + 3600],
            "indicators": { "quote": [{
                "open": [1.0, 2.0, 2.0],
                "high": [1.0, 2.0, 2.5],
                "low": [1.0, 2.0, 1.5],
                "close": [1.0, 2.0, 2.2],
                "volume": [0, 0, 0]
            }]}
        }]}
    }));

    let candles = candles_from_chart(result).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[1].close, 2.2);
}

#[test]
fn test_missing_quote_block_yields_no_candles() {
    let result = first_result(json!({
        "chart": { "result": [{
            "meta": { "gmtoffset": 0 },
            "timestamp": [T1],
            "indicators": { "quote": [] }
        }]}
    }));

    assert!(candles_from_chart(result).unwrap().is_empty());
}

#[test]
fn test_error_envelope_decodes() {
    let envelope: ChartEnvelope = serde_json::from_value(json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    }))
    .unwrap();

    assert!(envelope.chart.result.is_none());
    let error = envelope.chart.error.unwrap();
    assert_eq!(error.code, "Not Found");
}

#[test]
fn test_timestamp_near_limit_is_malformed() {
    let result = first_result(json!({
        "chart": { "result": [{
            "meta": { "gmtoffset": 19800 },
            "timestamp": [i64::MAX],
            "indicators": { "quote": [{
                "open": [1.0], "high": [1.0], "low": [1.0], "close": [1.0], "volume": [0]
            }]}
        }]}
    }));

    let err = candles_from_chart(result).unwrap_err();
    assert!(matches!(err, MarketDataError::Malformed(_)));
}

#[test]
fn test_timestamp_beyond_calendar_is_malformed() {
    let result = first_result(json!({
        "chart": { "result": [{
            "meta": { "gmtoffset": 0 },
            "timestamp": [i64::MAX / 2],
            "indicators": { "quote": [{
                "open": [1.0], "high": [1.0], "low": [1.0], "close": [1.0], "volume": [0]
            }]}
        }]}
    }));

    assert!(matches!(
        candles_from_chart(result),
        Err(MarketDataError::Malformed(_))
    ));
}
