//! Plain-text rendering of dashboard views for the terminal.

use std::fmt::{self, Write};

use crate::core::dashboard::{Dashboard, IndexKey, ViewOption};
use crate::models::Candle;

/// Bars shown at the end of a chart view.
pub const CHART_TAIL_ROWS: usize = 10;

/// Full report for `view`: the selected view followed by the market
/// direction section.
pub fn render_report(dashboard: &Dashboard, view: ViewOption) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, dashboard, view)?;
    Ok(out)
}

pub fn render_chart_view(
    dashboard: &Dashboard,
    key: IndexKey,
    rows: usize,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_chart_view(&mut out, dashboard, key, rows)?;
    Ok(out)
}

pub fn render_table_view(dashboard: &Dashboard) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_table_view(&mut out, dashboard)?;
    Ok(out)
}

pub fn write_report<W: Write>(out: &mut W, dashboard: &Dashboard, view: ViewOption) -> fmt::Result {
    writeln!(out, "{}", dashboard.fetch_message())?;
    writeln!(out)?;

    match view.index() {
        Some(key) => write_chart_view(out, dashboard, key, CHART_TAIL_ROWS)?,
        None => write_table_view(out, dashboard)?,
    }

    if dashboard.has_any_data() {
        writeln!(out)?;
        write_market_direction(out, dashboard, view)?;
    }
    Ok(())
}

/// Title plus the last `rows` bars with their SMA overlay values.
pub fn write_chart_view<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
    key: IndexKey,
    rows: usize,
) -> fmt::Result {
    let chart = match dashboard.chart(key) {
        Ok(chart) => chart,
        Err(e) => return writeln!(out, "{}", e),
    };

    writeln!(out, "{}", chart.title)?;
    write!(out, "{:<12}{:>12}", chart.x_axis_title, chart.y_axis_title)?;
    for overlay in &chart.overlays {
        write!(out, "{:>12}", overlay.name())?;
    }
    writeln!(out)?;

    let start = chart.candles.len().saturating_sub(rows);
    for (i, candle) in chart.candles.iter().enumerate().skip(start) {
        write!(out, "{:<12}{:>12.2}", candle.date, candle.close)?;
        for overlay in &chart.overlays {
            match overlay.get(i) {
                Some(value) => write!(out, "{:>12.2}", value)?,
                None => write!(out, "{:>12}", "-")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Every loaded index as an OHLCV table.
pub fn write_table_view<W: Write>(out: &mut W, dashboard: &Dashboard) -> fmt::Result {
    for key in IndexKey::ALL {
        if let Ok(candles) = dashboard.table(key) {
            writeln!(out, "{} Data", key.name())?;
            write_candles(out, candles)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// One row per bar; the last column marks whether the bar closed at or
/// above its open.
pub fn write_candles<W: Write>(out: &mut W, candles: &[Candle]) -> fmt::Result {
    writeln!(
        out,
        "{:<12}{:>12}{:>12}{:>12}{:>12}{:>14}{:>6}",
        "Date", "Open", "High", "Low", "Close", "Volume", "Bar"
    )?;
    for c in candles {
        let bar = if c.is_increasing() { "up" } else { "down" };
        writeln!(
            out,
            "{:<12}{:>12.2}{:>12.2}{:>12.2}{:>12.2}{:>14.0}{:>6}",
            c.date, c.open, c.high, c.low, c.close, c.volume, bar
        )?;
    }
    Ok(())
}

/// Direction of the charted index, or of every loaded index for the table view.
///
/// The original dashboard printed only the section header in the table view;
/// here the table view lists a line for each loaded index instead.
pub fn write_market_direction<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
    view: ViewOption,
) -> fmt::Result {
    writeln!(out, "Market Direction")?;
    writeln!(out, "----------------")?;

    for report in dashboard.market_directions() {
        if view.index().is_some_and(|key| key != report.index) {
            continue;
        }
        match (report.label, &report.error) {
            (Some(label), _) => writeln!(out, "{}: {}", report.name, label)?,
            (None, Some(error)) => writeln!(out, "{}: {}", report.name, error)?,
            (None, None) => {}
        }
    }
    Ok(())
}
