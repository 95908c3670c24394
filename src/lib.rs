//! Disha: index trend dashboard.
//!
//! Fetches daily bars for the Nifty indices, overlays simple moving averages
//! and labels the market direction from the 9/15/20 SMA alignment.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
