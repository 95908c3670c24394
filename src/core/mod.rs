//! Core application primitives: dashboard state and its HTTP and text surfaces.

pub mod dashboard;
pub mod http;
pub mod report;

pub use dashboard::*;
pub use http::*;
pub use report::*;
