//! Signal evaluation interfaces.

pub mod direction;

pub use direction::*;
