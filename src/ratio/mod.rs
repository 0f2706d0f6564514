//! # R-Transform
//!
//! Maps each concentration's mean signal S onto the binding ratio
//! `R = (S - S_high) / (S_low - S_high)`, with first-order propagation of
//! the standard deviations of S, S_low and S_high.

mod error;
mod transform;


pub use error::RatioError;
pub use transform::{compute_r, fit_input, RPoint};
