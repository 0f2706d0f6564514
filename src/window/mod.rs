//! # Window Reducer
//!
//! Averages each run's signal over a window centred on the peak time and
//! aggregates the per-run averages into a [`SignalSummary`] per
//! concentration. The window half-width is a fraction of the peak time, so
//! later peaks get proportionally wider windows.

mod error;
mod reducer;
pub mod stats;
mod summary;


pub use error::WindowError;
pub use reducer::{
    reduce_window, window_samples, WindowAverage, WindowBounds, EXACT_MATCH_TOLERANCE,
};
pub use summary::{summarize_series, summarize_store, RunWindow, SignalSummary};
