//! Peak onset diagnostics.
//!
//! The onset is the first post-injection sample whose signal rises above the
//! background mean by more than `factor` background standard deviations.
//! It is reported alongside the summaries and never feeds the averaging.

use crate::traces::Trace;
use crate::window::stats;

/// Default number of background standard deviations defining the onset
pub const DEFAULT_ONSET_FACTOR: f64 = 5.0;

/// Background statistics of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    /// Mean signal before injection
    pub mean: f64,
    /// Sample standard deviation before injection (0 with fewer than 2 samples)
    pub stdev: f64,
    /// Number of background samples
    pub samples: usize,
}

/// Background statistics, `None` when no sample precedes the injection
pub fn background(trace: &Trace, injection_time: f64) -> Option<Background> {
    let values: Vec<f64> = trace.background(injection_time).map(|(_, s)| s).collect();
    if values.is_empty() {
        return None;
    }
    Some(Background {
        mean: stats::mean(&values),
        stdev: stats::sample_stdev(&values),
        samples: values.len(),
    })
}

/// Raw time at which the signal first exceeds `mean + factor * stdev`
pub fn detect_onset(trace: &Trace, injection_time: f64, factor: f64) -> Option<f64> {
    let bg = background(trace, injection_time)?;
    let boundary = bg.mean + factor * bg.stdev;
    trace
        .samples()
        .filter(|(t, _)| *t >= injection_time)
        .find(|(_, s)| *s > boundary)
        .map(|(t, _)| t)
}
