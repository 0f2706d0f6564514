use log::debug;

use super::WindowError;
use crate::traces::Trace;

/// Largest distance (seconds) accepted as an exact match for a zero-width window
pub const EXACT_MATCH_TOLERANCE: f64 = 0.5;

/// Inclusive window bounds in propagation seconds
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowBounds {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl WindowBounds {
    /// `[peak (1 - w), peak (1 + w)]`
    pub fn around(peak_time: f64, width: f64) -> Self {
        Self {
            low: peak_time * (1.0 - width),
            high: peak_time * (1.0 + width),
        }
    }

    /// Whether `t` lies inside the bounds
    pub fn contains(&self, t: f64) -> bool {
        self.low <= t && t <= self.high
    }
}

/// Window average of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAverage {
    /// Mean signal inside the window
    pub value: f64,
    /// Number of averaged samples
    pub samples: usize,
}

/// Average the signal of `run` inside the peak window.
///
/// Times are propagation times (seconds since `injection_time`). With a
/// positive `width` every sample in `[peak (1 - w), peak (1 + w)]` is
/// averaged; with `width == 0` the sample nearest `peak_time` is used if it
/// lies within [`EXACT_MATCH_TOLERANCE`].
pub fn reduce_window(
    run: &Trace,
    peak_time: f64,
    width: f64,
    injection_time: f64,
) -> Result<WindowAverage, WindowError> {
    if !(0.0..=1.0).contains(&width) {
        return Err(WindowError::InvalidWidth(width));
    }

    if width == 0.0 {
        let nearest = run
            .propagation(injection_time)
            .fold(None::<(f64, f64)>, |best, (t, s)| match best {
                Some((bt, _)) if (bt - peak_time).abs() <= (t - peak_time).abs() => best,
                _ => Some((t, s)),
            });
        return match nearest {
            Some((t, s)) if (t - peak_time).abs() < EXACT_MATCH_TOLERANCE => Ok(WindowAverage {
                value: s,
                samples: 1,
            }),
            other => Err(WindowError::NoExactSample {
                peak_time,
                nearest: other.map(|(t, _)| t),
            }),
        };
    }

    let bounds = WindowBounds::around(peak_time, width);
    let selected = window_samples(run, peak_time, width, injection_time);
    let count = selected.len();
    let sum: f64 = selected.iter().map(|(_, s)| s).sum();

    if count == 0 {
        return Err(WindowError::EmptyWindow {
            low: bounds.low,
            high: bounds.high,
        });
    }

    debug!(
        "Window [{:.3}, {:.3}] s: {} samples",
        bounds.low, bounds.high, count
    );
    Ok(WindowAverage {
        value: sum / count as f64,
        samples: count,
    })
}

/// Propagation-time samples of `run` selected by the window
pub fn window_samples(
    run: &Trace,
    peak_time: f64,
    width: f64,
    injection_time: f64,
) -> Vec<(f64, f64)> {
    let bounds = WindowBounds::around(peak_time, width);
    run.propagation(injection_time)
        .filter(|(t, _)| bounds.contains(*t))
        .collect()
}
