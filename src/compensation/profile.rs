use serde::{Deserialize, Serialize};

use super::spline::CubicSpline;
use super::CompensationError;

/// Simulated detector response used as the correction weight.
///
/// Signals are normalized so the profile peaks at exactly 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedProfile {
    times: Vec<f64>,
    signals: Vec<f64>,
}

impl SimulatedProfile {
    /// Validate and normalize a profile
    pub fn new(times: Vec<f64>, signals: Vec<f64>) -> Result<Self, CompensationError> {
        if times.len() != signals.len() {
            return Err(CompensationError::ProfileLengthMismatch {
                time_len: times.len(),
                signal_len: signals.len(),
            });
        }
        if times.is_empty() {
            return Err(CompensationError::EmptyProfile);
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(CompensationError::InvalidProfileTime(index));
        }
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CompensationError::InvalidProfileTime(index + 1));
        }
        if let Some(index) = signals.iter().position(|s| !s.is_finite()) {
            return Err(CompensationError::NonFiniteProfileSignal(index));
        }

        let max = signals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= 0.0 {
            return Err(CompensationError::ZeroProfile);
        }

        let signals = signals.into_iter().map(|s| s / max).collect();
        Ok(Self { times, signals })
    }

    /// Profile time axis in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Normalized signal (max 1.0)
    pub fn signals(&self) -> &[f64] {
        &self.signals
    }

    /// Number of profile samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a validated profile
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Continuous interpolant over the profile's own time domain
    pub fn interpolant(&self) -> CubicSpline {
        CubicSpline::natural(&self.times, &self.signals)
    }
}
