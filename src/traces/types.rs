use std::fmt;

use serde::{Deserialize, Serialize};

use super::TraceError;

/// Default concentration unit used when a label carries none
pub const DEFAULT_UNIT: &str = "µM";

/// Relative tolerance used when matching concentration values
const CONCENTRATION_RTOL: f64 = 1e-9;

/// A titrant (protein) concentration with its unit label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    /// Numeric concentration value
    pub value: f64,
    /// Unit label (e.g. "µM", "nM")
    pub unit: String,
}

impl Concentration {
    /// Create a concentration with an explicit unit
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Create a concentration in the default unit (µM)
    pub fn micromolar(value: f64) -> Self {
        Self::new(value, DEFAULT_UNIT)
    }

    /// Parse a label of the form `"<value> <unit>"`, e.g. `"0.1 µM"`.
    ///
    /// A bare number is accepted and gets the default unit. `uM` is
    /// normalized to `µM`.
    pub fn parse(label: &str) -> Result<Self, TraceError> {
        let label = label.trim();
        let (number, unit) = match label.split_once(char::is_whitespace) {
            Some((number, unit)) => (number, unit.trim()),
            None => (label, ""),
        };

        let value: f64 = number
            .parse()
            .map_err(|_| TraceError::InvalidConcentration(label.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(TraceError::InvalidConcentration(label.to_string()));
        }

        let unit = match unit {
            "" => DEFAULT_UNIT.to_string(),
            u if u.starts_with('u') => format!("µ{}", &u[1..]),
            u => u.to_string(),
        };

        Ok(Self { value, unit })
    }

    /// Whether `value` designates this concentration (relative tolerance)
    pub fn matches(&self, value: f64) -> bool {
        let scale = self.value.abs().max(value.abs()).max(f64::MIN_POSITIVE);
        (self.value - value).abs() <= CONCENTRATION_RTOL * scale
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// One detector run: ordered (time, signal) samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    times: Vec<f64>,
    signals: Vec<f64>,
}

impl Trace {
    /// Build a trace, validating that times are finite and strictly increasing
    pub fn new(times: Vec<f64>, signals: Vec<f64>) -> Result<Self, TraceError> {
        if times.len() != signals.len() {
            return Err(TraceError::ArrayLengthMismatch {
                time_len: times.len(),
                signal_len: signals.len(),
            });
        }
        if times.is_empty() {
            return Err(TraceError::EmptyTrace);
        }

        for (index, (t, s)) in times.iter().zip(signals.iter()).enumerate() {
            if !t.is_finite() || !s.is_finite() {
                return Err(TraceError::NonFiniteValue { index });
            }
        }

        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TraceError::NonIncreasingTime {
                index: index + 1,
                previous: times[index],
                current: times[index + 1],
            });
        }

        Ok(Self { times, signals })
    }

    /// Sample times in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Detector signal values
    pub fn signals(&self) -> &[f64] {
        &self.signals
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a validated trace
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterate over (time, signal) pairs
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.signals.iter().copied())
    }

    /// Largest signal value
    pub fn max_signal(&self) -> f64 {
        self.signals.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Samples recorded before the injection time (background region)
    pub fn background(&self, injection_time: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples().filter(move |(t, _)| *t < injection_time)
    }

    /// Samples at or after injection with time converted to propagation time
    pub fn propagation(&self, injection_time: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples()
            .filter(move |(t, _)| *t >= injection_time)
            .map(move |(t, s)| (t - injection_time, s))
    }

    /// Replace the signal values, keeping the time axis
    pub(crate) fn with_signals(&self, signals: Vec<f64>) -> Self {
        debug_assert_eq!(signals.len(), self.times.len());
        Self {
            times: self.times.clone(),
            signals,
        }
    }
}

/// All experimental runs recorded at one concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationSeries {
    concentration: Concentration,
    runs: Vec<Trace>,
}

impl ConcentrationSeries {
    /// Create a series; at least one run is required
    pub fn new(concentration: Concentration, runs: Vec<Trace>) -> Result<Self, TraceError> {
        if runs.is_empty() {
            return Err(TraceError::NoRuns(concentration.to_string()));
        }
        Ok(Self {
            concentration,
            runs,
        })
    }

    /// Concentration of this series
    pub fn concentration(&self) -> &Concentration {
        &self.concentration
    }

    /// Runs in experiment order
    pub fn runs(&self) -> &[Trace] {
        &self.runs
    }

    /// First run, used for programmatic peak detection and overview plots
    pub fn first_run(&self) -> &Trace {
        &self.runs[0]
    }

    /// Number of runs
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Same concentration with replaced runs
    pub(crate) fn with_runs(&self, runs: Vec<Trace>) -> Self {
        Self {
            concentration: self.concentration.clone(),
            runs,
        }
    }
}
