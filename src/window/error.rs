/// Errors raised while reducing peak windows
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// No sample falls inside the window
    #[error("No samples in window [{low:.3}, {high:.3}] s")]
    EmptyWindow {
        /// Lower bound (propagation seconds)
        low: f64,
        /// Upper bound (propagation seconds)
        high: f64,
    },

    /// Zero-width window without a sample close enough to the peak time
    #[error("No matching time found for peak time {peak_time:.3} s")]
    NoExactSample {
        /// Requested propagation time
        peak_time: f64,
        /// Nearest propagation time present in the run
        nearest: Option<f64>,
    },

    /// Window width outside [0, 1]
    #[error("Window width {0} must be a fraction between 0 and 1")]
    InvalidWidth(f64),

    /// The peak model has no entry for a concentration
    #[error("No peak time resolved for {0}")]
    MissingPeak(String),

    /// Failure located in one run of one concentration
    #[error("{concentration}, run {run}: {source}")]
    InRun {
        /// Concentration label
        concentration: String,
        /// 1-based run number
        run: usize,
        /// Underlying failure
        #[source]
        source: Box<WindowError>,
    },
}

impl WindowError {
    /// Innermost error, skipping run context
    pub fn root(&self) -> &WindowError {
        match self {
            WindowError::InRun { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn in_run(self, concentration: impl ToString, run: usize) -> Self {
        WindowError::InRun {
            concentration: concentration.to_string(),
            run,
            source: Box::new(self),
        }
    }
}
