use std::io;

/// Errors raised by the compensation procedure
#[derive(Debug, thiserror::Error)]
pub enum CompensationError {
    /// I/O error while persisting the compensation marker
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error on the compensation marker
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The data already carries the compensated flag
    #[error("Data has already been compensated; refusing to apply the correction twice")]
    AlreadyCompensated,

    /// Reference concentration for normalization is absent
    #[error("Reference concentration {0} for compensation not found in data")]
    MissingReference(f64),

    /// A compensated run integrates to zero and cannot be rescaled
    #[error("Compensated signal of {concentration}, run {run} integrates to zero")]
    ZeroSignalArea {
        /// Concentration label
        concentration: String,
        /// 1-based run number
        run: usize,
    },

    /// The profile holds no samples
    #[error("Simulated profile is empty")]
    EmptyProfile,

    /// Profile columns differ in length
    #[error("Simulated profile length mismatch: {time_len} times vs {signal_len} signals")]
    ProfileLengthMismatch {
        /// Number of time values
        time_len: usize,
        /// Number of signal values
        signal_len: usize,
    },

    /// Profile time axis is not strictly increasing or holds non-finite values
    #[error("Simulated profile time axis invalid at index {0}")]
    InvalidProfileTime(usize),

    /// Profile signal holds a non-finite value
    #[error("Simulated profile signal is not finite at index {0}")]
    NonFiniteProfileSignal(usize),

    /// Profile has no positive signal to normalize against
    #[error("Simulated profile has no positive signal")]
    ZeroProfile,
}
