/// Errors raised while building or loading trace data
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// I/O error reading or writing a trace table
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Compensation marker could not be read
    #[error("Compensation marker error: {0}")]
    Compensation(#[from] crate::compensation::CompensationError),

    /// A trace must contain at least one sample
    #[error("Trace contains no samples")]
    EmptyTrace,

    /// Time and signal arrays differ in length
    #[error("Array length mismatch: time array has {time_len} elements, signal array has {signal_len} elements")]
    ArrayLengthMismatch {
        /// Number of time values
        time_len: usize,
        /// Number of signal values
        signal_len: usize,
    },

    /// Time values must be strictly increasing
    #[error("Time is not strictly increasing at sample {index} ({previous} s followed by {current} s)")]
    NonIncreasingTime {
        /// Index of the offending sample
        index: usize,
        /// Time of the preceding sample
        previous: f64,
        /// Time of the offending sample
        current: f64,
    },

    /// NaN or infinite value in a trace
    #[error("Non-finite value at sample {index}")]
    NonFiniteValue {
        /// Index of the offending sample
        index: usize,
    },

    /// A concentration series has no runs attached
    #[error("Concentration {0} has no experimental runs")]
    NoRuns(String),

    /// The same concentration appears twice in a store
    #[error("Duplicate concentration: {0}")]
    DuplicateConcentration(String),

    /// Concentration label could not be parsed (expected e.g. "0.1 µM")
    #[error("Invalid concentration label: {0}")]
    InvalidConcentration(String),

    /// Table does not follow the `raw time, Experiment N...` layout
    #[error("Invalid trace table: {0}")]
    InvalidTable(String),
}
