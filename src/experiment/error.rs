/// Malformed or inconsistent experiment parameters.
///
/// Always raised before any computation proceeds.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// I/O error reading an inputs file
    #[error("Failed to read inputs file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse inputs: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize inputs: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// A required field is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A numeric field holds something that is not a number
    #[error("Field '{field}' must be numeric, found '{value}'")]
    NonNumeric {
        /// Field name
        field: String,
        /// Offending text
        value: String,
    },

    /// A numeric field is outside its admissible range
    #[error("Field '{field}' = {value} is out of range ({expected})")]
    OutOfRange {
        /// Field name
        field: String,
        /// Offending value
        value: f64,
        /// Human-readable admissible range
        expected: String,
    },

    /// Enumerated field holds an unknown code
    #[error("Field '{field}' has unknown value '{value}' (expected one of {expected})")]
    UnknownVariant {
        /// Field name
        field: String,
        /// Offending text
        value: String,
        /// Accepted codes
        expected: String,
    },

    /// Manual peak list does not have one entry per concentration
    #[error("Expected {expected} manual peak times (one per concentration), found {found}")]
    PeakCountMismatch {
        /// Number of concentrations
        expected: usize,
        /// Number of peak times supplied
        found: usize,
    },

    /// Manual peak time earlier than the injection time
    #[error("Manual peak time #{position} ({time} s) is earlier than the injection time ({injection_time} s)")]
    PeakBeforeInjection {
        /// One-based position in the manual list
        position: usize,
        /// Offending peak time
        time: f64,
        /// Injection time
        injection_time: f64,
    },

    /// Declared number of concentrations disagrees with the data
    #[error("Inputs declare {declared} concentrations but the data contain {found}")]
    ConcentrationCountMismatch {
        /// Count from the inputs
        declared: usize,
        /// Count found in the data
        found: usize,
    },

    /// Compensation requested without a simulated reference profile
    #[error("Compensation procedure requested but no simulated profile was supplied")]
    MissingSimulatedProfile,

    /// The trace store holds no concentration
    #[error("Experiment contains no concentrations")]
    NoConcentrations,
}
