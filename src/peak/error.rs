use crate::experiment::ConfigurationError;

/// Errors raised while resolving peak times
#[derive(Debug, thiserror::Error)]
pub enum PeakError {
    /// Inconsistent peak specification
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Reference concentration for programmatic detection is absent
    #[error("Reference concentration {0} for programmatic peak determination not found in data")]
    MissingReference(f64),

    /// The reference run has no sample at or after the injection time
    #[error("Run 1 of {concentration} has no samples after the injection time ({injection_time} s)")]
    NoSamplesAfterInjection {
        /// Concentration label
        concentration: String,
        /// Injection time
        injection_time: f64,
    },
}
