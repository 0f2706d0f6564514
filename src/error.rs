//! Crate-wide error type of the analysis pipeline.

use crate::compensation::CompensationError;
use crate::experiment::ConfigurationError;
use crate::fitting::FitError;
use crate::peak::PeakError;
use crate::ratio::RatioError;
use crate::report::ReportError;
use crate::traces::TraceError;
use crate::window::WindowError;

/// Any failure of the analysis, stage by stage
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Trace data could not be loaded or is malformed
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Inconsistent or invalid analysis parameters
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Peak time could not be resolved
    #[error("Peak error: {0}")]
    Peak(#[from] PeakError),

    /// Window reduction failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Compensation failed
    #[error("Compensation error: {0}")]
    Compensation(#[from] CompensationError),

    /// R-transform failed
    #[error("R-transform error: {0}")]
    Ratio(#[from] RatioError),

    /// Curve fit failed
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    /// Output could not be produced
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
