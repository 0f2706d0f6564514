use std::io;
use std::path::PathBuf;

/// Errors raised while producing or reading reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Summary table does not follow the expected layout
    #[error("Invalid summary table: {0}")]
    InvalidTable(String),

    /// Every candidate output directory already exists
    #[error("No free output directory left for {} (tried up to _{})", .0.display(), super::output_dir::MAX_SUFFIX)]
    OutputDirsExhausted(PathBuf),
}
