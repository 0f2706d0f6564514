//! # Validation
//!
//! Pre-flight checks of an experiment before it is analyzed:
//!
//! 1. **Inputs**: required fields, numeric values, ranges, mode-dependent fields
//! 2. **Data directory**: concentration tables, declared and manual counts
//!    (checked before any trace is parsed), readable traces
//! 3. **Cross checks**: peak and normalization references present, simulated
//!    profile available when compensation is requested
//!
//! ```rust,no_run
//! use actis_kd::experiment::ExperimentInputs;
//! use actis_kd::validator::validate_data_dir;
//! use std::path::Path;
//!
//! let inputs = ExperimentInputs::from_file(Path::new("inputs.toml")).unwrap();
//! let report = validate_data_dir(Path::new("BSA"), &inputs).unwrap();
//! println!("{}", report);
//! ```

use std::path::Path;

pub use report::{CheckStatus, Section, Tally, ValidationCheck, ValidationReport, Verdict};

use crate::experiment::ExperimentInputs;
use crate::traces::TraceError;

mod data;
mod inputs;
mod report;

#[cfg(test)]
mod tests;

/// Errors that prevent validation from running at all
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// I/O error while scanning the data directory
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Trace directory could not be listed
    #[error("Trace error: {0}")]
    TraceError(#[from] TraceError),
}

/// Validate the input file on its own
pub fn validate_inputs(inputs: &ExperimentInputs) -> ValidationReport {
    let mut report = ValidationReport::new("inputs");
    inputs::check_inputs(inputs, &mut report);
    report
}

/// Validate the inputs together with the data directory they describe
pub fn validate_data_dir(
    dir: &Path,
    inputs: &ExperimentInputs,
) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(dir.display().to_string());
    inputs::check_inputs(inputs, &mut report);
    data::check_data_dir(dir, inputs, &mut report)?;
    Ok(report)
}
