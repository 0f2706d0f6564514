use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CompensationError;

/// File name of the marker written next to compensated tables
pub const COMPENSATION_MARKER: &str = "compensation.json";

/// Persisted record that a data set has been compensated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationRecord {
    /// When the correction was applied
    pub compensated_at: DateTime<Utc>,
    /// [P]0 whose first run defined the reference area
    pub reference_concentration: f64,
    /// Injection time used for background subtraction
    pub injection_time: f64,
    /// Integrated compensated signal of the reference run
    pub reference_area: f64,
    /// Number of samples in the simulated profile
    pub profile_points: usize,
}

impl CompensationRecord {
    /// Write the marker into `dir`
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, CompensationError> {
        let path = dir.join(COMPENSATION_MARKER);
        serde_json::to_writer_pretty(File::create(&path)?, self)?;
        Ok(path)
    }

    /// Read the marker from `dir`, `None` when absent
    pub fn read_from_dir(dir: &Path) -> Result<Option<Self>, CompensationError> {
        let path = dir.join(COMPENSATION_MARKER);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_reader(File::open(path)?)?))
    }
}
