//! Output directory naming.

use std::path::{Path, PathBuf};

use super::ReportError;

/// Highest numeric suffix tried after the bare name
pub const MAX_SUFFIX: usize = 8;

/// First of `base`, `base_2`, ..., `base_8` that does not exist yet
pub fn next_available(base: &Path) -> Result<PathBuf, ReportError> {
    if !base.exists() {
        return Ok(base.to_path_buf());
    }
    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    (2..=MAX_SUFFIX)
        .map(|n| base.with_file_name(format!("{}_{}", name, n)))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| ReportError::OutputDirsExhausted(base.to_path_buf()))
}

/// Default results directory for a data directory: `<DATA_DIR>_results`
pub fn results_dir_for(data_dir: &Path) -> PathBuf {
    let name = data_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "analysis".to_string());
    data_dir.with_file_name(format!("{}_results", name))
}
