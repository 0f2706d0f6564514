/// Errors raised by the R-transform
#[derive(Debug, thiserror::Error)]
pub enum RatioError {
    /// Lowest and highest concentrations carry the same mean signal
    #[error("Signal range is degenerate: S_low = S_high = {0}")]
    DegenerateSignalRange(f64),

    /// Not enough concentrations to bracket the titration
    #[error("At least 2 concentrations are needed for R values, found {0}")]
    InsufficientPoints(usize),
}
