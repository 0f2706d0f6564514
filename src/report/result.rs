use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fitting::FitResult;

/// Scalar fit result block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBlock {
    /// Dissociation constant
    pub kd: f64,
    /// Standard error of Kd
    #[serde(with = "crate::json_float")]
    pub kd_error: f64,
    /// Coefficient of determination
    #[serde(with = "crate::json_float")]
    pub r_squared: f64,
    /// χ² as defined by the fitter
    #[serde(with = "crate::json_float")]
    pub chi_squared: f64,
    /// Concentration unit
    pub unit: String,
}

impl ResultBlock {
    /// Block for `fit` expressed in `unit`
    pub fn new(fit: &FitResult, unit: impl Into<String>) -> Self {
        Self {
            kd: fit.kd,
            kd_error: fit.kd_error,
            r_squared: fit.r_squared,
            chi_squared: fit.chi_squared,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for ResultBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kd: {:.4} ± {:.4} {}", self.kd, self.kd_error, self.unit)?;
        writeln!(f, "R²: {:.4}", self.r_squared)?;
        write!(f, "χ²: {:.4}", self.chi_squared)
    }
}
