//! # Curve Fitter
//!
//! Fits the single-site binding isotherm to `(concentration, R)` pairs with a
//! general Levenberg–Marquardt solver ([`lm`]) and derives the Kd standard
//! error from the parameter covariance `(JᵀJ)⁻¹ · SSR / (n - p)`.
//!
//! The reported χ² is `Σ (R_obs - R_fit)² / R_fit` without division by the
//! degrees of freedom.

mod binding;
mod error;
pub mod lm;

#[cfg(test)]
mod tests;

pub use binding::{
    binding_isotherm, chi_squared, default_options, fit_kd, fit_kd_with, isotherm_curve,
    FitResult, INITIAL_KD, MAX_CURVE_POINTS,
};
pub use error::FitError;
pub use lm::{CurveData, LmOptions, LmResult};
