use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::lm::{self, normal_matrix, CurveData, LmOptions};
use super::FitError;

/// Initial Kd handed to the solver
pub const INITIAL_KD: f64 = 1.0;

/// Upper bound on the number of points of a plotted isotherm
pub const MAX_CURVE_POINTS: usize = 10_000;

/// Binding isotherm `R(c)` for a fixed ligand concentration `l0`.
///
/// `R(c) = -a + sqrt(a² + Kd / L0)` with `a = (Kd + c - L0) / (2 L0)`.
pub fn binding_isotherm(c: f64, kd: f64, l0: f64) -> f64 {
    let a = (kd + c - l0) / (2.0 * l0);
    -a + (a * a + kd / l0).sqrt()
}

/// Outcome of the Kd fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Dissociation constant, same unit as the concentrations
    pub kd: f64,
    /// Standard error of Kd
    #[serde(with = "crate::json_float")]
    pub kd_error: f64,
    /// Coefficient of determination
    #[serde(with = "crate::json_float")]
    pub r_squared: f64,
    /// `Σ (R_obs - R_fit)² / R_fit`, not divided by the degrees of freedom
    #[serde(with = "crate::json_float")]
    pub chi_squared: f64,
    /// Residual sum of squares
    pub ssr: f64,
    /// Ligand concentration the model was evaluated with
    pub ligand_concentration: f64,
    /// Concentrations that entered the fit
    pub concentrations: Vec<f64>,
    /// Observed R values
    pub observed: Vec<f64>,
    /// Model values at `concentrations`
    pub fitted: Vec<f64>,
    /// `observed - fitted`
    pub residuals: Vec<f64>,
    /// Solver iterations
    pub iterations: usize,
}

impl FitResult {
    /// Model value at `c` with the fitted Kd
    pub fn evaluate(&self, c: f64) -> f64 {
        binding_isotherm(c, self.kd, self.ligand_concentration)
    }
}

/// Solver options used for the Kd fit
pub fn default_options() -> LmOptions {
    LmOptions {
        initial_values: vec![INITIAL_KD],
        min_values: Some(vec![0.0]),
        ..LmOptions::default()
    }
}

/// Fit Kd to `(concentration, R)` pairs
pub fn fit_kd(concentrations: &[f64], r_values: &[f64], l0: f64) -> Result<FitResult, FitError> {
    fit_kd_with(concentrations, r_values, l0, &default_options())
}

/// Fit Kd with explicit solver options
pub fn fit_kd_with(
    concentrations: &[f64],
    r_values: &[f64],
    l0: f64,
    options: &LmOptions,
) -> Result<FitResult, FitError> {
    if !l0.is_finite() || l0 <= 0.0 {
        return Err(FitError::InvalidLigandConcentration(l0));
    }

    let data = CurveData {
        x: concentrations.to_vec(),
        y: r_values.to_vec(),
    };
    let model = move |p: &[f64], c: f64| binding_isotherm(c, p[0], l0);
    let solution = lm::lm(&data, &model, options)?;

    let n = data.x.len();
    let p = solution.parameters.len();
    let kd = solution.parameters[0];
    let ssr = solution.error;

    let covariance = lm::invert(&normal_matrix(&solution.jacobian))
        .ok_or(FitError::SingularCovariance)?;
    let variance = covariance[0][0] * ssr / (n - p) as f64;
    if !variance.is_finite() || variance < 0.0 {
        return Err(FitError::SingularCovariance);
    }
    let kd_error = variance.sqrt();

    let fitted: Vec<f64> = data.x.iter().map(|c| binding_isotherm(*c, kd, l0)).collect();
    let residuals: Vec<f64> = data.y.iter().zip(&fitted).map(|(y, f)| y - f).collect();

    let mean = data.y.iter().sum::<f64>() / n as f64;
    let sst: f64 = data.y.iter().map(|y| (y - mean) * (y - mean)).sum();
    let r_squared = if sst > 0.0 {
        1.0 - ssr / sst
    } else if ssr == 0.0 {
        1.0
    } else {
        f64::NEG_INFINITY
    };

    let chi_squared = chi_squared(&data.y, &fitted);

    info!(
        "Fitted Kd = {:.4} ± {:.4} (R² {:.4}, χ² {:.4}, {} iterations)",
        kd, kd_error, r_squared, chi_squared, solution.iterations
    );

    Ok(FitResult {
        kd,
        kd_error,
        r_squared,
        chi_squared,
        ssr,
        ligand_concentration: l0,
        concentrations: data.x,
        observed: data.y,
        fitted,
        residuals,
        iterations: solution.iterations,
    })
}

/// `Σ (observed - fitted)² / fitted`; terms with a non-positive fit are skipped
pub fn chi_squared(observed: &[f64], fitted: &[f64]) -> f64 {
    observed
        .iter()
        .zip(fitted)
        .filter_map(|(o, f)| {
            if *f > 0.0 {
                Some((o - f) * (o - f) / f)
            } else {
                warn!("Skipping χ² term with non-positive fit value {}", f);
                None
            }
        })
        .sum()
}

/// Fitted isotherm from 0 to the largest concentration.
///
/// The step is the smallest non-zero concentration, widened when that would
/// exceed [`MAX_CURVE_POINTS`].
pub fn isotherm_curve(concentrations: &[f64], kd: f64, l0: f64) -> Vec<(f64, f64)> {
    let max = concentrations.iter().copied().fold(0.0, f64::max);
    let min_step = concentrations
        .iter()
        .copied()
        .filter(|c| *c > 0.0)
        .fold(f64::INFINITY, f64::min);
    if max <= 0.0 || !min_step.is_finite() {
        return vec![(0.0, binding_isotherm(0.0, kd, l0))];
    }

    let step = min_step.max(max / (MAX_CURVE_POINTS - 1) as f64);
    let count = (max / step).floor() as usize;
    let mut curve: Vec<(f64, f64)> = (0..=count)
        .map(|i| {
            let c = i as f64 * step;
            (c, binding_isotherm(c, kd, l0))
        })
        .collect();
    if curve.last().map(|(c, _)| *c < max).unwrap_or(true) {
        curve.push((max, binding_isotherm(max, kd, l0)));
    }
    curve
}
