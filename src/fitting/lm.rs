//! Levenberg–Marquardt non-linear least squares.
//!
//! Minimizes `Σ (y_i - f(p, x_i))²` over the parameter vector `p` using a
//! finite-difference Jacobian and Marquardt's diagonal scaling of the damped
//! normal equations `(JᵀJ + λ diag(JᵀJ)) δ = Jᵀr`. A trial step is accepted
//! only when it lowers the error; the damping is then divided by
//! `damping_step_down`, otherwise multiplied by `damping_step_up`.
//!
//! # References
//! * Kenneth Levenberg (1944). "A method for the solution of certain
//!   non-linear problems in least squares."
//! * Donald W. Marquardt (1963). "An algorithm for least-squares estimation
//!   of nonlinear parameters."
//! * Henri P. Gavin (2024). "The Levenberg–Marquardt algorithm for nonlinear
//!   least squares curve-fitting problems."

use log::debug;

use super::FitError;

/// Observations to fit
#[derive(Clone, Debug)]
pub struct CurveData {
    /// Independent variable
    pub x: Vec<f64>,
    /// Observed values
    pub y: Vec<f64>,
}

/// Model evaluated as `f(parameters, x)`
pub type ModelFunction = dyn Fn(&[f64], f64) -> f64;

/// Largest damping before the solver stops at the current parameters
const MAX_DAMPING: f64 = 1e16;

/// Smallest damping kept after repeated successful steps
const MIN_DAMPING: f64 = 1e-12;

/// Solver options
#[derive(Clone, Debug)]
pub struct LmOptions {
    /// Starting parameters
    pub initial_values: Vec<f64>,
    /// Initial damping λ
    pub damping: f64,
    /// Damping multiplier after a rejected step
    pub damping_step_up: f64,
    /// Damping divisor after an accepted step
    pub damping_step_down: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Stop once the residual sum of squares falls to this value
    pub error_tolerance: f64,
    /// Stop once the relative decrease of the error or the relative step falls below this value
    pub relative_tolerance: f64,
    /// Central instead of forward differences in the Jacobian
    pub central_difference: bool,
    /// Fixed finite-difference step per parameter; scaled to each parameter when `None`
    pub gradient_difference: Option<Vec<f64>>,
    /// Lower parameter bounds
    pub min_values: Option<Vec<f64>>,
    /// Upper parameter bounds
    pub max_values: Option<Vec<f64>>,
}

impl Default for LmOptions {
    fn default() -> Self {
        Self {
            initial_values: Vec::new(),
            damping: 1e-2,
            damping_step_up: 11.0,
            damping_step_down: 9.0,
            max_iterations: 200,
            error_tolerance: 1e-12,
            relative_tolerance: 1e-10,
            central_difference: false,
            gradient_difference: None,
            min_values: None,
            max_values: None,
        }
    }
}

/// Solver output
#[derive(Clone, Debug)]
pub struct LmResult {
    /// Fitted parameters
    pub parameters: Vec<f64>,
    /// Residual sum of squares at `parameters`
    pub error: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Jacobian `∂f/∂p` at `parameters`, one row per observation
    pub jacobian: Vec<Vec<f64>>,
}

struct CheckedOptions {
    parameters: Vec<f64>,
    min_values: Vec<f64>,
    max_values: Vec<f64>,
}

fn check_options(data: &CurveData, options: &LmOptions) -> Result<CheckedOptions, FitError> {
    if data.x.len() != data.y.len() {
        return Err(FitError::LengthMismatch {
            x_len: data.x.len(),
            y_len: data.y.len(),
        });
    }
    let n_params = options.initial_values.len();
    if n_params == 0 {
        return Err(FitError::InvalidOption(
            "initial_values must hold at least one parameter".to_string(),
        ));
    }
    if data.x.len() <= n_params {
        return Err(FitError::InsufficientData {
            points: data.x.len(),
            parameters: n_params,
        });
    }
    if options.damping.is_nan() || options.damping <= 0.0 {
        return Err(FitError::InvalidOption(
            "damping must be a positive number".to_string(),
        ));
    }
    if options.damping_step_up <= 1.0 || options.damping_step_down <= 1.0 {
        return Err(FitError::InvalidOption(
            "damping steps must be greater than 1".to_string(),
        ));
    }
    if let Some(diff) = &options.gradient_difference {
        if diff.len() != n_params || diff.iter().any(|d| d.is_nan() || *d <= 0.0) {
            return Err(FitError::InvalidOption(
                "gradient_difference needs one positive step per parameter".to_string(),
            ));
        }
    }

    let bounds = |values: &Option<Vec<f64>>, fill: f64, name: &str| match values {
        Some(v) if v.len() == n_params => Ok(v.clone()),
        Some(_) => Err(FitError::InvalidOption(format!(
            "{} must hold one value per parameter",
            name
        ))),
        None => Ok(vec![fill; n_params]),
    };
    let min_values = bounds(&options.min_values, f64::NEG_INFINITY, "min_values")?;
    let max_values = bounds(&options.max_values, f64::INFINITY, "max_values")?;

    let parameters = options
        .initial_values
        .iter()
        .zip(min_values.iter().zip(&max_values))
        .map(|(p, (lo, hi))| p.max(*lo).min(*hi))
        .collect();

    Ok(CheckedOptions {
        parameters,
        min_values,
        max_values,
    })
}

/// Fit `model` to `data`
pub fn lm(
    data: &CurveData,
    model: &ModelFunction,
    options: &LmOptions,
) -> Result<LmResult, FitError> {
    let checked = check_options(data, options)?;
    let mut parameters = checked.parameters;
    let mut damping = options.damping;

    let mut error = error_calculation(data, &parameters, model);
    if !error.is_finite() {
        return Err(FitError::NonFiniteStart(parameters));
    }

    let mut converged = error <= options.error_tolerance;
    let mut iterations = 0usize;

    while !converged && iterations < options.max_iterations {
        iterations += 1;

        let jacobian = gradient_function(data, &parameters, model, options);
        let residual = residuals(data, &parameters, model);
        let jtj = normal_matrix(&jacobian);
        let gradient = transpose_mul_vec(&jacobian, &residual);

        let mut damped = jtj.clone();
        for (i, row) in damped.iter_mut().enumerate() {
            let scale = if jtj[i][i] > 0.0 { jtj[i][i] } else { 1.0 };
            row[i] += damping * scale;
        }

        let trial_error = solve_linear(&damped, &gradient).map(|delta| {
            let trial: Vec<f64> = parameters
                .iter()
                .zip(&delta)
                .zip(checked.min_values.iter().zip(&checked.max_values))
                .map(|((p, d), (lo, hi))| (p + d).max(*lo).min(*hi))
                .collect();
            let e = error_calculation(data, &trial, model);
            (trial, e)
        });

        match trial_error {
            Some((trial, trial_error)) if trial_error.is_finite() && trial_error <= error => {
                let decrease = (error - trial_error) / error.max(f64::MIN_POSITIVE);
                let step = parameters
                    .iter()
                    .zip(&trial)
                    .map(|(p, t)| (t - p).abs() / p.abs().max(f64::EPSILON))
                    .fold(0.0, f64::max);

                debug!(
                    "LM iteration {}: error {:.6e} -> {:.6e}, damping {:.3e}",
                    iterations, error, trial_error, damping
                );
                parameters = trial;
                error = trial_error;
                damping = (damping / options.damping_step_down).max(MIN_DAMPING);

                converged = error <= options.error_tolerance
                    || decrease < options.relative_tolerance
                    || step < options.relative_tolerance;
            }
            _ => {
                damping *= options.damping_step_up;
                if damping > MAX_DAMPING {
                    // no downhill step left at this point
                    debug!("LM iteration {}: damping saturated", iterations);
                    converged = true;
                }
            }
        }
    }

    if !converged {
        return Err(FitError::Convergence { iterations, error });
    }

    let jacobian = gradient_function(data, &parameters, model, options);
    Ok(LmResult {
        parameters,
        error,
        iterations,
        jacobian,
    })
}

/// Residual sum of squares of `model` at `parameters`
pub fn error_calculation(data: &CurveData, parameters: &[f64], model: &ModelFunction) -> f64 {
    data.x
        .iter()
        .zip(&data.y)
        .map(|(x, y)| {
            let r = y - model(parameters, *x);
            r * r
        })
        .sum()
}

fn residuals(data: &CurveData, parameters: &[f64], model: &ModelFunction) -> Vec<f64> {
    data.x
        .iter()
        .zip(&data.y)
        .map(|(x, y)| y - model(parameters, *x))
        .collect()
}

/// Finite-difference Jacobian, one row per observation
pub fn gradient_function(
    data: &CurveData,
    parameters: &[f64],
    model: &ModelFunction,
    options: &LmOptions,
) -> Vec<Vec<f64>> {
    let n_params = parameters.len();
    let mut jacobian = vec![vec![0.0_f64; n_params]; data.x.len()];
    let base: Vec<f64> = data.x.iter().map(|x| model(parameters, *x)).collect();

    for k in 0..n_params {
        let h = match &options.gradient_difference {
            Some(diff) => diff[k],
            None => f64::EPSILON.sqrt() * parameters[k].abs().max(1.0),
        };
        let mut forward = parameters.to_vec();
        forward[k] += h;

        if options.central_difference {
            let mut backward = parameters.to_vec();
            backward[k] -= h;
            for (row, x) in jacobian.iter_mut().zip(&data.x) {
                row[k] = (model(&forward, *x) - model(&backward, *x)) / (2.0 * h);
            }
        } else {
            for ((row, x), f0) in jacobian.iter_mut().zip(&data.x).zip(&base) {
                row[k] = (model(&forward, *x) - f0) / h;
            }
        }
    }

    jacobian
}

/// JᵀJ
pub(crate) fn normal_matrix(jacobian: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = jacobian.first().map(|r| r.len()).unwrap_or(0);
    let mut out = vec![vec![0.0_f64; n]; n];
    for row in jacobian {
        for i in 0..n {
            for j in 0..n {
                out[i][j] += row[i] * row[j];
            }
        }
    }
    out
}

fn transpose_mul_vec(jacobian: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    let n = jacobian.first().map(|r| r.len()).unwrap_or(0);
    let mut out = vec![0.0_f64; n];
    for (row, vi) in jacobian.iter().zip(v) {
        for (o, j) in out.iter_mut().zip(row) {
            *o += j * vi;
        }
    }
    out
}

/// Gauss-Jordan elimination with partial pivoting
fn solve_linear(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = a.len();
    let mut aug: Vec<Vec<f64>> = a
        .iter()
        .zip(b)
        .map(|(row, bi)| {
            let mut r = row.clone();
            r.push(*bi);
            r
        })
        .collect();

    for i in 0..n {
        let pivot = (i..n).max_by(|&r, &s| aug[r][i].abs().total_cmp(&aug[s][i].abs()))?;
        let maxv = aug[pivot][i].abs();
        if maxv <= 0.0 || !maxv.is_finite() {
            return None;
        }
        aug.swap(i, pivot);

        let diag = aug[i][i];
        for v in aug[i].iter_mut().skip(i) {
            *v /= diag;
        }
        for r in 0..n {
            if r == i {
                continue;
            }
            let factor = aug[r][i];
            for j in i..=n {
                aug[r][j] -= factor * aug[i][j];
            }
        }
    }
    Some(aug.into_iter().map(|row| row[n]).collect())
}

/// Inverse of a square matrix, `None` when singular
pub(crate) fn invert(a: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let mut columns = Vec::with_capacity(n);
    for k in 0..n {
        let mut e = vec![0.0_f64; n];
        e[k] = 1.0;
        columns.push(solve_linear(a, &e)?);
    }
    let mut inv = vec![vec![0.0_f64; n]; n];
    for (j, column) in columns.iter().enumerate() {
        for (i, v) in column.iter().enumerate() {
            inv[i][j] = *v;
        }
    }
    Some(inv)
}
