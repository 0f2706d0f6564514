/// Errors raised by the curve fitter
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    /// Not more observations than free parameters
    #[error("Fit needs more than {parameters} points, found {points}")]
    InsufficientData {
        /// Number of observations
        points: usize,
        /// Number of free parameters
        parameters: usize,
    },

    /// x and y differ in length
    #[error("Data length mismatch: {x_len} x values vs {y_len} y values")]
    LengthMismatch {
        /// Number of x values
        x_len: usize,
        /// Number of y values
        y_len: usize,
    },

    /// Invalid solver option
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Ligand concentration must be positive
    #[error("Ligand concentration must be > 0, got {0}")]
    InvalidLigandConcentration(f64),

    /// Model is not finite at the starting parameters
    #[error("Model is not finite at the initial parameters {0:?}")]
    NonFiniteStart(Vec<f64>),

    /// Iteration cap reached without convergence
    #[error("Fit did not converge after {iterations} iterations (residual sum of squares {error:.6e})")]
    Convergence {
        /// Iterations performed
        iterations: usize,
        /// Residual sum of squares at the last accepted parameters
        error: f64,
    },

    /// JᵀJ cannot be inverted at the solution
    #[error("Parameter covariance matrix is singular")]
    SingularCovariance,
}
