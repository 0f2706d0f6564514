//! Natural cubic spline interpolation.
//!
//! Second derivatives at the knots come from the usual tridiagonal system
//! with zero curvature at both ends, solved by forward elimination and back
//! substitution. Evaluation outside the knot range returns the value of the
//! nearest endpoint.

/// Piecewise cubic interpolant through a set of knots
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    /// Build a natural spline.
    ///
    /// `x` must be strictly increasing and as long as `y`. One knot gives a
    /// constant, two knots a straight line.
    pub fn natural(x: &[f64], y: &[f64]) -> Self {
        debug_assert_eq!(x.len(), y.len());
        let n = x.len().min(y.len());
        let x = x[..n].to_vec();
        let y = y[..n].to_vec();
        let mut m = vec![0.0; n];

        if n > 2 {
            let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
            let inner = n - 2;
            let mut diag = vec![0.0; inner];
            let mut rhs = vec![0.0; inner];
            for i in 0..inner {
                diag[i] = 2.0 * (h[i] + h[i + 1]);
                rhs[i] = 6.0 * ((y[i + 2] - y[i + 1]) / h[i + 1] - (y[i + 1] - y[i]) / h[i]);
            }

            // Thomas algorithm, off-diagonals are h[i + 1]
            for i in 1..inner {
                let factor = h[i] / diag[i - 1];
                diag[i] -= factor * h[i];
                rhs[i] -= factor * rhs[i - 1];
            }
            for i in (0..inner).rev() {
                let upper = if i + 1 < inner { h[i + 1] * m[i + 2] } else { 0.0 };
                m[i + 1] = (rhs[i] - upper) / diag[i];
            }
        }

        Self { x, y, m }
    }

    /// Number of knots
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when built from no knots
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Knot range
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((*self.x.first()?, *self.x.last()?))
    }

    /// Interpolated value at `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.x.len();
        match n {
            0 => return 0.0,
            1 => return self.y[0],
            _ => {}
        }
        if t <= self.x[0] {
            return self.y[0];
        }
        if t >= self.x[n - 1] {
            return self.y[n - 1];
        }

        let upper = self.x.partition_point(|&k| k <= t).min(n - 1);
        let i = upper - 1;
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - t) / h;
        let b = (t - self.x[i]) / h;

        a * self.y[i]
            + b * self.y[i + 1]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[i + 1]) * h * h / 6.0
    }
}
