use super::*;

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "got {a}, expected {b}, tol {tol}");
}

fn titration() -> (Vec<f64>, Vec<f64>) {
    let c = vec![0.0, 0.1, 1.0, 10.0, 100.0];
    let r = [100.0, 95.0, 70.0, 20.0, 5.0]
        .iter()
        .map(|s| (s - 5.0) / 95.0)
        .collect();
    (c, r)
}

#[test]
fn test_isotherm_is_one_without_protein() {
    for kd in [0.01, 1.0, 250.0] {
        assert_close(binding_isotherm(0.0, kd, 5.0), 1.0, 1e-12);
    }
    assert!(binding_isotherm(1000.0, 1.0, 5.0) < 0.01);
}

#[test]
fn test_fit_titration() {
    let (c, r) = titration();
    let fit = fit_kd(&c, &r, 5.0).unwrap();

    assert_close(fit.kd, 0.7469, 1e-3);
    assert_close(fit.kd_error, 0.590, 1e-2);
    assert_close(fit.r_squared, 0.9709, 1e-3);
    assert_close(fit.chi_squared, 0.0484, 1e-3);
    assert!(fit.kd > 0.1 && fit.kd < 10.0);
    assert_eq!(fit.residuals.len(), 5);
}

#[test]
fn test_fitted_values_reproduce_model() {
    let (c, r) = titration();
    let fit = fit_kd(&c, &r, 5.0).unwrap();
    for (ci, fi) in fit.concentrations.iter().zip(&fit.fitted) {
        assert_eq!(fit.evaluate(*ci), *fi);
    }
    for ((o, f), res) in fit.observed.iter().zip(&fit.fitted).zip(&fit.residuals) {
        assert_eq!(o - f, *res);
    }
}

#[test]
fn test_recovers_synthetic_kd() {
    let c = [0.0, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0];
    let r: Vec<f64> = c.iter().map(|ci| binding_isotherm(*ci, 3.0, 1.0)).collect();
    let fit = fit_kd(&c, &r, 1.0).unwrap();
    assert_close(fit.kd, 3.0, 1e-4);
    assert!(fit.r_squared > 0.999_999);
}

#[test]
fn test_iteration_cap_reports_convergence_error() {
    let (c, r) = titration();
    let options = LmOptions {
        max_iterations: 1,
        ..default_options()
    };
    let err = fit_kd_with(&c, &r, 5.0, &options).unwrap_err();
    assert!(matches!(err, FitError::Convergence { iterations: 1, .. }));
}

#[test]
fn test_fit_input_errors() {
    assert!(matches!(
        fit_kd(&[0.0], &[1.0], 5.0),
        Err(FitError::InsufficientData {
            points: 1,
            parameters: 1
        })
    ));
    assert!(matches!(
        fit_kd(&[0.0, 1.0], &[1.0], 5.0),
        Err(FitError::LengthMismatch { .. })
    ));
    assert!(matches!(
        fit_kd(&[0.0, 1.0], &[1.0, 0.5], 0.0),
        Err(FitError::InvalidLigandConcentration(_))
    ));
}

#[test]
fn test_constant_model_has_singular_covariance() {
    let data = CurveData {
        x: vec![0.0, 1.0, 2.0],
        y: vec![1.0, 1.0, 1.0],
    };
    let flat = |_: &[f64], _: f64| 1.0;
    let solution = lm::lm(
        &data,
        &flat,
        &LmOptions {
            initial_values: vec![1.0],
            ..LmOptions::default()
        },
    )
    .unwrap();
    assert_eq!(solution.error, 0.0);
    assert!(lm::invert(&lm::normal_matrix(&solution.jacobian)).is_none());
}

#[test]
fn test_linear_regression() {
    let data = CurveData {
        x: vec![0., 1., 2., 3., 4., 5., 6.],
        y: vec![-2., 0., 2., 4., 6., 8., 10.],
    };
    let line = |p: &[f64], x: f64| p[0] * x + p[1];
    let result = lm::lm(
        &data,
        &line,
        &LmOptions {
            initial_values: vec![1.0, 0.0],
            ..LmOptions::default()
        },
    )
    .unwrap();
    assert_close(result.parameters[0], 2.0, 1e-5);
    assert_close(result.parameters[1], -2.0, 1e-5);
}

#[test]
fn test_chi_squared_skips_non_positive_fit() {
    assert_eq!(chi_squared(&[1.0, 0.5], &[0.5, 0.0]), 0.5);
}

#[test]
fn test_isotherm_curve_spans_range() {
    let (c, _) = titration();
    let curve = isotherm_curve(&c, 0.75, 5.0);
    assert_eq!(curve.first().map(|p| p.0), Some(0.0));
    assert_eq!(curve.last().map(|p| p.0), Some(100.0));
    assert!(curve.len() <= MAX_CURVE_POINTS + 1);
    assert!(curve.windows(2).all(|w| w[1].1 <= w[0].1));
}
