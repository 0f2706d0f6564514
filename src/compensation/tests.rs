use super::*;
use crate::traces::{Concentration, ConcentrationSeries, Trace, TraceStore};

const TIMES: [f64; 5] = [0.0, 5.0, 10.0, 15.0, 20.0];

fn run(signals: [f64; 5]) -> Trace {
    Trace::new(TIMES.to_vec(), signals.to_vec()).unwrap()
}

fn flat_profile() -> SimulatedProfile {
    SimulatedProfile::new(TIMES.to_vec(), vec![2.0; 5]).unwrap()
}

fn store() -> TraceStore {
    TraceStore::new(vec![
        ConcentrationSeries::new(
            Concentration::micromolar(0.0),
            vec![run([2.0, 2.0, 4.0, 3.0, 0.0])],
        )
        .unwrap(),
        ConcentrationSeries::new(
            Concentration::micromolar(1.0),
            vec![run([1.0, 1.0, 5.0, 3.0, 1.0]), run([0.0, 0.0, 12.0, 0.0, 0.0])],
        )
        .unwrap(),
    ])
    .unwrap()
}

#[test]
fn test_spline_interpolates_knots() {
    let x = [0.0, 1.0, 2.5, 4.0, 6.0];
    let y = [0.0, 0.8, 1.0, 0.3, 0.1];
    let spline = CubicSpline::natural(&x, &y);
    for (xi, yi) in x.iter().zip(y.iter()) {
        assert!((spline.evaluate(*xi) - yi).abs() < 1e-12);
    }
    assert_eq!(spline.domain(), Some((0.0, 6.0)));
}

#[test]
fn test_spline_reproduces_straight_line() {
    let x = [0.0, 1.0, 3.0, 4.0];
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
    let spline = CubicSpline::natural(&x, &y);
    for t in [0.5, 2.0, 3.7] {
        assert!((spline.evaluate(t) - (2.0 * t + 1.0)).abs() < 1e-12);
    }
}

#[test]
fn test_spline_clamps_outside_domain() {
    let spline = CubicSpline::natural(&[1.0, 2.0, 3.0], &[0.2, 1.0, 0.4]);
    assert_eq!(spline.evaluate(-10.0), 0.2);
    assert_eq!(spline.evaluate(99.0), 0.4);

    let single = CubicSpline::natural(&[1.0], &[0.7]);
    assert_eq!(single.evaluate(5.0), 0.7);
}

#[test]
fn test_profile_normalized_to_unit_peak() {
    let profile = SimulatedProfile::new(vec![0.0, 1.0, 2.0], vec![1.0, 4.0, 2.0]).unwrap();
    assert_eq!(profile.signals(), &[0.25, 1.0, 0.5]);
}

#[test]
fn test_profile_rejects_invalid_input() {
    assert!(matches!(
        SimulatedProfile::new(vec![], vec![]),
        Err(CompensationError::EmptyProfile)
    ));
    assert!(matches!(
        SimulatedProfile::new(vec![0.0, 1.0], vec![0.0, 0.0]),
        Err(CompensationError::ZeroProfile)
    ));
    assert!(matches!(
        SimulatedProfile::new(vec![0.0, 0.0], vec![1.0, 1.0]),
        Err(CompensationError::InvalidProfileTime(1))
    ));
    assert!(matches!(
        SimulatedProfile::new(vec![0.0], vec![1.0, 1.0]),
        Err(CompensationError::ProfileLengthMismatch { .. })
    ));
}

#[test]
fn test_compensate_matches_reference_area() {
    let data = compensate(&store(), &flat_profile(), 1.0, 10.0).unwrap();
    assert!(data.store.is_compensated());
    assert_eq!(data.record.reference_area, 6.0);

    let blank = data.store.find(0.0).unwrap();
    assert_eq!(blank.first_run().signals(), &[0.0, 0.0, 4.0, 2.0, 0.0]);

    let reference = data.store.find(1.0).unwrap();
    assert_eq!(reference.runs()[0].signals(), &[0.0, 0.0, 4.0, 2.0, 0.0]);
    assert_eq!(reference.runs()[1].signals(), &[0.0, 0.0, 6.0, 0.0, 0.0]);

    for series in data.store.series() {
        for run in series.runs() {
            let area: f64 = run.signals().iter().sum();
            assert!((area - 6.0).abs() < 1e-12);
        }
    }
}

fn assert_signals(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-12, "{:?} != {:?}", actual, expected);
    }
}

#[test]
fn test_compensate_weights_by_profile_at_raw_time() {
    // normalized weight t / 20 at the raw sample times
    let ramp = SimulatedProfile::new(TIMES.to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
    let data = compensate(&store(), &ramp, 1.0, 10.0).unwrap();
    assert!((data.record.reference_area - 3.5).abs() < 1e-12);

    let reference = data.store.find(1.0).unwrap();
    // (s - 1) * [0, 0.25, 0.5, 0.75, 1]
    assert_signals(reference.runs()[0].signals(), &[0.0, 0.0, 2.0, 1.5, 0.0]);
    // 12 * 0.5 = 6, rescaled by 3.5 / 6
    assert_signals(reference.runs()[1].signals(), &[0.0, 0.0, 3.5, 0.0, 0.0]);

    // (s - 2) * weight gives [0, 0, 1, 0.75, -2]: clamped then doubled
    let blank = data.store.find(0.0).unwrap();
    assert_signals(blank.first_run().signals(), &[0.0, 0.0, 2.0, 1.5, 0.0]);
}

#[test]
fn test_compensate_twice_is_rejected() {
    let data = compensate(&store(), &flat_profile(), 1.0, 10.0).unwrap();
    let err = compensate(&data.store, &flat_profile(), 1.0, 10.0).unwrap_err();
    assert!(matches!(err, CompensationError::AlreadyCompensated));
}

#[test]
fn test_compensate_missing_reference() {
    let err = compensate(&store(), &flat_profile(), 5.0, 10.0).unwrap_err();
    assert!(matches!(err, CompensationError::MissingReference(v) if v == 5.0));
}

#[test]
fn test_compensate_flat_run_has_zero_area() {
    let store = TraceStore::new(vec![
        ConcentrationSeries::new(
            Concentration::micromolar(0.0),
            vec![run([3.0, 3.0, 3.0, 3.0, 3.0])],
        )
        .unwrap(),
        ConcentrationSeries::new(
            Concentration::micromolar(1.0),
            vec![run([1.0, 1.0, 5.0, 3.0, 1.0])],
        )
        .unwrap(),
    ])
    .unwrap();
    let err = compensate(&store, &flat_profile(), 1.0, 10.0).unwrap_err();
    assert!(matches!(err, CompensationError::ZeroSignalArea { run: 1, .. }));
}

#[test]
fn test_record_roundtrip_through_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(CompensationRecord::read_from_dir(dir.path()).unwrap().is_none());

    let data = compensate(&store(), &flat_profile(), 1.0, 10.0).unwrap();
    let path = data.record.write_to_dir(dir.path()).unwrap();
    assert!(path.ends_with(COMPENSATION_MARKER));

    let restored = CompensationRecord::read_from_dir(dir.path()).unwrap().unwrap();
    assert_eq!(restored, data.record);
}
