//! Property tests for the numeric building blocks

use actis_kd::compensation::CubicSpline;
use actis_kd::fitting::binding_isotherm;
use actis_kd::ratio::compute_r;
use actis_kd::traces::{Concentration, Trace};
use actis_kd::window::{reduce_window, SignalSummary, WindowBounds};

fn summary(concentration: f64, mean: f64, stdev: f64) -> SignalSummary {
    SignalSummary {
        concentration: Concentration::micromolar(concentration),
        peak_time: 50.0,
        window: WindowBounds::around(50.0, 0.02),
        mean,
        stdev,
        relative_stdev: if mean != 0.0 { 100.0 * stdev / mean } else { 0.0 },
        runs: Vec::new(),
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Window bounds always bracket the peak time
        #[test]
        fn test_window_bounds_contain_peak(peak in 0.0f64..1000.0, width in 0.0f64..=1.0) {
            let bounds = WindowBounds::around(peak, width);
            prop_assert!(bounds.low <= peak);
            prop_assert!(peak <= bounds.high);
            prop_assert!(bounds.contains(peak));
        }

        /// A constant run averages to its constant for every non-empty window
        #[test]
        fn test_constant_run_window_average(level in -100.0f64..100.0, width in 0.01f64..=1.0) {
            let times: Vec<f64> = (0..=200).map(|i| i as f64 * 0.5).collect();
            let run = Trace::new(times, vec![level; 201]).unwrap();
            let average = reduce_window(&run, 50.0, width, 10.0).unwrap();
            prop_assert!(average.samples >= 1);
            prop_assert!((average.value - level).abs() <= 1e-9 * (1.0 + level.abs()));
        }

        /// R is 1 at the lowest and 0 at the highest concentration, monotone in between
        #[test]
        fn test_r_endpoints_and_monotonicity(
            mut signals in prop::collection::vec(0.0f64..1000.0, 2..12),
            stdev in 0.0f64..5.0,
        ) {
            signals.sort_by(|a, b| b.total_cmp(a));
            prop_assume!(signals[0] != signals[signals.len() - 1]);

            let summaries: Vec<SignalSummary> = signals
                .iter()
                .enumerate()
                .map(|(i, &s)| summary(i as f64, s, stdev))
                .collect();
            let points = compute_r(&summaries, None).unwrap();
            let r: Vec<f64> = points.iter().map(|p| p.r.unwrap()).collect();

            prop_assert_eq!(r[0], 1.0);
            prop_assert_eq!(r[r.len() - 1], 0.0);
            prop_assert!(r.windows(2).all(|w| w[0] >= w[1]));
            prop_assert!(points.iter().all(|p| p.r_stdev.unwrap() >= 0.0));
        }

        /// The natural spline reproduces every knot and clamps outside its domain
        #[test]
        fn test_spline_interpolates_knots(
            knots in prop::collection::vec((0.1f64..10.0, -100.0f64..100.0), 2..30),
        ) {
            let mut x = Vec::with_capacity(knots.len());
            let mut t = 0.0;
            for (gap, _) in &knots {
                t += gap;
                x.push(t);
            }
            let y: Vec<f64> = knots.iter().map(|(_, v)| *v).collect();
            let spline = CubicSpline::natural(&x, &y);

            for (xi, yi) in x.iter().zip(&y) {
                prop_assert!((spline.evaluate(*xi) - yi).abs() <= 1e-9 * (1.0 + yi.abs()));
            }
            prop_assert_eq!(spline.evaluate(x[0] - 1.0), y[0]);
            prop_assert_eq!(spline.evaluate(x[x.len() - 1] + 1.0), y[y.len() - 1]);
        }

        /// The isotherm starts at 1 and never increases with concentration
        #[test]
        fn test_isotherm_shape(kd in 0.01f64..100.0, l0 in 0.1f64..50.0) {
            prop_assert!((binding_isotherm(0.0, kd, l0) - 1.0).abs() < 1e-9);
            let mut previous = 1.0 + 1e-9;
            for c in [0.1, 1.0, 10.0, 100.0, 1000.0] {
                let r = binding_isotherm(c, kd, l0);
                prop_assert!(r > 0.0 && r <= previous + 1e-9);
                previous = r;
            }
        }
    }
}
