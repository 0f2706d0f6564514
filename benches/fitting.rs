use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use actis_kd::compensation::{compensate, SimulatedProfile};
use actis_kd::experiment::{AnalysisConfig, Experiment};
use actis_kd::fitting::{binding_isotherm, fit_kd};
use actis_kd::pipeline::analyze;
use actis_kd::traces::{Concentration, ConcentrationSeries, Trace, TraceStore};

const INJECTION: f64 = 10.0;
const LIGAND: f64 = 5.0;

/// Titration with Gaussian peaks whose heights follow the isotherm for `kd`
fn synthetic_store(concentrations: &[f64], runs: usize, samples: usize, kd: f64) -> TraceStore {
    let step = 120.0 / samples as f64;
    let times: Vec<f64> = (0..samples).map(|i| i as f64 * step).collect();
    let series = concentrations
        .iter()
        .map(|&c| {
            let height = 5.0 + 95.0 * binding_isotherm(c, kd, LIGAND);
            let traces = (0..runs)
                .map(|run| {
                    let signals = times
                        .iter()
                        .map(|&t| {
                            let z = (t - 60.0) / 3.0;
                            1.0 + height * (-0.5 * z * z).exp() + 0.01 * run as f64
                        })
                        .collect();
                    Trace::new(times.clone(), signals).unwrap()
                })
                .collect();
            ConcentrationSeries::new(Concentration::micromolar(c), traces).unwrap()
        })
        .collect();
    TraceStore::new(series).unwrap()
}

fn concentrations(n: usize) -> Vec<f64> {
    std::iter::once(0.0)
        .chain((0..n - 1).map(|i| 0.1 * 2f64.powi(i as i32)))
        .collect()
}

/// Benchmark the Levenberg-Marquardt Kd fit alone
fn bench_fit_kd(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_kd");

    for points in [5, 10, 20] {
        let x = concentrations(points);
        let y: Vec<f64> = x.iter().map(|&c| binding_isotherm(c, 2.0, LIGAND)).collect();

        group.throughput(Throughput::Elements(points as u64));
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| fit_kd(black_box(&x), black_box(&y), LIGAND).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the complete analysis for growing trace lengths
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for samples in [500, 2000, 8000] {
        let store = synthetic_store(&concentrations(10), 3, samples, 2.0);
        let config = AnalysisConfig::programmatic(INJECTION, 0.02, LIGAND, 0.0);
        let experiment = Experiment::new(store, config, None).unwrap();

        group.throughput(Throughput::Elements((samples * 30) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}samples", samples)),
            &experiment,
            |b, experiment| b.iter(|| analyze(black_box(experiment)).unwrap()),
        );
    }

    group.finish();
}

/// Benchmark compensation against a dense simulated profile
fn bench_compensate(c: &mut Criterion) {
    let store = synthetic_store(&concentrations(10), 3, 2000, 2.0);
    let times: Vec<f64> = (0..=1200).map(|i| i as f64 * 0.1).collect();
    let signals = times
        .iter()
        .map(|&t| 0.2 + (-0.5 * ((t - 60.0) / 12.0).powi(2)).exp())
        .collect();
    let profile = SimulatedProfile::new(times, signals).unwrap();

    c.bench_function("compensate", |b| {
        b.iter(|| compensate(black_box(&store), &profile, 0.0, INJECTION).unwrap())
    });
}

criterion_group!(benches, bench_fit_kd, bench_analyze, bench_compensate);
criterion_main!(benches);
