use log::debug;
use serde::{Deserialize, Serialize};

use super::{reduce_window, stats, WindowBounds, WindowError};
use crate::peak::{self, Background, PeakModel};
use crate::traces::{Concentration, ConcentrationSeries, TraceStore};

/// Per-run diagnostics kept with a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunWindow {
    /// 1-based run number
    pub run: usize,
    /// Window-averaged signal
    pub average: f64,
    /// Number of samples averaged
    pub samples: usize,
    /// Background mean before injection, if any sample precedes it
    pub background_mean: Option<f64>,
    /// Background sample standard deviation
    pub background_stdev: Option<f64>,
    /// Raw time of the detected peak onset
    pub onset: Option<f64>,
}

/// Aggregated window signal of one concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Concentration
    pub concentration: Concentration,
    /// Peak time used (propagation seconds)
    pub peak_time: f64,
    /// Window bounds used (propagation seconds)
    pub window: WindowBounds,
    /// Mean of the per-run window averages
    pub mean: f64,
    /// Sample standard deviation of the per-run averages (0 for one run)
    pub stdev: f64,
    /// 100 * stdev / mean, infinite for a zero mean with nonzero spread
    #[serde(with = "crate::json_float")]
    pub relative_stdev: f64,
    /// Per-run detail
    pub runs: Vec<RunWindow>,
}

/// Reduce every run of `series` and aggregate the averages
pub fn summarize_series(
    series: &ConcentrationSeries,
    peak_time: f64,
    width: f64,
    injection_time: f64,
) -> Result<SignalSummary, WindowError> {
    let mut runs = Vec::with_capacity(series.run_count());
    for (index, trace) in series.runs().iter().enumerate() {
        let average = reduce_window(trace, peak_time, width, injection_time)
            .map_err(|e| e.in_run(series.concentration(), index + 1))?;
        let bg: Option<Background> = peak::background(trace, injection_time);
        runs.push(RunWindow {
            run: index + 1,
            average: average.value,
            samples: average.samples,
            background_mean: bg.map(|b| b.mean),
            background_stdev: bg.map(|b| b.stdev),
            onset: peak::detect_onset(trace, injection_time, peak::DEFAULT_ONSET_FACTOR),
        });
    }

    let averages: Vec<f64> = runs.iter().map(|r| r.average).collect();
    let mean = stats::mean(&averages);
    let stdev = stats::sample_stdev(&averages);
    let relative_stdev = stats::relative_stdev(mean, stdev);

    debug!(
        "{}: mean {:.4}, sd {:.4} over {} runs",
        series.concentration(),
        mean,
        stdev,
        runs.len()
    );

    Ok(SignalSummary {
        concentration: series.concentration().clone(),
        peak_time,
        window: WindowBounds::around(peak_time, width),
        mean,
        stdev,
        relative_stdev,
        runs,
    })
}

/// Summaries of every concentration, ascending
pub fn summarize_store(
    store: &TraceStore,
    peaks: &PeakModel,
    width: f64,
    injection_time: f64,
) -> Result<Vec<SignalSummary>, WindowError> {
    store
        .series()
        .iter()
        .map(|series| {
            let peak_time = peaks
                .peak_time(series.concentration().value)
                .ok_or_else(|| WindowError::MissingPeak(series.concentration().to_string()))?;
            summarize_series(series, peak_time, width, injection_time)
        })
        .collect()
}
