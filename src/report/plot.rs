//! Plot-ready series.
//!
//! Plain data only: every series is a list of `(x, y)` points with labels,
//! left to whatever renders them.

use serde::{Deserialize, Serialize};

use crate::experiment::{DataType, PeakDetermination};
use crate::fitting::{isotherm_curve, FitResult};
use crate::peak::PeakModel;
use crate::ratio::RPoint;
use crate::traces::{Trace, TraceStore};
use crate::window::{SignalSummary, WindowBounds};

/// Minimum peak-signal change, as a fraction of the maximum signal, for a
/// concentration to appear in the overview
pub const OVERVIEW_SIGNAL_STEP: f64 = 0.2;

/// Label of the propagation-time axis
pub const TIME_AXIS_LABEL: &str = "Propagation time (s)";

/// One labelled line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label
    pub label: String,
    /// `(x, y)` points
    pub points: Vec<(f64, f64)>,
}

/// Every run of one concentration with its averaging window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Separagram {
    /// Plot title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// One series per run
    pub runs: Vec<Series>,
    /// Peak time marker
    pub peak_time: f64,
    /// Window bound markers
    pub window: WindowBounds,
}

/// First runs of a representative subset of concentrations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Plot title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// One series per shown concentration
    pub series: Vec<Series>,
    /// Upper end of the signal axis
    pub y_max: f64,
}

/// Isotherm point with error bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsothermPoint {
    /// Concentration
    pub concentration: f64,
    /// R value
    pub r: f64,
    /// R standard deviation
    pub r_stdev: f64,
}

/// Observed R values against the fitted binding curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsothermPlot {
    /// Plot title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Observed points
    pub points: Vec<IsothermPoint>,
    /// Fitted curve
    pub curve: Vec<(f64, f64)>,
}

/// All plots of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    /// One separagram per concentration
    pub separagrams: Vec<Separagram>,
    /// Overview of first runs
    pub overview: Overview,
    /// Binding isotherm
    pub isotherm: IsothermPlot,
}

fn run_series(trace: &Trace, injection_time: f64, label: String) -> Series {
    Series {
        label,
        points: trace.propagation(injection_time).collect(),
    }
}

/// Separagram of every concentration
pub fn separagrams(
    store: &TraceStore,
    summaries: &[SignalSummary],
    injection_time: f64,
    data_type: DataType,
    protein_name: &str,
) -> Vec<Separagram> {
    store
        .series()
        .iter()
        .zip(summaries)
        .map(|(series, summary)| Separagram {
            title: format!("{} {}", protein_name, series.concentration()),
            x_label: TIME_AXIS_LABEL.to_string(),
            y_label: data_type.signal_label().to_string(),
            runs: series
                .runs()
                .iter()
                .enumerate()
                .map(|(i, run)| run_series(run, injection_time, format!("Experiment {}", i + 1)))
                .collect(),
            peak_time: summary.peak_time,
            window: summary.window,
        })
        .collect()
}

fn signal_near(trace: &Trace, injection_time: f64, time: f64) -> Option<f64> {
    trace
        .propagation(injection_time)
        .min_by(|a, b| (a.0 - time).abs().total_cmp(&(b.0 - time).abs()))
        .map(|(_, s)| s)
}

/// Indices of the concentrations shown in the overview.
///
/// A concentration is shown when it is the blank (0), the reference, the
/// last one, or when its first-run signal at the peak differs from the last
/// shown one by at least [`OVERVIEW_SIGNAL_STEP`] of the maximum signal.
pub fn overview_selection(
    store: &TraceStore,
    peaks: &PeakModel,
    injection_time: f64,
    reference: Option<f64>,
) -> Vec<usize> {
    let threshold = OVERVIEW_SIGNAL_STEP * store.max_signal();
    let last_index = store.len().saturating_sub(1);
    let mut shown = Vec::new();
    let mut last_signal: Option<f64> = None;

    for (index, series) in store.series().iter().enumerate() {
        let concentration = series.concentration();
        let signal = peaks
            .peak_time(concentration.value)
            .and_then(|t| signal_near(series.first_run(), injection_time, t));

        let forced = concentration.value == 0.0
            || reference.map(|r| concentration.matches(r)).unwrap_or(false)
            || index == last_index;
        let changed = match (signal, last_signal) {
            (Some(s), Some(prev)) => (s - prev).abs() >= threshold,
            (Some(_), None) => true,
            _ => false,
        };

        if forced || changed {
            shown.push(index);
            if signal.is_some() {
                last_signal = signal;
            }
        }
    }
    shown
}

/// Overview of the selected first runs
pub fn overview(
    store: &TraceStore,
    peaks: &PeakModel,
    injection_time: f64,
    reference: Option<f64>,
    data_type: DataType,
    protein_name: &str,
) -> Overview {
    let series = overview_selection(store, peaks, injection_time, reference)
        .into_iter()
        .map(|i| &store.series()[i])
        .map(|s| run_series(s.first_run(), injection_time, s.concentration().to_string()))
        .collect();
    Overview {
        title: format!("{} titration overview", protein_name),
        x_label: TIME_AXIS_LABEL.to_string(),
        y_label: data_type.signal_label().to_string(),
        series,
        y_max: store.max_signal(),
    }
}

/// Isotherm plot of the fitted points
pub fn isotherm(points: &[RPoint], fit: &FitResult, unit: &str, protein_name: &str) -> IsothermPlot {
    IsothermPlot {
        title: format!("{} binding isotherm", protein_name),
        x_label: format!("[{}]0 ({})", protein_name, unit),
        y_label: "R".to_string(),
        points: points
            .iter()
            .filter_map(|p| {
                Some(IsothermPoint {
                    concentration: p.concentration.value,
                    r: p.r?,
                    r_stdev: p.r_stdev.unwrap_or(0.0),
                })
            })
            .collect(),
        curve: isotherm_curve(&fit.concentrations, fit.kd, fit.ligand_concentration),
    }
}

/// Reference concentration marked in the overview
pub fn overview_reference(determination: &PeakDetermination) -> Option<f64> {
    match determination {
        PeakDetermination::Programmatic {
            reference_concentration,
            ..
        } => Some(*reference_concentration),
        PeakDetermination::Manual { .. } => None,
    }
}
