//! # Pipeline
//!
//! The forward flow of one analysis: optional compensation, peak location,
//! window reduction, R-transform and the Kd fit. Every stage is a function of
//! the [`Experiment`] and the previous stage's output; the first failure
//! aborts the whole analysis.

use log::info;

use crate::compensation::{self, CompensationRecord};
use crate::error::Result;
use crate::experiment::{ConfigurationError, Experiment};
use crate::fitting::{self, FitResult};
use crate::peak::{self, PeakModel};
use crate::ratio::{self, RPoint};
use crate::traces::TraceStore;
use crate::window::{self, SignalSummary};

/// Everything one analysis produces
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Traces the windows were taken from (compensated when applied)
    pub store: TraceStore,
    /// Compensation applied during this analysis, if any
    pub compensation: Option<CompensationRecord>,
    /// Resolved peak times
    pub peaks: PeakModel,
    /// Per-concentration window signal
    pub summaries: Vec<SignalSummary>,
    /// Per-concentration R values
    pub points: Vec<RPoint>,
    /// Kd fit
    pub fit: FitResult,
}

/// Apply compensation when requested and not yet applied.
///
/// Returns the store to analyze and the record of a newly applied correction.
pub fn prepare_store(experiment: &Experiment) -> Result<(TraceStore, Option<CompensationRecord>)> {
    let config = experiment.config();
    let store = experiment.store();

    let Some(reference) = config.compensation.reference_concentration() else {
        return Ok((store.clone(), None));
    };
    if store.is_compensated() {
        info!("Data already compensated, skipping compensation");
        return Ok((store.clone(), None));
    }

    let profile = experiment
        .profile()
        .ok_or(ConfigurationError::MissingSimulatedProfile)?;
    let compensated =
        compensation::compensate(store, profile, reference, config.injection_time)?;
    Ok((compensated.store, Some(compensated.record)))
}

/// Run the complete analysis of `experiment`
pub fn analyze(experiment: &Experiment) -> Result<Analysis> {
    let config = experiment.config();
    info!(
        "Analyzing {} ({} concentrations, window {} %)",
        config.protein_name,
        experiment.store().len(),
        config.window_width * 100.0
    );

    let (store, compensation) = prepare_store(experiment)?;

    let peaks = peak::locate_peaks(&store, &config.peak_determination, config.injection_time)?;

    let summaries = window::summarize_store(
        &store,
        &peaks,
        config.window_width,
        config.injection_time,
    )?;

    let points = ratio::compute_r(&summaries, config.peak_determination.exclusion_threshold())?;

    let (concentrations, r_values) = ratio::fit_input(&points);
    let fit = fitting::fit_kd(&concentrations, &r_values, config.ligand_concentration)?;

    Ok(Analysis {
        store,
        compensation,
        peaks,
        summaries,
        points,
        fit,
    })
}
