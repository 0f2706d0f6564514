use chrono::Utc;
use log::{debug, info, warn};

use super::{CompensationError, CompensationRecord, SimulatedProfile};
use crate::traces::{Trace, TraceStore};
use crate::window::stats;

/// Compensated store plus the record to persist alongside it
#[derive(Debug, Clone)]
pub struct CompensatedData {
    /// Corrected traces, flagged as compensated
    pub store: TraceStore,
    /// Marker describing the applied correction
    pub record: CompensationRecord,
}

/// Correct every run of `store` against `profile`.
///
/// Each run is background subtracted, weighted by the interpolated profile
/// at its sample times, clamped at zero and finally rescaled so its summed
/// signal equals that of the first run of `reference_concentration`.
pub fn compensate(
    store: &TraceStore,
    profile: &SimulatedProfile,
    reference_concentration: f64,
    injection_time: f64,
) -> Result<CompensatedData, CompensationError> {
    if store.is_compensated() {
        return Err(CompensationError::AlreadyCompensated);
    }
    let reference = store
        .find(reference_concentration)
        .ok_or(CompensationError::MissingReference(reference_concentration))?;

    info!(
        "Compensating {} concentrations against a {}-point profile (reference {})",
        store.len(),
        profile.len(),
        reference.concentration()
    );

    let spline = profile.interpolant();
    let weight = |trace: &Trace| -> Vec<f64> {
        let background: Vec<f64> = trace.background(injection_time).map(|(_, s)| s).collect();
        let offset = if background.is_empty() {
            warn!("Run has no samples before injection; background taken as 0");
            0.0
        } else {
            stats::mean(&background)
        };
        trace
            .samples()
            .map(|(t, s)| ((s - offset) * spline.evaluate(t)).max(0.0))
            .collect()
    };

    let reference_signals = weight(reference.first_run());
    let reference_area: f64 = reference_signals.iter().sum();
    if reference_area <= 0.0 {
        return Err(CompensationError::ZeroSignalArea {
            concentration: reference.concentration().to_string(),
            run: 1,
        });
    }
    debug!("Reference area: {:.6}", reference_area);

    let mut corrected = Vec::with_capacity(store.len());
    for series in store.series() {
        let is_reference = series.concentration().matches(reference_concentration);
        let mut runs = Vec::with_capacity(series.run_count());

        for (index, trace) in series.runs().iter().enumerate() {
            if is_reference && index == 0 {
                runs.push(trace.with_signals(reference_signals.clone()));
                continue;
            }
            let signals = weight(trace);
            let area: f64 = signals.iter().sum();
            if area <= 0.0 {
                return Err(CompensationError::ZeroSignalArea {
                    concentration: series.concentration().to_string(),
                    run: index + 1,
                });
            }
            let scale = reference_area / area;
            debug!(
                "{} run {}: area {:.6}, scale {:.6}",
                series.concentration(),
                index + 1,
                area,
                scale
            );
            runs.push(trace.with_signals(signals.into_iter().map(|s| s * scale).collect()));
        }

        corrected.push(series.with_runs(runs));
    }

    Ok(CompensatedData {
        store: TraceStore::into_compensated(corrected),
        record: CompensationRecord {
            compensated_at: Utc::now(),
            reference_concentration,
            injection_time,
            reference_area,
            profile_points: profile.len(),
        },
    })
}
