use log::{debug, info};

use super::{PeakAssignment, PeakError, PeakModel, PeakSource};
use crate::experiment::{ConfigurationError, PeakDetermination};
use crate::traces::{Trace, TraceStore};

/// Resolve the peak time of every concentration in `store`
pub fn locate_peaks(
    store: &TraceStore,
    determination: &PeakDetermination,
    injection_time: f64,
) -> Result<PeakModel, PeakError> {
    match determination {
        PeakDetermination::Manual { peak_times } => {
            if peak_times.len() != store.len() {
                return Err(ConfigurationError::PeakCountMismatch {
                    expected: store.len(),
                    found: peak_times.len(),
                }
                .into());
            }
            if let Some(index) = peak_times
                .iter()
                .position(|&t| !t.is_finite() || t < injection_time)
            {
                return Err(ConfigurationError::PeakBeforeInjection {
                    position: index + 1,
                    time: peak_times[index],
                    injection_time,
                }
                .into());
            }

            let assignments = store
                .concentrations()
                .zip(peak_times)
                .zip(store.series())
                .map(|((concentration, &time), series)| PeakAssignment {
                    concentration: concentration.clone(),
                    peak_time: snap_to_sample(series.first_run(), time),
                })
                .collect();
            info!("Using {} manual peak times", store.len());
            Ok(PeakModel::new(assignments, PeakSource::Manual))
        }
        PeakDetermination::Programmatic {
            reference_concentration,
            ..
        } => {
            let reference = store
                .find(*reference_concentration)
                .ok_or(PeakError::MissingReference(*reference_concentration))?;
            let (peak_time, peak_signal) = find_max_peak(reference.first_run(), injection_time)
                .ok_or_else(|| PeakError::NoSamplesAfterInjection {
                    concentration: reference.concentration().to_string(),
                    injection_time,
                })?;

            info!(
                "Peak found at {:.3} s after injection on run 1 of {} (signal {:.4})",
                peak_time,
                reference.concentration(),
                peak_signal
            );

            let assignments = store
                .concentrations()
                .map(|concentration| PeakAssignment {
                    concentration: concentration.clone(),
                    peak_time,
                })
                .collect();
            Ok(PeakModel::new(
                assignments,
                PeakSource::Programmatic {
                    reference: reference.concentration().clone(),
                    peak_signal,
                },
            ))
        }
    }
}

/// Last sample time of `trace` at or before `time`.
///
/// Manual peak times are matched against the raw time axis of the first run;
/// a time ahead of every sample is kept as given.
pub fn snap_to_sample(trace: &Trace, time: f64) -> f64 {
    let times = trace.times();
    let index = times.partition_point(|&t| t <= time);
    let snapped = match index {
        0 => time,
        i => times[i - 1],
    };
    if snapped != time {
        debug!("Manual peak time {:.3} s snapped to sample {:.3} s", time, snapped);
    }
    snapped
}

/// Stable argmax over samples at or after injection.
///
/// Returns the propagation time and signal of the first sample carrying the
/// maximum signal.
pub fn find_max_peak(trace: &Trace, injection_time: f64) -> Option<(f64, f64)> {
    let mut best: Option<(f64, f64)> = None;
    for (t, s) in trace.propagation(injection_time) {
        match best {
            Some((_, max)) if s <= max => {}
            _ => best = Some((t, s)),
        }
    }
    if let Some((t, s)) = best {
        debug!("Maximum {:.4} at propagation time {:.3} s", s, t);
    }
    best
}
