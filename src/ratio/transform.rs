use log::debug;
use serde::{Deserialize, Serialize};

use super::RatioError;
use crate::traces::Concentration;
use crate::window::SignalSummary;

/// Binding ratio of one concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RPoint {
    /// Concentration
    pub concentration: Concentration,
    /// Mean window signal S
    pub signal: f64,
    /// R value, `None` when excluded from the transform
    pub r: Option<f64>,
    /// Propagated standard deviation of R
    pub r_stdev: Option<f64>,
    /// 100 * r_stdev / R, undefined when R is 0
    pub r_relative_stdev: Option<f64>,
}

impl RPoint {
    /// Whether the point takes part in the fit
    pub fn is_included(&self) -> bool {
        self.r.is_some()
    }
}

/// Normalize mean signals to R between the lowest and highest concentration.
///
/// Concentrations strictly below `exclusion_threshold` stay in the output
/// with `r == None`. The remaining points must span at least two
/// concentrations with different mean signals.
pub fn compute_r(
    summaries: &[SignalSummary],
    exclusion_threshold: Option<f64>,
) -> Result<Vec<RPoint>, RatioError> {
    let is_included = |s: &SignalSummary| match exclusion_threshold {
        Some(threshold) => {
            s.concentration.value >= threshold || s.concentration.matches(threshold)
        }
        None => true,
    };

    let included: Vec<&SignalSummary> = summaries.iter().filter(|s| is_included(s)).collect();
    if included.len() < 2 {
        return Err(RatioError::InsufficientPoints(included.len()));
    }

    let (low, high) = match (included.first(), included.last()) {
        (Some(low), Some(high)) => (*low, *high),
        _ => return Err(RatioError::InsufficientPoints(included.len())),
    };
    let (s_low, s_high) = (low.mean, high.mean);
    let (sd_low, sd_high) = (low.stdev, high.stdev);
    let range = s_low - s_high;
    if range == 0.0 {
        return Err(RatioError::DegenerateSignalRange(s_low));
    }
    debug!(
        "R range: S_low {:.4} ({}), S_high {:.4} ({})",
        s_low, low.concentration, s_high, high.concentration
    );

    let points = summaries
        .iter()
        .map(|summary| {
            let s = summary.mean;
            if !is_included(summary) {
                return RPoint {
                    concentration: summary.concentration.clone(),
                    signal: s,
                    r: None,
                    r_stdev: None,
                    r_relative_stdev: None,
                };
            }

            let r = (s - s_high) / range;
            let sd = (summary.stdev.powi(2)
                + ((s - s_low) / range * sd_high).powi(2)
                + ((s_high - s) / range * sd_low).powi(2))
            .sqrt()
                / range.abs();
            RPoint {
                concentration: summary.concentration.clone(),
                signal: s,
                r: Some(r),
                r_stdev: Some(sd),
                r_relative_stdev: (r != 0.0).then(|| 100.0 * sd / r),
            }
        })
        .collect();

    Ok(points)
}

/// `(concentration, R)` pairs of the included points
pub fn fit_input(points: &[RPoint]) -> (Vec<f64>, Vec<f64>) {
    points
        .iter()
        .filter_map(|p| p.r.map(|r| (p.concentration.value, r)))
        .unzip()
}
