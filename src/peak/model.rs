use serde::{Deserialize, Serialize};

use crate::traces::Concentration;

/// Where the peak times came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PeakSource {
    /// One user-supplied time per concentration
    Manual,
    /// Detected on the first run of a reference concentration
    Programmatic {
        /// Reference concentration
        reference: Concentration,
        /// Signal at the detected maximum
        peak_signal: f64,
    },
}

/// Resolved peak time for one concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakAssignment {
    /// Concentration
    pub concentration: Concentration,
    /// Peak time in seconds since injection
    pub peak_time: f64,
}

/// Mapping from concentration to propagation peak time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakModel {
    assignments: Vec<PeakAssignment>,
    source: PeakSource,
}

impl PeakModel {
    pub(crate) fn new(assignments: Vec<PeakAssignment>, source: PeakSource) -> Self {
        Self {
            assignments,
            source,
        }
    }

    /// Peak time of the concentration matching `value`
    pub fn peak_time(&self, value: f64) -> Option<f64> {
        self.assignments
            .iter()
            .find(|a| a.concentration.matches(value))
            .map(|a| a.peak_time)
    }

    /// Assignments in ascending concentration order
    pub fn assignments(&self) -> &[PeakAssignment] {
        &self.assignments
    }

    /// Origin of the peak times
    pub fn source(&self) -> &PeakSource {
        &self.source
    }

    /// The common peak time when every concentration shares one
    pub fn uniform_peak_time(&self) -> Option<f64> {
        let first = self.assignments.first()?.peak_time;
        self.assignments
            .iter()
            .all(|a| a.peak_time == first)
            .then_some(first)
    }
}
