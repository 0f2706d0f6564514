use serde::{Deserialize, Serialize};

use super::{Concentration, ConcentrationSeries, TraceError};

/// In-memory collection of every concentration series of one titration.
///
/// Series are kept sorted by ascending concentration. The `compensated` flag
/// is part of the data: it travels with persisted tables so compensation is
/// never applied twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStore {
    series: Vec<ConcentrationSeries>,
    compensated: bool,
}

impl TraceStore {
    /// Build a store from raw (uncompensated) series
    pub fn new(series: Vec<ConcentrationSeries>) -> Result<Self, TraceError> {
        Self::with_flag(series, false)
    }

    /// Build a store, restoring a persisted compensation flag
    pub fn with_flag(
        mut series: Vec<ConcentrationSeries>,
        compensated: bool,
    ) -> Result<Self, TraceError> {
        series.sort_by(|a, b| a.concentration().value.total_cmp(&b.concentration().value));

        if let Some(dup) = series
            .windows(2)
            .find(|w| w[1].concentration().matches(w[0].concentration().value))
        {
            return Err(TraceError::DuplicateConcentration(
                dup[1].concentration().to_string(),
            ));
        }

        Ok(Self {
            series,
            compensated,
        })
    }

    /// Series in ascending concentration order
    pub fn series(&self) -> &[ConcentrationSeries] {
        &self.series
    }

    /// Number of concentrations
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True if the store holds no concentration
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Concentrations in ascending order
    pub fn concentrations(&self) -> impl Iterator<Item = &Concentration> + '_ {
        self.series.iter().map(|s| s.concentration())
    }

    /// Look up the series recorded at `value`
    pub fn find(&self, value: f64) -> Option<&ConcentrationSeries> {
        self.series.iter().find(|s| s.concentration().matches(value))
    }

    /// Whether the compensation procedure has already been applied
    pub fn is_compensated(&self) -> bool {
        self.compensated
    }

    /// Largest signal over all runs (graph scaling)
    pub fn max_signal(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.runs())
            .map(|r| r.max_signal())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Largest number of runs recorded for any concentration
    pub fn max_runs(&self) -> usize {
        self.series.iter().map(|s| s.run_count()).max().unwrap_or(0)
    }

    /// Unit label shared by the titration (taken from the lowest concentration)
    pub fn unit(&self) -> &str {
        self.series
            .first()
            .map(|s| s.concentration().unit.as_str())
            .unwrap_or(super::DEFAULT_UNIT)
    }

    /// Replace all series and mark the data as compensated
    pub(crate) fn into_compensated(series: Vec<ConcentrationSeries>) -> Self {
        Self {
            series,
            compensated: true,
        }
    }
}
