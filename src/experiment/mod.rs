//! # Experiment
//!
//! The immutable description of one protein titration: the trace store, the
//! typed analysis configuration and, when compensation is requested, the
//! simulated reference profile. An [`Experiment`] is built once, validated up
//! front, and then only read by the pipeline stages.
//!
//! [`ExperimentInputs`] is the persisted input schema (TOML) from which the
//! configuration is usually derived.

mod config;
mod error;
mod inputs;

#[cfg(test)]
mod tests;

pub use config::{AnalysisConfig, CompensationSetting, DataType, PeakDetermination};
pub use error::ConfigurationError;
pub use inputs::{ExperimentInputs, NumericField, PeakList, DEFAULT_WINDOW_WIDTH_PERCENT};

use crate::compensation::SimulatedProfile;
use crate::traces::TraceStore;

/// One titration ready for analysis
#[derive(Debug, Clone)]
pub struct Experiment {
    store: TraceStore,
    config: AnalysisConfig,
    profile: Option<SimulatedProfile>,
    declared_concentrations: Option<usize>,
}

impl Experiment {
    /// Validate `config` against `store` and assemble the experiment.
    ///
    /// Fails before any trace is processed when the manual peak list length
    /// differs from the number of concentrations, or when compensation is
    /// requested for uncompensated data without a simulated profile.
    pub fn new(
        store: TraceStore,
        config: AnalysisConfig,
        profile: Option<SimulatedProfile>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        if store.is_empty() {
            return Err(ConfigurationError::NoConcentrations);
        }
        config.check_concentration_count(store.len())?;

        if config.compensation.is_enabled() && !store.is_compensated() && profile.is_none() {
            return Err(ConfigurationError::MissingSimulatedProfile);
        }

        Ok(Self {
            store,
            config,
            profile,
            declared_concentrations: None,
        })
    }

    /// Build from persisted inputs, cross-checking the declared concentration count
    pub fn from_inputs(
        store: TraceStore,
        inputs: &ExperimentInputs,
        profile: Option<SimulatedProfile>,
    ) -> Result<Self, ConfigurationError> {
        if let Some(declared) = inputs.number_of_concentrations {
            if declared != store.len() {
                return Err(ConfigurationError::ConcentrationCountMismatch {
                    declared,
                    found: store.len(),
                });
            }
        }
        let mut experiment = Self::new(store, inputs.to_config()?, profile)?;
        experiment.declared_concentrations = inputs.number_of_concentrations;
        Ok(experiment)
    }

    /// Trace data
    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    /// Analysis configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Simulated reference profile, if supplied
    pub fn profile(&self) -> Option<&SimulatedProfile> {
        self.profile.as_ref()
    }

    /// Concentration count declared by the inputs, if any
    pub fn declared_concentrations(&self) -> Option<usize> {
        self.declared_concentrations
    }
}
