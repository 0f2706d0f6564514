use serde::{Deserialize, Serialize};

use super::ConfigurationError;

/// Kind of detector signal recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Laser-induced fluorescence
    #[default]
    Fluorescence,
    /// Mass spectrometry
    MassSpec,
}

impl DataType {
    /// Short code used in input files ("F" or "MS")
    pub fn code(&self) -> &'static str {
        match self {
            DataType::Fluorescence => "F",
            DataType::MassSpec => "MS",
        }
    }

    /// Parse the short code used in input files
    pub fn from_code(code: &str) -> Result<Self, ConfigurationError> {
        match code.trim().to_uppercase().as_str() {
            "F" | "FLUORESCENCE" => Ok(DataType::Fluorescence),
            "MS" | "S" | "MASS SPEC" => Ok(DataType::MassSpec),
            other => Err(ConfigurationError::UnknownVariant {
                field: "data_type".to_string(),
                value: other.to_string(),
                expected: "F, MS".to_string(),
            }),
        }
    }

    /// Y axis label for separagram plots
    pub fn signal_label(&self) -> &'static str {
        match self {
            DataType::Fluorescence => "Fluorescence (a.u.)",
            DataType::MassSpec => "MS intensity (a.u.)",
        }
    }
}

/// Whether raw signals are corrected against a simulated profile first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CompensationSetting {
    /// Signals are used as recorded
    #[default]
    Disabled,
    /// Signals are compensated; areas are normalized to this concentration's first run
    Enabled {
        /// [P]0 reference for normalization
        reference_concentration: f64,
    },
}

impl CompensationSetting {
    /// Reference concentration if compensation is enabled
    pub fn reference_concentration(&self) -> Option<f64> {
        match self {
            CompensationSetting::Disabled => None,
            CompensationSetting::Enabled {
                reference_concentration,
            } => Some(*reference_concentration),
        }
    }

    /// True when compensation is requested
    pub fn is_enabled(&self) -> bool {
        matches!(self, CompensationSetting::Enabled { .. })
    }
}

/// Source of the peak time for each concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PeakDetermination {
    /// One peak time per concentration, ascending concentration order
    Manual {
        /// Propagation peak times in seconds, each at or after the injection time
        peak_times: Vec<f64>,
    },
    /// Peak taken from the first run of a reference concentration and applied to all
    Programmatic {
        /// [P]0 whose first run defines the peak
        reference_concentration: f64,
        /// Concentrations below the reference receive no R value
        exclude_below_reference: bool,
    },
}

impl PeakDetermination {
    /// Short code used in input files ("M" or "P")
    pub fn code(&self) -> &'static str {
        match self {
            PeakDetermination::Manual { .. } => "M",
            PeakDetermination::Programmatic { .. } => "P",
        }
    }

    /// Concentrations strictly below this value are excluded from the fit
    pub fn exclusion_threshold(&self) -> Option<f64> {
        match self {
            PeakDetermination::Programmatic {
                reference_concentration,
                exclude_below_reference: true,
            } => Some(*reference_concentration),
            _ => None,
        }
    }
}

/// Typed scalar configuration of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Injection time in seconds; samples before it form the background
    pub injection_time: f64,

    /// Peak window half-width as a fraction of the peak time (0 = exact sample)
    pub window_width: f64,

    /// Initial ligand concentration [L]0, same unit as the protein concentrations
    pub ligand_concentration: f64,

    /// Detector type (labels only)
    pub data_type: DataType,

    /// Compensation procedure
    pub compensation: CompensationSetting,

    /// How peak times are obtained
    pub peak_determination: PeakDetermination,

    /// Protein name used in plot labels
    pub protein_name: String,
}

impl AnalysisConfig {
    /// Minimal programmatic configuration, handy for tests and library use
    pub fn programmatic(
        injection_time: f64,
        window_width: f64,
        ligand_concentration: f64,
        reference_concentration: f64,
    ) -> Self {
        Self {
            injection_time,
            window_width,
            ligand_concentration,
            data_type: DataType::default(),
            compensation: CompensationSetting::Disabled,
            peak_determination: PeakDetermination::Programmatic {
                reference_concentration,
                exclude_below_reference: true,
            },
            protein_name: "P".to_string(),
        }
    }

    /// Minimal manual configuration
    pub fn manual(
        injection_time: f64,
        window_width: f64,
        ligand_concentration: f64,
        peak_times: Vec<f64>,
    ) -> Self {
        Self {
            peak_determination: PeakDetermination::Manual { peak_times },
            ..Self::programmatic(injection_time, window_width, ligand_concentration, 0.0)
        }
    }

    /// Check the data-independent constraints
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.injection_time.is_finite() || self.injection_time < 0.0 {
            return Err(out_of_range("injection_time", self.injection_time, ">= 0 s"));
        }
        if !(0.0..=1.0).contains(&self.window_width) {
            return Err(out_of_range("window_width", self.window_width, "0 to 100 %"));
        }
        if !self.ligand_concentration.is_finite() || self.ligand_concentration <= 0.0 {
            return Err(out_of_range(
                "ligand_concentration",
                self.ligand_concentration,
                "> 0",
            ));
        }

        if let PeakDetermination::Manual { peak_times } = &self.peak_determination {
            for (index, &time) in peak_times.iter().enumerate() {
                if !time.is_finite() || time < self.injection_time {
                    return Err(ConfigurationError::PeakBeforeInjection {
                        position: index + 1,
                        time,
                        injection_time: self.injection_time,
                    });
                }
            }
        }

        Ok(())
    }

    /// Manual peak times must match the number of concentrations
    pub fn check_concentration_count(&self, concentrations: usize) -> Result<(), ConfigurationError> {
        if let PeakDetermination::Manual { peak_times } = &self.peak_determination {
            if peak_times.len() != concentrations {
                return Err(ConfigurationError::PeakCountMismatch {
                    expected: concentrations,
                    found: peak_times.len(),
                });
            }
        }
        Ok(())
    }
}

pub(super) fn out_of_range(field: &str, value: f64, expected: &str) -> ConfigurationError {
    ConfigurationError::OutOfRange {
        field: field.to_string(),
        value,
        expected: expected.to_string(),
    }
}
