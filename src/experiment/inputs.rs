//! Experiment input file.
//!
//! Fields follow the order of the original inputs sheet so a file written by
//! [`ExperimentInputs::to_toml_string`] reads like it:
//!
//! ```toml
//! # inputs.toml
//! propagation_flow_rate = "µL/min"
//! injection_flow_rate = "µL/min"
//! injection_time = 10.0
//! protein_name = "BSA"
//! ligand_name = "fluorescein"
//! ligand_concentration = 5.0
//! concentration_unit = "µM"
//! data_type = "F"
//! compensation = false
//! window_width = 2
//! peak_determination = "P"
//! programmatic_peak_concentration = 0.1
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::out_of_range;
use super::{
    AnalysisConfig, CompensationSetting, ConfigurationError, DataType, PeakDetermination,
};

/// A numeric input that may arrive as text (spreadsheet-style inputs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    /// Already a number
    Number(f64),
    /// Text that should contain a number
    Text(String),
}

impl NumericField {
    fn parse(&self, field: &str) -> Result<f64, ConfigurationError> {
        match self {
            NumericField::Number(v) => Ok(*v),
            NumericField::Text(s) => s.trim().parse().map_err(|_| ConfigurationError::NonNumeric {
                field: field.to_string(),
                value: s.clone(),
            }),
        }
    }
}

impl From<f64> for NumericField {
    fn from(v: f64) -> Self {
        NumericField::Number(v)
    }
}

/// Manual peak times, as a list or as a comma-separated string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeakList {
    /// TOML array of numbers
    List(Vec<f64>),
    /// `"50.1, 50.3, 49.8"`
    Text(String),
}

impl PeakList {
    fn parse(&self) -> Result<Vec<f64>, ConfigurationError> {
        match self {
            PeakList::List(v) => Ok(v.clone()),
            PeakList::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| {
                    t.parse().map_err(|_| ConfigurationError::NonNumeric {
                        field: "manual_peaks".to_string(),
                        value: t.to_string(),
                    })
                })
                .collect(),
        }
    }
}

/// Persisted experiment inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentInputs {
    /// Propagation flow rate (descriptive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagation_flow_rate: Option<String>,

    /// Injection flow rate (descriptive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_flow_rate: Option<String>,

    /// Injection time in seconds (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_time: Option<NumericField>,

    /// Separation capillary length (descriptive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_capillary_length: Option<String>,

    /// Separation capillary diameter (descriptive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_capillary_diameter: Option<String>,

    /// Injection loop length (descriptive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_loop_length: Option<String>,

    /// Injection loop diameter (descriptive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_loop_diameter: Option<String>,

    /// Protein name (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_name: Option<String>,

    /// Ligand name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ligand_name: Option<String>,

    /// Number of concentrations, cross-checked against the data when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_concentrations: Option<usize>,

    /// Initial ligand concentration [L]0 (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ligand_concentration: Option<NumericField>,

    /// Concentration unit label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration_unit: Option<String>,

    /// Type of data: "F" or "MS"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// Compensation procedure
    pub compensation: bool,

    /// [P]0 reference for normalization (required with compensation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization_concentration: Option<NumericField>,

    /// Window width in percent of the peak time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<NumericField>,

    /// Determination of peak: "M" or "P"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_determination: Option<String>,

    /// Manually determined peaks (ascending [P]0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_peaks: Option<PeakList>,

    /// [P]0 used to determine the peak programmatically
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programmatic_peak_concentration: Option<NumericField>,

    /// Drop concentrations below the programmatic reference from the fit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_below_reference: Option<bool>,
}

/// Default window width in percent
pub const DEFAULT_WINDOW_WIDTH_PERCENT: f64 = 2.0;

impl ExperimentInputs {
    /// Load inputs from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse inputs from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize inputs back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigurationError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Unit label for concentrations
    pub fn unit(&self) -> &str {
        self.concentration_unit
            .as_deref()
            .unwrap_or(crate::traces::DEFAULT_UNIT)
    }

    /// Convert into a typed, validated [`AnalysisConfig`]
    pub fn to_config(&self) -> Result<AnalysisConfig, ConfigurationError> {
        let injection_time = required(&self.injection_time, "injection_time")?;
        let ligand_concentration = required(&self.ligand_concentration, "ligand_concentration")?;

        let protein_name = self
            .protein_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigurationError::MissingField("protein_name".to_string()))?
            .to_string();

        let window_percent = match &self.window_width {
            Some(field) => field.parse("window_width")?,
            None => DEFAULT_WINDOW_WIDTH_PERCENT,
        };
        if !(0.0..=100.0).contains(&window_percent) {
            return Err(out_of_range("window_width", window_percent, "0 to 100 %"));
        }

        let data_type = match &self.data_type {
            Some(code) => DataType::from_code(code)?,
            None => DataType::default(),
        };

        let compensation = if self.compensation {
            CompensationSetting::Enabled {
                reference_concentration: required(
                    &self.normalization_concentration,
                    "normalization_concentration",
                )?,
            }
        } else {
            CompensationSetting::Disabled
        };

        let mode = self
            .peak_determination
            .as_deref()
            .unwrap_or("P")
            .trim()
            .to_uppercase();
        let peak_determination = match mode.as_str() {
            "M" | "MANUAL" => PeakDetermination::Manual {
                peak_times: self
                    .manual_peaks
                    .as_ref()
                    .ok_or_else(|| ConfigurationError::MissingField("manual_peaks".to_string()))?
                    .parse()?,
            },
            "P" | "PROGRAMMATIC" => PeakDetermination::Programmatic {
                reference_concentration: required(
                    &self.programmatic_peak_concentration,
                    "programmatic_peak_concentration",
                )?,
                exclude_below_reference: self.exclude_below_reference.unwrap_or(true),
            },
            other => {
                return Err(ConfigurationError::UnknownVariant {
                    field: "peak_determination".to_string(),
                    value: other.to_string(),
                    expected: "M, P".to_string(),
                })
            }
        };

        let config = AnalysisConfig {
            injection_time,
            window_width: window_percent / 100.0,
            ligand_concentration,
            data_type,
            compensation,
            peak_determination,
            protein_name,
        };
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for ExperimentInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let number = |v: &Option<NumericField>| match v {
            Some(NumericField::Number(n)) => n.to_string(),
            Some(NumericField::Text(s)) => s.clone(),
            None => String::new(),
        };
        let unit = self.unit();

        writeln!(f, "Propagation flow rate: {}", text(&self.propagation_flow_rate))?;
        writeln!(f, "Injection flow rate: {}", text(&self.injection_flow_rate))?;
        writeln!(f, "Injection time (s): {}", number(&self.injection_time))?;
        writeln!(
            f,
            "Separation capillary length: {}",
            text(&self.separation_capillary_length)
        )?;
        writeln!(
            f,
            "Separation capillary diameter: {}",
            text(&self.separation_capillary_diameter)
        )?;
        writeln!(f, "Injection loop length: {}", text(&self.injection_loop_length))?;
        writeln!(f, "Injection loop diameter: {}", text(&self.injection_loop_diameter))?;
        writeln!(f, "Protein name: {}", text(&self.protein_name))?;
        writeln!(f, "Ligand name: {}", text(&self.ligand_name))?;
        writeln!(
            f,
            "Number of Concentrations: {}",
            self.number_of_concentrations
                .map(|n| n.to_string())
                .unwrap_or_default()
        )?;
        writeln!(
            f,
            "Initial Ligand concentration [L]0 ({}): {}",
            unit,
            number(&self.ligand_concentration)
        )?;
        writeln!(f, "Type of Data: {}", text(&self.data_type))?;
        writeln!(
            f,
            "Compensation procedure: {}",
            if self.compensation { "Y" } else { "N" }
        )?;
        writeln!(
            f,
            "[P]0 reference for MS normalization ({}): {}",
            unit,
            number(&self.normalization_concentration)
        )?;
        writeln!(f, "Window width (%): {}", number(&self.window_width))?;
        writeln!(f, "Determination of peak: {}", text(&self.peak_determination))?;
        let peaks = match &self.manual_peaks {
            Some(PeakList::List(v)) => v
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(","),
            Some(PeakList::Text(s)) => s.clone(),
            None => String::new(),
        };
        writeln!(f, "Manually determined peaks: {}", peaks)?;
        write!(
            f,
            "[P]0 to programmatically determine peak: {}",
            number(&self.programmatic_peak_concentration)
        )
    }
}

fn required(field: &Option<NumericField>, name: &str) -> Result<f64, ConfigurationError> {
    field
        .as_ref()
        .ok_or_else(|| ConfigurationError::MissingField(name.to_string()))?
        .parse(name)
}
