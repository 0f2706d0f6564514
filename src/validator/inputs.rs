use crate::experiment::{ExperimentInputs, PeakDetermination};

use super::{ValidationCheck, ValidationReport};

const REQUIRED_FIELDS: [&str; 3] = ["injection_time", "protein_name", "ligand_concentration"];

/// Checks on the input file alone
pub(crate) fn check_inputs(inputs: &ExperimentInputs, report: &mut ValidationReport) {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| match *field {
            "injection_time" => inputs.injection_time.is_none(),
            "protein_name" => inputs
                .protein_name
                .as_deref()
                .map(|s| s.trim().is_empty())
                .unwrap_or(true),
            _ => inputs.ligand_concentration.is_none(),
        })
        .collect();
    if missing.is_empty() {
        report.add_check(ValidationCheck::ok("Required fields present"));
    } else {
        report.add_check(ValidationCheck::failed(
            "Required fields present",
            format!("missing {}", missing.join(", ")),
        ));
    }

    let config = match inputs.to_config() {
        Ok(config) => {
            report.add_check(ValidationCheck::ok("Inputs form a valid configuration"));
            config
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "Inputs form a valid configuration",
                e.to_string(),
            ));
            return;
        }
    };

    if inputs.data_type.is_none() {
        report.add_check(ValidationCheck::warning(
            "Type of data",
            "not set, assuming fluorescence (F)",
        ));
    }
    if config.window_width == 0.0 {
        report.add_check(ValidationCheck::warning(
            "Window width",
            "0 % selects the single sample at the peak time (0.5 s tolerance)",
        ));
    }
    if let PeakDetermination::Programmatic {
        exclude_below_reference: true,
        reference_concentration,
    } = config.peak_determination
    {
        if reference_concentration > 0.0 {
            report.add_check(ValidationCheck::warning(
                "Programmatic reference",
                format!(
                    "concentrations below {} get no R value and are left out of the fit",
                    reference_concentration
                ),
            ));
        }
    }
}
