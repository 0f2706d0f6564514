use std::path::Path;

use crate::experiment::{ExperimentInputs, PeakDetermination};
use crate::traces::table;

use super::{Section, ValidationCheck, ValidationError, ValidationReport};

/// Checks on the data directory, against the inputs when they are valid
pub(crate) fn check_data_dir(
    dir: &Path,
    inputs: &ExperimentInputs,
    report: &mut ValidationReport,
) -> Result<(), ValidationError> {
    report.begin(Section::Data);
    if !dir.is_dir() {
        report.add_check(ValidationCheck::failed(
            "Data directory exists",
            format!("{} is not a directory", dir.display()),
        ));
        return Ok(());
    }
    report.add_check(ValidationCheck::ok("Data directory exists"));

    let files = table::list_series_files(dir)?;
    if files.is_empty() {
        report.add_check(ValidationCheck::failed(
            "Concentration tables found",
            "no '<value> <unit>.csv' tables",
        ));
        return Ok(());
    }
    report.add_check(ValidationCheck::ok(format!(
        "Concentration tables found ({})",
        files.len()
    )));

    if let Some(declared) = inputs.number_of_concentrations {
        if declared == files.len() {
            report.add_check(ValidationCheck::ok("Declared number of concentrations"));
        } else {
            report.add_check(ValidationCheck::failed(
                "Declared number of concentrations",
                format!("{} declared, {} tables found", declared, files.len()),
            ));
        }
    }

    let config = inputs.to_config().ok();

    // Count check runs before any trace is parsed
    if let Some(PeakDetermination::Manual { peak_times }) =
        config.as_ref().map(|c| &c.peak_determination)
    {
        if peak_times.len() == files.len() {
            report.add_check(ValidationCheck::ok("Manual peak count"));
        } else {
            report.add_check(ValidationCheck::failed(
                "Manual peak count",
                format!(
                    "{} manual peaks for {} concentrations",
                    peak_times.len(),
                    files.len()
                ),
            ));
        }
    }

    let dataset = match table::read_dataset_dir(dir) {
        Ok(dataset) => {
            report.add_check(ValidationCheck::ok("Trace tables readable"));
            dataset
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("Trace tables readable", e.to_string()));
            return Ok(());
        }
    };
    let store = &dataset.store;

    let single_run: Vec<String> = store
        .series()
        .iter()
        .filter(|s| s.run_count() == 1)
        .map(|s| s.concentration().to_string())
        .collect();
    if !single_run.is_empty() {
        report.add_check(ValidationCheck::warning(
            "Replicate runs",
            format!("single run (standard deviation 0) for {}", single_run.join(", ")),
        ));
    }

    let Some(config) = config else {
        return Ok(());
    };
    report.begin(Section::References);

    let without_background = store
        .series()
        .iter()
        .flat_map(|s| s.runs())
        .filter(|r| r.background(config.injection_time).next().is_none())
        .count();
    if without_background > 0 {
        report.add_check(ValidationCheck::warning(
            "Background region",
            format!(
                "{} run(s) have no samples before the injection time",
                without_background
            ),
        ));
    }

    if let PeakDetermination::Programmatic {
        reference_concentration,
        ..
    } = config.peak_determination
    {
        if store.find(reference_concentration).is_some() {
            report.add_check(ValidationCheck::ok("Programmatic peak reference present"));
        } else {
            report.add_check(ValidationCheck::failed(
                "Programmatic peak reference present",
                format!("no table for {}", reference_concentration),
            ));
        }
    }

    if let Some(reference) = config.compensation.reference_concentration() {
        if store.is_compensated() {
            report.add_check(ValidationCheck::warning(
                "Compensation",
                "data already compensated, the correction will be skipped",
            ));
        } else {
            if dataset.profile.is_some() {
                report.add_check(ValidationCheck::ok("Simulated profile present"));
            } else {
                report.add_check(ValidationCheck::failed(
                    "Simulated profile present",
                    "compensation requested but no simulated*.csv table found",
                ));
            }
            if store.find(reference).is_some() {
                report.add_check(ValidationCheck::ok("Normalization reference present"));
            } else {
                report.add_check(ValidationCheck::failed(
                    "Normalization reference present",
                    format!("no table for {}", reference),
                ));
            }
        }
    }

    Ok(())
}
