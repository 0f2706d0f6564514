use std::path::Path;

use super::*;
use crate::experiment::ExperimentInputs;
use crate::traces::{table, Concentration, ConcentrationSeries, Trace, TraceStore};

const INPUTS: &str = r#"
    injection_time = 5.0
    protein_name = "BSA"
    ligand_concentration = 5.0
    window_width = 10
    peak_determination = "P"
    programmatic_peak_concentration = 0
"#;

fn write_data(dir: &Path, concentrations: &[f64]) {
    let series = concentrations
        .iter()
        .map(|&c| {
            let run = Trace::new(vec![0.0, 5.0, 10.0, 15.0], vec![1.0, 1.0, 10.0 - c, 1.0]).unwrap();
            ConcentrationSeries::new(Concentration::micromolar(c), vec![run.clone(), run]).unwrap()
        })
        .collect();
    table::write_store_dir(dir, &TraceStore::new(series).unwrap()).unwrap();
}

#[test]
fn test_validation_report_display() {
    let mut report = ValidationReport::new("BSA");
    report.add_check(ValidationCheck::ok("Test check 1"));
    report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
    report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

    let output = format!("{}", report);
    assert!(output.contains("✓"));
    assert!(output.contains("⚠"));
    assert!(output.contains("✗"));
    assert!(output.contains("1 passed, 1 warnings, 1 failed"));
    assert!(output.contains("Validation FAILED"));
}

#[test]
fn test_valid_inputs() {
    let inputs = ExperimentInputs::from_toml_str(INPUTS).unwrap();
    let report = validate_inputs(&inputs);
    assert!(!report.has_failures());
    assert_eq!(
        report.status_of("Inputs form a valid configuration"),
        Some(&CheckStatus::Ok)
    );
    // data_type left unset
    assert!(report.has_warnings());
}

#[test]
fn test_missing_required_fields_reported() {
    let inputs = ExperimentInputs::from_toml_str("window_width = 2").unwrap();
    let report = validate_inputs(&inputs);
    assert!(matches!(
        report.status_of("Required fields present"),
        Some(CheckStatus::Failed(msg)) if msg.contains("injection_time") && msg.contains("protein_name")
    ));
    assert!(report.has_failures());
}

#[test]
fn test_data_dir_passes() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), &[0.0, 1.0, 2.0]);
    let inputs = ExperimentInputs::from_toml_str(INPUTS).unwrap();

    let report = validate_data_dir(dir.path(), &inputs).unwrap();
    assert!(!report.has_failures(), "{}", report);
    assert_eq!(
        report.status_of("Programmatic peak reference present"),
        Some(&CheckStatus::Ok)
    );
}

#[test]
fn test_manual_peak_count_checked_against_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), &[0.0, 1.0, 2.0]);
    let inputs = ExperimentInputs::from_toml_str(
        &INPUTS.replace("peak_determination = \"P\"", "peak_determination = \"M\"\nmanual_peaks = \"10, 10\""),
    )
    .unwrap();

    let report = validate_data_dir(dir.path(), &inputs).unwrap();
    assert!(matches!(
        report.status_of("Manual peak count"),
        Some(CheckStatus::Failed(_))
    ));
}

#[test]
fn test_compensation_needs_profile_and_reference() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), &[0.0, 1.0]);
    let inputs = ExperimentInputs::from_toml_str(&format!(
        "{}\ncompensation = true\nnormalization_concentration = 3",
        INPUTS
    ))
    .unwrap();

    let report = validate_data_dir(dir.path(), &inputs).unwrap();
    assert!(matches!(
        report.status_of("Simulated profile present"),
        Some(CheckStatus::Failed(_))
    ));
    assert!(matches!(
        report.status_of("Normalization reference present"),
        Some(CheckStatus::Failed(_))
    ));
}

#[test]
fn test_missing_directory() {
    let inputs = ExperimentInputs::from_toml_str(INPUTS).unwrap();
    let report = validate_data_dir(Path::new("/nonexistent/actis/data"), &inputs).unwrap();
    assert!(report.has_failures());
}

#[test]
fn test_checks_grouped_by_section() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), &[0.0, 1.0, 2.0]);
    let inputs = ExperimentInputs::from_toml_str(INPUTS).unwrap();

    let report = validate_data_dir(dir.path(), &inputs).unwrap();
    assert!(report.section(Section::Inputs).count() > 0);
    assert!(report
        .section(Section::Data)
        .any(|c| c.name == "Trace tables readable"));
    assert!(report
        .section(Section::References)
        .any(|c| c.name == "Programmatic peak reference present"));

    let text = report.to_string();
    assert!(text.contains("Data directory"));
    assert!(text.contains("References"));
}

#[test]
fn test_verdict_and_tally() {
    let mut report = ValidationReport::new("BSA");
    report.add_check(ValidationCheck::ok("a"));
    assert_eq!(report.verdict(), Verdict::Passed);

    report.add_check(ValidationCheck::warning("b", "careful"));
    assert_eq!(report.verdict(), Verdict::PassedWithWarnings);
    assert!(!report.has_failures());

    report.add_check(ValidationCheck::failed("c", "broken"));
    assert_eq!(report.verdict(), Verdict::Failed);
    assert_eq!(
        report.tally(),
        Tally {
            passed: 1,
            warnings: 1,
            failed: 1
        }
    );
}
