use super::*;
use crate::traces::{Concentration, ConcentrationSeries, Trace};

const PROGRAMMATIC_INPUTS: &str = r#"
    injection_time = 10.0
    protein_name = "BSA"
    ligand_concentration = 5
    data_type = "F"
    window_width = 2
    peak_determination = "P"
    programmatic_peak_concentration = 0.1
"#;

fn store(n: usize) -> TraceStore {
    let run = Trace::new(vec![0.0, 10.0, 20.0], vec![0.0, 1.0, 0.0]).unwrap();
    TraceStore::new(
        (0..n)
            .map(|i| {
                ConcentrationSeries::new(Concentration::micromolar(i as f64), vec![run.clone()])
                    .unwrap()
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_parse_programmatic_inputs() {
    let inputs = ExperimentInputs::from_toml_str(PROGRAMMATIC_INPUTS).unwrap();
    let config = inputs.to_config().unwrap();

    assert_eq!(config.injection_time, 10.0);
    assert_eq!(config.ligand_concentration, 5.0);
    assert!((config.window_width - 0.02).abs() < 1e-15);
    assert_eq!(config.data_type, DataType::Fluorescence);
    assert_eq!(config.compensation, CompensationSetting::Disabled);
    assert_eq!(
        config.peak_determination,
        PeakDetermination::Programmatic {
            reference_concentration: 0.1,
            exclude_below_reference: true
        }
    );
    assert_eq!(config.peak_determination.exclusion_threshold(), Some(0.1));
}

#[test]
fn test_parse_manual_peaks_from_text() {
    let toml = r#"
        injection_time = "10"
        protein_name = "BSA"
        ligand_concentration = 5.0
        peak_determination = "M"
        manual_peaks = "50.5, 51, 52.25"
    "#;
    let config = ExperimentInputs::from_toml_str(toml)
        .unwrap()
        .to_config()
        .unwrap();

    assert_eq!(
        config.peak_determination,
        PeakDetermination::Manual {
            peak_times: vec![50.5, 51.0, 52.25]
        }
    );
    assert_eq!(config.peak_determination.exclusion_threshold(), None);
}

#[test]
fn test_non_numeric_required_field() {
    let toml = r#"
        injection_time = "ten"
        protein_name = "BSA"
        ligand_concentration = 5.0
        programmatic_peak_concentration = 1.0
    "#;
    let err = ExperimentInputs::from_toml_str(toml)
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::NonNumeric { ref field, .. } if field == "injection_time"));
}

#[test]
fn test_missing_required_fields() {
    let err = ExperimentInputs::from_toml_str("protein_name = \"BSA\"")
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::MissingField(ref f) if f == "injection_time"));

    let toml = r#"
        injection_time = 10.0
        protein_name = "BSA"
        ligand_concentration = 5.0
        compensation = true
        programmatic_peak_concentration = 1.0
    "#;
    let err = ExperimentInputs::from_toml_str(toml)
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(
        matches!(err, ConfigurationError::MissingField(ref f) if f == "normalization_concentration")
    );
}

#[test]
fn test_window_width_out_of_range() {
    let toml = format!("{}\nwindow_width = 150", PROGRAMMATIC_INPUTS.replace("window_width = 2", ""));
    let err = ExperimentInputs::from_toml_str(&toml)
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::OutOfRange { .. }));
}

#[test]
fn test_unknown_peak_mode() {
    let toml = PROGRAMMATIC_INPUTS.replace("peak_determination = \"P\"", "peak_determination = \"X\"");
    let err = ExperimentInputs::from_toml_str(&toml)
        .unwrap()
        .to_config()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownVariant { .. }));
}

#[test]
fn test_inputs_toml_roundtrip() {
    let inputs = ExperimentInputs::from_toml_str(PROGRAMMATIC_INPUTS).unwrap();
    let text = inputs.to_toml_string().unwrap();
    let restored = ExperimentInputs::from_toml_str(&text).unwrap();
    assert_eq!(restored.to_config().unwrap(), inputs.to_config().unwrap());
}

#[test]
fn test_manual_peak_count_mismatch() {
    let config = AnalysisConfig::manual(10.0, 0.02, 5.0, vec![50.0, 51.0]);
    let err = Experiment::new(store(3), config, None).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::PeakCountMismatch {
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn test_manual_peak_before_injection() {
    let config = AnalysisConfig::manual(10.0, 0.02, 5.0, vec![50.0, 5.0]);
    let err = Experiment::new(store(2), config, None).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::PeakBeforeInjection { position: 2, .. }
    ));
}

#[test]
fn test_compensation_requires_profile() {
    let mut config = AnalysisConfig::programmatic(10.0, 0.02, 5.0, 0.0);
    config.compensation = CompensationSetting::Enabled {
        reference_concentration: 1.0,
    };
    let err = Experiment::new(store(2), config, None).unwrap_err();
    assert!(matches!(err, ConfigurationError::MissingSimulatedProfile));
}

#[test]
fn test_declared_concentration_count() {
    let toml = format!("{}\nnumber_of_concentrations = 4", PROGRAMMATIC_INPUTS);
    let inputs = ExperimentInputs::from_toml_str(&toml).unwrap();
    let err = Experiment::from_inputs(store(3), &inputs, None).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::ConcentrationCountMismatch {
            declared: 4,
            found: 3
        }
    ));
}
