use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::path::PathBuf;

use actis_kd::compensation::SimulatedProfile;
use actis_kd::experiment::{ExperimentInputs, NumericField};
use actis_kd::fitting::binding_isotherm;
use actis_kd::traces::{table, Concentration, ConcentrationSeries, Trace, TraceStore};

const CONCENTRATIONS: [f64; 10] = [0.0, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0];
const LIGAND_CONCENTRATION: f64 = 5.0;
const INJECTION_TIME: f64 = 10.0;
const PEAK_TIME: f64 = 60.0;
const PEAK_WIDTH: f64 = 3.0;
const DURATION: f64 = 120.0;
const SAMPLE_STEP: f64 = 0.5;
const BASELINE: f64 = 2.0;
const FREE_SIGNAL: f64 = 100.0;
const BOUND_SIGNAL: f64 = 5.0;

/// Generate a synthetic titration data set
pub fn run(output_dir: PathBuf, kd: f64, runs: usize) -> Result<()> {
    if kd.is_nan() || kd <= 0.0 {
        anyhow::bail!("Kd must be positive, got {}", kd);
    }
    if runs == 0 {
        anyhow::bail!("At least one run per concentration is required");
    }

    info!("ACTIS Kd - synthetic titration demo");
    info!("===================================");

    let store = generate_store(kd, runs).context("Failed to build synthetic traces")?;
    table::write_store_dir(&output_dir, &store)
        .with_context(|| format!("Failed to write tables to {}", output_dir.display()))?;

    let profile = generate_profile().context("Failed to build simulated profile")?;
    let profile_path = output_dir.join(format!("{}.csv", table::SIMULATED_PREFIX));
    table::write_profile(
        File::create(&profile_path)
            .with_context(|| format!("Failed to create {}", profile_path.display()))?,
        &profile,
    )
    .context("Failed to write simulated profile")?;

    let inputs_path = output_dir.join(super::DEFAULT_INPUTS_FILE);
    let text = demo_inputs()
        .to_toml_string()
        .context("Failed to serialize inputs")?;
    std::fs::write(&inputs_path, text)
        .with_context(|| format!("Failed to write {}", inputs_path.display()))?;

    println!(
        "Wrote {} concentrations x {} run(s) to {}",
        store.len(),
        runs,
        output_dir.display()
    );
    println!(
        "Generated with Kd = {} µM, [L]0 = {} µM",
        kd, LIGAND_CONCENTRATION
    );
    println!();
    println!(
        "Analyze with: actis-kd analyze {} --inputs {}",
        output_dir.display(),
        inputs_path.display()
    );
    Ok(())
}

fn generate_store(kd: f64, runs: usize) -> actis_kd::error::Result<TraceStore> {
    let steps = (DURATION / SAMPLE_STEP).round() as usize;
    let times: Vec<f64> = (0..=steps).map(|i| i as f64 * SAMPLE_STEP).collect();

    let mut series = Vec::with_capacity(CONCENTRATIONS.len());
    for (index, &c) in CONCENTRATIONS.iter().enumerate() {
        let r = binding_isotherm(c, kd, LIGAND_CONCENTRATION);
        let height = BOUND_SIGNAL + r * (FREE_SIGNAL - BOUND_SIGNAL);

        let traces = (0..runs)
            .map(|run| {
                let signals = times
                    .iter()
                    .enumerate()
                    .map(|(i, &t)| {
                        let z = (t - PEAK_TIME) / PEAK_WIDTH;
                        BASELINE + height * (-0.5 * z * z).exp() + noise(i, run, index)
                    })
                    .collect();
                Trace::new(times.clone(), signals)
            })
            .collect::<Result<Vec<_>, _>>()?;
        series.push(ConcentrationSeries::new(Concentration::micromolar(c), traces)?);
    }
    Ok(TraceStore::new(series)?)
}

// Deterministic jitter of roughly ±0.3 signal units
fn noise(sample: usize, run: usize, concentration: usize) -> f64 {
    0.3 * (1.7 * sample as f64 + 2.3 * run as f64 + 0.9 * concentration as f64).sin()
}

fn generate_profile() -> actis_kd::error::Result<SimulatedProfile> {
    let steps = (DURATION / SAMPLE_STEP).round() as usize;
    let times: Vec<f64> = (0..=steps).map(|i| i as f64 * SAMPLE_STEP).collect();
    let signals = times
        .iter()
        .map(|&t| {
            let z = (t - PEAK_TIME) / (4.0 * PEAK_WIDTH);
            0.2 + (-0.5 * z * z).exp()
        })
        .collect();
    Ok(SimulatedProfile::new(times, signals)?)
}

fn demo_inputs() -> ExperimentInputs {
    ExperimentInputs {
        propagation_flow_rate: Some("1.0 µL/min".to_string()),
        injection_flow_rate: Some("0.5 µL/min".to_string()),
        injection_time: Some(NumericField::from(INJECTION_TIME)),
        protein_name: Some("Demo protein".to_string()),
        ligand_name: Some("Demo ligand".to_string()),
        number_of_concentrations: Some(CONCENTRATIONS.len()),
        ligand_concentration: Some(NumericField::from(LIGAND_CONCENTRATION)),
        concentration_unit: Some("µM".to_string()),
        data_type: Some("F".to_string()),
        compensation: false,
        normalization_concentration: Some(NumericField::from(1.0)),
        window_width: Some(NumericField::from(2.0)),
        peak_determination: Some("P".to_string()),
        programmatic_peak_concentration: Some(NumericField::from(0.0)),
        ..ExperimentInputs::default()
    }
}
