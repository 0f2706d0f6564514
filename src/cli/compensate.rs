use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use actis_kd::compensation;
use actis_kd::traces::table;

/// Write compensated tables and the compensation marker
pub fn run(data_dir: PathBuf, output_dir: PathBuf, inputs: Option<PathBuf>) -> Result<()> {
    let inputs_file = super::inputs_path(&data_dir, inputs);
    let (_, config) = super::load_inputs(&inputs_file)?;

    let Some(reference) = config.compensation.reference_concentration() else {
        anyhow::bail!(
            "Compensation is not enabled in {}",
            inputs_file.display()
        );
    };

    let dataset = table::read_dataset_dir(&data_dir)
        .with_context(|| format!("Failed to load data from {}", data_dir.display()))?;
    if dataset.store.is_compensated() {
        anyhow::bail!("Data in {} is already compensated", data_dir.display());
    }
    let profile = dataset.profile.as_ref().with_context(|| {
        format!("No simulated profile found in {}", data_dir.display())
    })?;

    let compensated = compensation::compensate(
        &dataset.store,
        profile,
        reference,
        config.injection_time,
    )
    .context("Compensation failed")?;

    table::write_store_dir(&output_dir, &compensated.store)
        .with_context(|| format!("Failed to write tables to {}", output_dir.display()))?;
    let marker = compensated
        .record
        .write_to_dir(&output_dir)
        .context("Failed to write compensation marker")?;
    std::fs::copy(&inputs_file, output_dir.join(super::DEFAULT_INPUTS_FILE))
        .context("Failed to copy inputs file")?;
    info!("Marker: {}", marker.display());

    println!(
        "Compensated {} concentrations (reference {}, area {:.4})",
        compensated.store.len(),
        reference,
        compensated.record.reference_area
    );
    println!("Output: {}", output_dir.display());
    Ok(())
}
