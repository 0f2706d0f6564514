use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use actis_kd::experiment::Experiment;
use actis_kd::pipeline;
use actis_kd::report::{self, output_dir, ResultBlock};
use actis_kd::traces::table;

/// Analyze a titration data directory
pub fn run(
    data_dir: PathBuf,
    inputs: Option<PathBuf>,
    output: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let inputs_file = super::inputs_path(&data_dir, inputs);
    let (inputs, config) = super::load_inputs(&inputs_file)?;

    // Peak count is checked against the file count before any table is parsed
    let files = table::list_series_files(&data_dir)
        .with_context(|| format!("Failed to list data directory: {}", data_dir.display()))?;
    config
        .check_concentration_count(files.len())
        .context("Manual peaks do not match the data directory")?;

    let dataset = table::read_dataset_dir(&data_dir)
        .with_context(|| format!("Failed to load data from {}", data_dir.display()))?;
    let experiment = Experiment::from_inputs(dataset.store, &inputs, dataset.profile)
        .context("Invalid experiment configuration")?;

    let analysis = pipeline::analyze(&experiment).context("Analysis failed")?;

    let out_dir = match output {
        Some(dir) => {
            if dir.exists() && !force {
                anyhow::bail!(
                    "Output directory already exists: {} (use --force to overwrite)",
                    dir.display()
                );
            }
            dir
        }
        None => output_dir::next_available(&output_dir::results_dir_for(&data_dir))
            .context("No free results directory")?,
    };

    let files = report::write_outputs(&out_dir, &experiment, &analysis)
        .with_context(|| format!("Failed to write outputs to {}", out_dir.display()))?;
    info!("Summary: {}", files.summary.display());
    info!("Report: {}", files.result.display());
    info!("Plots: {}", files.plots.display());

    println!("{}", config.protein_name);
    println!("{}", "=".repeat(config.protein_name.chars().count()));
    println!("{}", ResultBlock::new(&analysis.fit, analysis.store.unit()));
    println!();
    println!("Results written to {}", out_dir.display());

    Ok(())
}
