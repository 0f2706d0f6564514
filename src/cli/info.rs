use anyhow::{Context, Result};
use std::path::PathBuf;

use actis_kd::traces::table;

/// Display information about a data directory
pub fn run(data_dir: PathBuf) -> Result<()> {
    if !data_dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", data_dir.display());
    }

    let dataset = table::read_dataset_dir(&data_dir)
        .with_context(|| format!("Failed to load data from {}", data_dir.display()))?;
    let store = &dataset.store;

    println!("ACTIS Data Directory");
    println!("====================");
    println!("Directory: {}", data_dir.display());
    println!();

    println!("Concentrations: {}", store.len());
    for series in store.series() {
        let samples: Vec<String> = series.runs().iter().map(|r| r.len().to_string()).collect();
        let first = series.first_run();
        let span = match (first.times().first(), first.times().last()) {
            (Some(start), Some(end)) => format!("{} - {} s", start, end),
            _ => String::new(),
        };
        println!(
            "  {:>12}: {} run(s), samples [{}], {}",
            series.concentration().to_string(),
            series.run_count(),
            samples.join(", "),
            span
        );
    }
    println!();

    println!("Max signal: {:.4}", store.max_signal());
    match &dataset.profile {
        Some(profile) => println!("Simulated profile: {} points", profile.len()),
        None => println!("Simulated profile: none"),
    }
    match &dataset.compensation {
        Some(record) => println!(
            "Compensated: yes ({}, reference {} {})",
            record.compensated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            record.reference_concentration,
            store.unit()
        ),
        None => println!("Compensated: no"),
    }

    Ok(())
}
