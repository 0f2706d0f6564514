use anyhow::Result;
use log::info;
use std::path::PathBuf;

use actis_kd::experiment::ExperimentInputs;
use actis_kd::validator::validate_data_dir;

/// Validate inputs and data directory
pub fn run(data_dir: PathBuf, inputs: Option<PathBuf>) -> Result<()> {
    let inputs_file = super::inputs_path(&data_dir, inputs);

    info!("ACTIS Kd Validator");
    info!("==================");
    info!("Data: {}", data_dir.display());
    info!("Inputs: {}", inputs_file.display());

    let inputs = match ExperimentInputs::from_file(&inputs_file) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    };

    match validate_data_dir(&data_dir, &inputs) {
        Ok(report) => {
            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
