use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use actis_kd::experiment::{AnalysisConfig, ExperimentInputs};

mod analyze;
mod compensate;
mod demo;
mod info;
mod validate;

/// Name of the inputs file looked up inside a data directory
pub const DEFAULT_INPUTS_FILE: &str = "inputs.toml";

/// ACTIS Kd - capillary affinity titration analysis
#[derive(Parser)]
#[command(name = "actis-kd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the complete analysis of a titration data directory
    Analyze {
        /// Directory holding one table per concentration
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,

        /// Experiment inputs (defaults to DATA_DIR/inputs.toml)
        #[arg(short, long, value_name = "FILE")]
        inputs: Option<PathBuf>,

        /// Output directory (defaults to the next free DATA_DIR_results)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Write into --output even if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Compensate raw tables against the simulated profile
    Compensate {
        /// Directory holding the raw tables and the simulated profile
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,

        /// Directory receiving the compensated tables
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Experiment inputs (defaults to DATA_DIR/inputs.toml)
        #[arg(short, long, value_name = "FILE")]
        inputs: Option<PathBuf>,
    },

    /// Validate inputs and data directory without analyzing
    Validate {
        /// Directory holding one table per concentration
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,

        /// Experiment inputs (defaults to DATA_DIR/inputs.toml)
        #[arg(short, long, value_name = "FILE")]
        inputs: Option<PathBuf>,
    },

    /// Display information about a data directory
    Info {
        /// Directory holding one table per concentration
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,
    },

    /// Generate a synthetic titration data set
    Demo {
        /// Directory to create
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Dissociation constant used to generate the signals
        #[arg(long, default_value_t = 2.0)]
        kd: f64,

        /// Runs per concentration
        #[arg(long, default_value_t = 3)]
        runs: usize,
    },
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            data_dir,
            inputs,
            output,
            force,
        } => analyze::run(data_dir, inputs, output, force),
        Commands::Compensate {
            data_dir,
            output_dir,
            inputs,
        } => compensate::run(data_dir, output_dir, inputs),
        Commands::Validate { data_dir, inputs } => validate::run(data_dir, inputs),
        Commands::Info { data_dir } => info::run(data_dir),
        Commands::Demo {
            output_dir,
            kd,
            runs,
        } => demo::run(output_dir, kd, runs),
    }
}

/// `--inputs` or the inputs file inside the data directory
fn inputs_path(data_dir: &Path, inputs: Option<PathBuf>) -> PathBuf {
    inputs.unwrap_or_else(|| data_dir.join(DEFAULT_INPUTS_FILE))
}

fn load_inputs(path: &Path) -> Result<(ExperimentInputs, AnalysisConfig)> {
    let inputs = ExperimentInputs::from_file(path)
        .with_context(|| format!("Failed to read inputs file: {}", path.display()))?;
    let config = inputs
        .to_config()
        .with_context(|| format!("Invalid inputs in {}", path.display()))?;
    Ok((inputs, config))
}
