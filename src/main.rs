//! # ACTIS Kd
//!
//! Command-line front end of the `actis_kd` library.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a synthetic titration set
//! actis-kd demo demo_data
//!
//! # Check and analyze it
//! actis-kd validate demo_data --inputs demo_data/inputs.toml
//! actis-kd -v analyze demo_data --inputs demo_data/inputs.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
