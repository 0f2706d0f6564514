//! # actis-kd - Dissociation Constants from Affinity Titration Traces
//!
//! `actis_kd` turns the detector traces of an ACTIS capillary affinity
//! titration into a dissociation constant. Every concentration of the titrant
//! (protein) is recorded in one or more runs; each run is reduced to the mean
//! signal inside a window around the analyte peak, the per-concentration means
//! are normalized to a binding ratio R, and the single-site binding isotherm is
//! fitted to R with Levenberg–Marquardt to recover Kd with its standard error,
//! R² and χ².
//!
//! ## Pipeline
//!
//! ```text
//! TraceStore ──▶ [compensate] ──▶ locate_peaks ──▶ summarize_store ──▶ compute_r ──▶ fit_kd
//!                 (optional)       PeakModel        SignalSummary       RPoint        FitResult
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use actis_kd::prelude::*;
//! use std::path::Path;
//!
//! let dataset = read_dataset_dir(Path::new("BSA"))?;
//! let inputs = ExperimentInputs::from_file(Path::new("BSA/inputs.toml"))?;
//! let experiment = Experiment::from_inputs(dataset.store, &inputs, dataset.profile)?;
//!
//! let analysis = analyze(&experiment)?;
//! println!("{}", ResultBlock::new(&analysis.fit, analysis.store.unit()));
//! # Ok::<(), actis_kd::error::AnalysisError>(())
//! ```
//!
//! ## Data Directory Layout
//!
//! ```text
//! BSA/
//! ├── 0 µM.csv           # raw time, Experiment 1, Experiment 2, ...
//! ├── 0.1 µM.csv
//! ├── ...
//! ├── simulated.csv      # optional reference profile (compensation)
//! └── compensation.json  # present once the tables are compensated
//! ```
//!
//! ## Modules
//!
//! - [`traces`]: trace store and CSV table contract
//! - [`experiment`]: input schema and typed analysis configuration
//! - [`peak`]: peak time resolution and onset diagnostics
//! - [`window`]: peak window averaging and per-concentration statistics
//! - [`compensation`]: simulated-profile correction of raw signals
//! - [`ratio`]: R-transform with error propagation
//! - [`fitting`]: Levenberg–Marquardt solver and the binding isotherm fit
//! - [`pipeline`]: the complete analysis
//! - [`report`]: summary table, result block, plot series
//! - [`validator`]: pre-flight validation report

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
// Allow some patterns common in scientific code
#![allow(clippy::too_many_arguments)]

pub mod compensation;
pub mod error;
pub mod experiment;
pub mod fitting;
pub mod peak;
pub mod pipeline;
pub mod ratio;
pub mod report;
pub mod traces;
pub mod validator;
pub mod window;

mod json_float;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::compensation::{
        compensate, CompensatedData, CompensationError, CompensationRecord, SimulatedProfile,
    };
    pub use crate::error::AnalysisError;
    pub use crate::experiment::{
        AnalysisConfig, CompensationSetting, ConfigurationError, DataType, Experiment,
        ExperimentInputs, PeakDetermination,
    };
    pub use crate::fitting::{binding_isotherm, fit_kd, FitError, FitResult};
    pub use crate::peak::{locate_peaks, PeakError, PeakModel};
    pub use crate::pipeline::{analyze, Analysis};
    pub use crate::ratio::{compute_r, RPoint, RatioError};
    pub use crate::report::{AnalysisReport, PlotData, ResultBlock, SummaryTable};
    pub use crate::traces::table::{read_dataset_dir, write_store_dir};
    pub use crate::traces::{
        Concentration, ConcentrationSeries, Dataset, Trace, TraceError, TraceStore,
    };
    pub use crate::validator::{validate_data_dir, validate_inputs, ValidationReport};
    pub use crate::window::{reduce_window, summarize_store, SignalSummary, WindowError};
}
