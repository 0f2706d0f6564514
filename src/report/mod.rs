//! # Report
//!
//! The outputs of an analysis as plain structured data: the per-concentration
//! [`SummaryTable`], the scalar [`ResultBlock`], plot series ([`PlotData`])
//! and the complete [`AnalysisReport`] serialized to JSON.

mod error;
pub mod output_dir;
pub mod plot;
mod result;
mod summary;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

pub use error::ReportError;
pub use plot::{IsothermPlot, IsothermPoint, Overview, PlotData, Separagram, Series};
pub use result::ResultBlock;
pub use summary::{SummaryRow, SummaryTable, SUMMARY_HEADERS};

use crate::experiment::{AnalysisConfig, Experiment};
use crate::fitting::FitResult;
use crate::peak::PeakModel;
use crate::pipeline::Analysis;
use crate::ratio::RPoint;
use crate::window::SignalSummary;

/// Summary table file name
pub const SUMMARY_FILE: &str = "summary.csv";
/// Analysis report file name
pub const RESULT_FILE: &str = "result.json";
/// Plot data file name
pub const PLOTS_FILE: &str = "plots.json";

/// Complete, serializable record of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Configuration the analysis ran with
    pub config: AnalysisConfig,
    /// Concentration unit
    pub unit: String,
    /// Whether the analyzed traces were compensated
    pub compensated: bool,
    /// Resolved peak times
    pub peaks: PeakModel,
    /// Window signal per concentration
    pub summaries: Vec<SignalSummary>,
    /// R values per concentration
    pub points: Vec<RPoint>,
    /// Kd fit
    pub fit: FitResult,
    /// Printable result block
    pub result: ResultBlock,
}

impl AnalysisReport {
    /// Assemble the report of `analysis`
    pub fn new(experiment: &Experiment, analysis: &Analysis) -> Self {
        let unit = analysis.store.unit().to_string();
        Self {
            generated_at: Utc::now(),
            config: experiment.config().clone(),
            compensated: analysis.store.is_compensated(),
            peaks: analysis.peaks.clone(),
            summaries: analysis.summaries.clone(),
            points: analysis.points.clone(),
            fit: analysis.fit.clone(),
            result: ResultBlock::new(&analysis.fit, unit.clone()),
            unit,
        }
    }

    /// Summary table of the report
    pub fn summary_table(&self) -> SummaryTable {
        SummaryTable::new(&self.summaries, &self.points)
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }

    /// Read a report written by [`AnalysisReport::write_json`]
    pub fn read_json(path: &Path) -> Result<Self, ReportError> {
        Ok(serde_json::from_reader(File::open(path)?)?)
    }
}

impl PlotData {
    /// Plot series of `analysis`
    pub fn new(experiment: &Experiment, analysis: &Analysis) -> Self {
        let config = experiment.config();
        let protein = config.protein_name.as_str();
        Self {
            separagrams: plot::separagrams(
                &analysis.store,
                &analysis.summaries,
                config.injection_time,
                config.data_type,
                protein,
            ),
            overview: plot::overview(
                &analysis.store,
                &analysis.peaks,
                config.injection_time,
                plot::overview_reference(&config.peak_determination),
                config.data_type,
                protein,
            ),
            isotherm: plot::isotherm(
                &analysis.points,
                &analysis.fit,
                analysis.store.unit(),
                protein,
            ),
        }
    }
}

/// Files written by [`write_outputs`]
#[derive(Debug, Clone)]
pub struct OutputFiles {
    /// Summary table
    pub summary: PathBuf,
    /// Analysis report
    pub result: PathBuf,
    /// Plot data
    pub plots: PathBuf,
}

/// Write summary table, report and plot data into `dir`
pub fn write_outputs(
    dir: &Path,
    experiment: &Experiment,
    analysis: &Analysis,
) -> Result<OutputFiles, ReportError> {
    std::fs::create_dir_all(dir)?;
    let report = AnalysisReport::new(experiment, analysis);

    let files = OutputFiles {
        summary: dir.join(SUMMARY_FILE),
        result: dir.join(RESULT_FILE),
        plots: dir.join(PLOTS_FILE),
    };
    report.summary_table().write_file(&files.summary)?;
    report.write_json(&files.result)?;
    serde_json::to_writer_pretty(File::create(&files.plots)?, &PlotData::new(experiment, analysis))?;

    info!("Wrote analysis outputs to {}", dir.display());
    Ok(files)
}
