use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ReportError;
use crate::ratio::RPoint;
use crate::traces::Concentration;
use crate::window::SignalSummary;

/// Column headers of the summary table, in order
pub const SUMMARY_HEADERS: [&str; 7] = [
    "Conc",
    "Avg Sig (S)",
    "S Std Dev",
    "S Rel Std Dev",
    "R value",
    "R Std Dev",
    "R Rel Std Dev",
];

/// One row of the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Concentration
    pub concentration: Concentration,
    /// Mean window signal
    pub mean: f64,
    /// Signal standard deviation
    pub stdev: f64,
    /// Signal relative standard deviation (%)
    pub relative_stdev: f64,
    /// R value, blank for excluded concentrations
    pub r: Option<f64>,
    /// R standard deviation
    pub r_stdev: Option<f64>,
    /// R relative standard deviation (%)
    pub r_relative_stdev: Option<f64>,
}

/// Per-concentration summary in ascending concentration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Rows
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Join signal summaries with their R values
    pub fn new(summaries: &[SignalSummary], points: &[RPoint]) -> Self {
        let rows = summaries
            .iter()
            .map(|s| {
                let point = points
                    .iter()
                    .find(|p| p.concentration.matches(s.concentration.value));
                SummaryRow {
                    concentration: s.concentration.clone(),
                    mean: s.mean,
                    stdev: s.stdev,
                    relative_stdev: s.relative_stdev,
                    r: point.and_then(|p| p.r),
                    r_stdev: point.and_then(|p| p.r_stdev),
                    r_relative_stdev: point.and_then(|p| p.r_relative_stdev),
                }
            })
            .collect();
        Self { rows }
    }

    /// `(concentration, R)` of the rows with a defined R
    pub fn r_series(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.r.map(|r| (row.concentration.value, r)))
            .collect()
    }

    /// Write as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(SUMMARY_HEADERS)?;
        let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        for row in &self.rows {
            csv_writer.write_record([
                row.concentration.to_string(),
                row.mean.to_string(),
                row.stdev.to_string(),
                row.relative_stdev.to_string(),
                cell(row.r),
                cell(row.r_stdev),
                cell(row.r_relative_stdev),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Read a table written by [`SummaryTable::write_csv`].
    ///
    /// The trailing `R Rel Std Dev` column is optional.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, ReportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let expected = &SUMMARY_HEADERS[..6];
        if headers.len() < expected.len()
            || headers.iter().zip(expected).any(|(h, e)| h != *e)
        {
            return Err(ReportError::InvalidTable(format!(
                "expected columns {:?}, found {:?}",
                SUMMARY_HEADERS,
                headers.iter().collect::<Vec<_>>()
            )));
        }

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = index + 1;
            let label = record.get(0).unwrap_or_default();
            let concentration = Concentration::parse(label).map_err(|e| {
                ReportError::InvalidTable(format!("row {}: {}", line, e))
            })?;
            let number = |col: usize| -> Result<Option<f64>, ReportError> {
                match record.get(col).filter(|c| !c.is_empty()) {
                    None => Ok(None),
                    Some(cell) => cell.parse().map(Some).map_err(|_| {
                        ReportError::InvalidTable(format!(
                            "row {}: non-numeric '{}' in column '{}'",
                            line, cell, SUMMARY_HEADERS[col]
                        ))
                    }),
                }
            };
            let required = |col: usize| -> Result<f64, ReportError> {
                number(col)?.ok_or_else(|| {
                    ReportError::InvalidTable(format!(
                        "row {}: missing '{}'",
                        line, SUMMARY_HEADERS[col]
                    ))
                })
            };

            rows.push(SummaryRow {
                concentration,
                mean: required(1)?,
                stdev: required(2)?,
                relative_stdev: required(3)?,
                r: number(4)?,
                r_stdev: number(5)?,
                r_relative_stdev: number(6)?,
            });
        }

        Ok(Self { rows })
    }

    /// Write the CSV to `path`
    pub fn write_file(&self, path: &Path) -> Result<(), ReportError> {
        self.write_csv(File::create(path)?)
    }

    /// Read the CSV from `path`
    pub fn read_file(path: &Path) -> Result<Self, ReportError> {
        Self::read_csv(File::open(path)?)
    }
}
