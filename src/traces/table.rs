//! Tabular ingestion contract.
//!
//! Each concentration is one CSV table whose first column is the raw time in
//! seconds (header `raw time`) and whose remaining columns are the runs
//! (`Experiment 1`, `Experiment 2`, ...). A data directory holds one table per
//! concentration, named after the concentration label (`0.1 µM.csv`), an
//! optional simulated profile (`simulated*.csv`) and, for compensated data,
//! the `compensation.json` marker.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{Concentration, ConcentrationSeries, Trace, TraceError, TraceStore};
use crate::compensation::{CompensationRecord, SimulatedProfile};

/// Header of the time column
pub const TIME_COLUMN: &str = "raw time";

/// Prefix of every run column header
pub const RUN_COLUMN_PREFIX: &str = "Experiment";

/// File stem prefix identifying the simulated reference profile
pub const SIMULATED_PREFIX: &str = "simulated";

/// Everything found in a data directory
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Trace store (carrying the compensation flag)
    pub store: TraceStore,
    /// Simulated reference profile, if present
    pub profile: Option<SimulatedProfile>,
    /// Compensation marker, if the tables were already compensated
    pub compensation: Option<CompensationRecord>,
}

/// Read one concentration table from any reader
pub fn read_series<R: Read>(
    reader: R,
    concentration: Concentration,
) -> Result<ConcentrationSeries, TraceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.len() < 2 {
        return Err(TraceError::InvalidTable(format!(
            "expected a time column and at least one run column, found {} column(s)",
            headers.len()
        )));
    }
    if !headers[0].to_lowercase().contains("time") {
        return Err(TraceError::InvalidTable(format!(
            "first column must be '{}', found '{}'",
            TIME_COLUMN, headers[0]
        )));
    }

    // Run columns ordered by their experiment number, falling back to column order
    let mut run_columns: Vec<(usize, usize)> = headers[1..]
        .iter()
        .enumerate()
        .map(|(i, h)| (run_number(h).unwrap_or(i + 1), i + 1))
        .collect();
    run_columns.sort();

    let mut times: Vec<Vec<f64>> = vec![Vec::new(); run_columns.len()];
    let mut signals: Vec<Vec<f64>> = vec![Vec::new(); run_columns.len()];

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let Some(time_cell) = record.get(0).filter(|c| !c.is_empty()) else {
            continue;
        };
        let time = parse_cell(time_cell, row, &headers[0])?;

        for (slot, &(_, column)) in run_columns.iter().enumerate() {
            match record.get(column).filter(|c| !c.is_empty()) {
                Some(cell) => {
                    times[slot].push(time);
                    signals[slot].push(parse_cell(cell, row, &headers[column])?);
                }
                None => continue,
            }
        }
    }

    let runs = times
        .into_iter()
        .zip(signals)
        .filter(|(t, _)| !t.is_empty())
        .map(|(t, s)| Trace::new(t, s))
        .collect::<Result<Vec<_>, _>>()?;

    ConcentrationSeries::new(concentration, runs)
}

/// Read one concentration table from a file named after its concentration
pub fn read_series_file(path: &Path) -> Result<ConcentrationSeries, TraceError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let concentration = Concentration::parse(&stem)?;
    read_series(File::open(path)?, concentration)
}

/// Write one concentration table.
///
/// Runs that do not share a time axis are written against the union of their
/// times, leaving blank cells where a run has no sample.
pub fn write_series<W: Write>(writer: W, series: &ConcentrationSeries) -> Result<(), TraceError> {
    let mut axis: Vec<f64> = series
        .runs()
        .iter()
        .flat_map(|r| r.times().iter().copied())
        .collect();
    axis.sort_by(f64::total_cmp);
    axis.dedup();

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec![TIME_COLUMN.to_string()];
    header.extend((1..=series.run_count()).map(|n| format!("{} {}", RUN_COLUMN_PREFIX, n)));
    csv_writer.write_record(&header)?;

    let mut cursors = vec![0usize; series.run_count()];
    for &time in &axis {
        let mut row = vec![time.to_string()];
        for (run, cursor) in series.runs().iter().zip(cursors.iter_mut()) {
            if *cursor < run.len() && run.times()[*cursor] == time {
                row.push(run.signals()[*cursor].to_string());
                *cursor += 1;
            } else {
                row.push(String::new());
            }
        }
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// File name used for a concentration table
pub fn series_file_name(concentration: &Concentration) -> String {
    format!("{}.csv", concentration)
}

/// Concentration tables found in `dir`, sorted by file name
pub fn list_series_files(dir: &Path) -> Result<Vec<PathBuf>, TraceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if stem.starts_with(SIMULATED_PREFIX) {
            continue;
        }
        if Concentration::parse(&stem).is_ok() {
            files.push(path);
        } else {
            debug!("Skipping {}: not a concentration table", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Path of the simulated profile table in `dir`, if any
pub fn find_profile_file(dir: &Path) -> Result<Option<PathBuf>, TraceError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_profile = path.is_file()
            && path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with(SIMULATED_PREFIX))
                .unwrap_or(false);
        if is_profile {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Read a two-column `raw time, signal` simulated profile.
///
/// Blank signal cells count as zero.
pub fn read_profile<R: Read>(reader: R) -> Result<SimulatedProfile, TraceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut times = Vec::new();
    let mut signals = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let Some(time_cell) = record.get(0).filter(|c| !c.is_empty()) else {
            continue;
        };
        times.push(parse_cell(time_cell, row, TIME_COLUMN)?);
        signals.push(match record.get(1).filter(|c| !c.is_empty()) {
            Some(cell) => parse_cell(cell, row, "signal")?,
            None => 0.0,
        });
    }

    SimulatedProfile::new(times, signals)
        .map_err(|e| TraceError::InvalidTable(format!("simulated profile: {}", e)))
}

/// Write a simulated profile as a two-column `raw time, signal` table
pub fn write_profile<W: Write>(writer: W, profile: &SimulatedProfile) -> Result<(), TraceError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([TIME_COLUMN, "signal"])?;
    for (time, signal) in profile.times().iter().zip(profile.signals()) {
        csv_writer.write_record([time.to_string(), signal.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Load a complete data directory
pub fn read_dataset_dir(dir: &Path) -> Result<Dataset, TraceError> {
    let files = list_series_files(dir)?;
    if files.is_empty() {
        return Err(TraceError::InvalidTable(format!(
            "no concentration tables found in {}",
            dir.display()
        )));
    }

    let series = files
        .iter()
        .map(|path| read_series_file(path))
        .collect::<Result<Vec<_>, _>>()?;

    let compensation = CompensationRecord::read_from_dir(dir)?;

    let profile = match find_profile_file(dir)? {
        Some(path) => Some(read_profile(File::open(path)?)?),
        None => None,
    };

    let store = TraceStore::with_flag(series, compensation.is_some())?;
    info!(
        "Loaded {} concentrations ({} max runs) from {}{}",
        store.len(),
        store.max_runs(),
        dir.display(),
        if store.is_compensated() { " [compensated]" } else { "" }
    );

    Ok(Dataset {
        store,
        profile,
        compensation,
    })
}

/// Write every series of `store` into `dir`
pub fn write_store_dir(dir: &Path, store: &TraceStore) -> Result<(), TraceError> {
    fs::create_dir_all(dir)?;
    for series in store.series() {
        let path = dir.join(series_file_name(series.concentration()));
        write_series(File::create(path)?, series)?;
    }
    Ok(())
}

fn run_number(header: &str) -> Option<usize> {
    header
        .strip_prefix(RUN_COLUMN_PREFIX)
        .and_then(|rest| rest.trim().parse().ok())
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f64, TraceError> {
    cell.parse::<f64>().map_err(|_| {
        TraceError::InvalidTable(format!(
            "non-numeric value '{}' in column '{}' at data row {}",
            cell,
            column,
            row + 1
        ))
    })
}
