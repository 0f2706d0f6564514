use std::io::Cursor;

use super::*;
use crate::experiment::PeakDetermination;
use crate::peak::locate_peaks;
use crate::traces::{Concentration, ConcentrationSeries, Trace, TraceStore};
use crate::window::WindowBounds;

fn row(conc: f64, mean: f64, r: Option<f64>) -> SummaryRow {
    SummaryRow {
        concentration: Concentration::micromolar(conc),
        mean,
        stdev: 2.0,
        relative_stdev: 200.0 / mean,
        r,
        r_stdev: r.map(|_| 0.03),
        r_relative_stdev: r.filter(|v| *v != 0.0).map(|v| 3.0 / v),
    }
}

#[test]
fn test_summary_csv_roundtrip_with_blank_r() {
    let table = SummaryTable {
        rows: vec![
            row(0.0, 100.0, None),
            row(0.1, 95.0, Some(1.0)),
            row(100.0, 5.0, Some(0.0)),
        ],
    };
    let mut buffer = Vec::new();
    table.write_csv(&mut buffer).unwrap();

    let text = String::from_utf8(buffer.clone()).unwrap();
    assert!(text.starts_with(
        "Conc,Avg Sig (S),S Std Dev,S Rel Std Dev,R value,R Std Dev,R Rel Std Dev\n"
    ));
    assert!(text.contains("0 µM,100,2,2,,,\n"));

    let restored = SummaryTable::read_csv(Cursor::new(buffer)).unwrap();
    assert_eq!(restored, table);
    assert_eq!(restored.r_series(), vec![(0.1, 1.0), (100.0, 0.0)]);
}

#[test]
fn test_summary_rejects_wrong_columns() {
    let err = SummaryTable::read_csv(Cursor::new("Conc,Mean\n0 µM,1\n")).unwrap_err();
    assert!(matches!(err, ReportError::InvalidTable(_)));

    let text = "Conc,Avg Sig (S),S Std Dev,S Rel Std Dev,R value,R Std Dev\n0 µM,x,1,1,,\n";
    let err = SummaryTable::read_csv(Cursor::new(text)).unwrap_err();
    assert!(err.to_string().contains("non-numeric 'x'"));
}

#[test]
fn test_result_block_format() {
    let block = ResultBlock {
        kd: 0.74690,
        kd_error: 0.58982,
        r_squared: 0.97087,
        chi_squared: 0.04841,
        unit: "µM".to_string(),
    };
    assert_eq!(
        block.to_string(),
        "Kd: 0.7469 ± 0.5898 µM\nR²: 0.9709\nχ²: 0.0484"
    );
}

#[test]
fn test_result_block_json_keeps_non_finite_values() {
    let block = ResultBlock {
        kd: 0.5,
        kd_error: f64::INFINITY,
        r_squared: f64::NEG_INFINITY,
        chi_squared: f64::NAN,
        unit: "µM".to_string(),
    };
    let json = serde_json::to_string(&block).unwrap();
    assert!(json.contains(r#""kd":0.5"#));
    assert!(json.contains(r#""kd_error":"inf""#));
    assert!(json.contains(r#""r_squared":"-inf""#));
    assert!(json.contains(r#""chi_squared":"NaN""#));

    let restored: ResultBlock = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.kd_error, f64::INFINITY);
    assert_eq!(restored.r_squared, f64::NEG_INFINITY);
    assert!(restored.chi_squared.is_nan());

    let bad = json.replace(r#""-inf""#, r#""minus""#);
    assert!(serde_json::from_str::<ResultBlock>(&bad).is_err());
}

#[test]
fn test_next_available_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("run_results");
    assert_eq!(output_dir::next_available(&base).unwrap(), base);

    std::fs::create_dir(&base).unwrap();
    let second = output_dir::next_available(&base).unwrap();
    assert_eq!(second, dir.path().join("run_results_2"));

    for n in 2..=output_dir::MAX_SUFFIX {
        std::fs::create_dir(dir.path().join(format!("run_results_{}", n))).unwrap();
    }
    assert!(matches!(
        output_dir::next_available(&base),
        Err(ReportError::OutputDirsExhausted(_))
    ));

    assert_eq!(
        output_dir::results_dir_for(&dir.path().join("BSA")),
        dir.path().join("BSA_results")
    );
}

fn overview_store() -> TraceStore {
    let series = [100.0, 95.0, 70.0, 65.0, 5.0]
        .iter()
        .enumerate()
        .map(|(i, &peak)| {
            let trace = Trace::new(vec![0.0, 10.0, 20.0, 30.0], vec![0.0, 1.0, peak, 1.0]).unwrap();
            ConcentrationSeries::new(Concentration::micromolar(i as f64), vec![trace]).unwrap()
        })
        .collect();
    TraceStore::new(series).unwrap()
}

#[test]
fn test_overview_selection_rule() {
    let store = overview_store();
    let peaks = locate_peaks(
        &store,
        &PeakDetermination::Manual {
            peak_times: vec![20.0; 5],
        },
        0.0,
    )
    .unwrap();

    assert_eq!(plot::overview_selection(&store, &peaks, 0.0, None), vec![0, 2, 4]);
    assert_eq!(
        plot::overview_selection(&store, &peaks, 0.0, Some(3.0)),
        vec![0, 2, 3, 4]
    );
}

#[test]
fn test_separagram_carries_window_markers() {
    let store = overview_store();
    let summaries = crate::window::summarize_store(
        &store,
        &locate_peaks(
            &store,
            &PeakDetermination::Programmatic {
                reference_concentration: 0.0,
                exclude_below_reference: true,
            },
            0.0,
        )
        .unwrap(),
        0.1,
        0.0,
    )
    .unwrap();
    let plots = plot::separagrams(
        &store,
        &summaries,
        0.0,
        crate::experiment::DataType::MassSpec,
        "BSA",
    );
    assert_eq!(plots.len(), 5);
    assert_eq!(plots[0].title, "BSA 0 µM");
    assert_eq!(plots[0].y_label, "MS intensity (a.u.)");
    assert_eq!(plots[0].window, WindowBounds::around(20.0, 0.1));
    assert_eq!(plots[0].runs[0].label, "Experiment 1");
    assert_eq!(plots[0].runs[0].points.len(), 4);
}
