//! End-to-end pipeline tests over CSV files on disk.

use polars::prelude::DataType;
use std::fs;
use std::path::{Path, PathBuf};
use temptrend::data::TEMPERATURE_COLUMN;
use temptrend::{ErrorKind, Pipeline, Stage, Table};

fn write_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("data.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn float_column(table: &Table, name: &str) -> Vec<Option<f64>> {
    table
        .column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

fn diagnostics(pipeline: Pipeline<Vec<u8>>) -> Vec<String> {
    String::from_utf8(pipeline.into_diagnostics())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn full_run_produces_mean_and_trend() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "Date,Temperature,Humidity\n\
         2024-01-01,1,50\n\
         2024-01-02,,51\n\
         2024-01-03,3,\n\
         2024-01-04,4,53\n",
    );

    let mut pipeline = Pipeline::new(Vec::new());
    let output = pipeline.run(&path).unwrap();
    assert!(diagnostics(pipeline).is_empty());

    // Row 1 is filled from row 0: [1, 1, 3, 4].
    assert_eq!(
        float_column(&output.table, TEMPERATURE_COLUMN),
        vec![Some(1.0), Some(1.0), Some(3.0), Some(4.0)]
    );
    assert_eq!(output.table.null_count("Humidity"), 0);
    assert!((output.analysis.mean_temperature - 2.25).abs() < 1e-9);

    let [slope, intercept] = output.analysis.temperature_trend.coefficients();
    assert!((slope - 1.1).abs() < 1e-9);
    assert!((intercept - 0.6).abs() < 1e-9);
}

#[test]
fn missing_file_reports_once_and_halts() {
    let mut pipeline = Pipeline::new(Vec::new());
    let err = pipeline.run(Path::new("/nonexistent/path.csv")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let lines = diagnostics(pipeline);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("load failed [not found]"));
}

#[test]
fn empty_file_reports_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "");

    let mut pipeline = Pipeline::new(Vec::new());
    let err = pipeline.run(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert_eq!(diagnostics(pipeline).len(), 1);
}

#[test]
fn analyze_without_temperature_reports_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "Date,Humidity\n2024-01-01,40\n2024-01-02,45\n");

    let mut pipeline = Pipeline::new(Vec::new());
    let table = pipeline.load(&path).unwrap();
    let err = pipeline.analyze(&table).unwrap_err();
    assert_eq!(err.stage(), Stage::Analyze);
    assert_eq!(err.kind(), ErrorKind::MissingColumn);

    let lines = diagnostics(pipeline);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("[missing column]"));
    assert!(lines[0].contains("Temperature"));
}

#[test]
fn full_run_without_temperature_stops_at_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "Date,Humidity\n2024-01-01,40\n");

    let mut pipeline = Pipeline::new(Vec::new());
    let err = pipeline.run(&path).unwrap_err();
    assert_eq!(err.stage(), Stage::Clean);
    assert_eq!(err.kind(), ErrorKind::MissingColumn);
    assert_eq!(diagnostics(pipeline).len(), 1);
}

#[test]
fn bad_date_reports_unexpected_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "Date,Temperature\n2024-01-01,3\nnot-a-date,4\n",
    );

    let mut pipeline = Pipeline::new(Vec::new());
    let err = pipeline.run(&path).unwrap_err();
    assert_eq!(err.stage(), Stage::Clean);
    assert_eq!(err.kind(), ErrorKind::Unexpected);

    let lines = diagnostics(pipeline);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("not-a-date"));
}

#[test]
fn leading_gap_cleans_but_trend_is_undefined() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "Date,Temperature\n2024-01-01,\n2024-01-02,5\n2024-01-03,\n2024-01-04,7\n",
    );

    let mut pipeline = Pipeline::new(Vec::new());
    let table = pipeline.load(&path).unwrap();
    let table = pipeline.clean(table).unwrap();
    assert_eq!(
        float_column(&table, TEMPERATURE_COLUMN),
        vec![None, Some(5.0), Some(5.0), Some(7.0)]
    );

    let err = pipeline.analyze(&table).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(diagnostics(pipeline).len(), 1);
}

#[test]
fn space_padded_numbers_are_analyzed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "Date,Temperature\n2024-01-01, 1.5\n2024-01-02, 2.5\n",
    );

    let mut pipeline = Pipeline::new(Vec::new());
    let output = pipeline.run(&path).unwrap();
    assert!(diagnostics(pipeline).is_empty());
    assert!((output.analysis.mean_temperature - 2.0).abs() < 1e-9);

    let [slope, intercept] = output.analysis.temperature_trend.coefficients();
    assert!((slope - 1.0).abs() < 1e-9);
    assert!((intercept - 1.5).abs() < 1e-9);
}

#[test]
fn header_only_file_fails_in_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "Date,Temperature\n");

    let mut pipeline = Pipeline::new(Vec::new());
    let err = pipeline.run(&path).unwrap_err();
    assert_eq!(err.stage(), Stage::Analyze);
    assert_eq!(err.kind(), ErrorKind::Unexpected);
}
