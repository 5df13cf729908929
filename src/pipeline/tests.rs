use std::io::Cursor;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::*;
use crate::series::{ElectricalSample, OpticalSample, SeriesError};
use crate::smoothing::SmoothingOutcome;

fn at(secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
        + Duration::seconds(secs)
}

/// Linear ramp from -10 s to 30 s; frames at 5 s and 15 s have two samples
/// on each side
fn electrical() -> ElectricalSeries {
    ElectricalSeries::new(vec![
        ElectricalSample::new(at(-10), 0.0, 0.000, 1),
        ElectricalSample::new(at(0), 1.0, 0.001, 1),
        ElectricalSample::new(at(10), 2.0, 0.002, 1),
        ElectricalSample::new(at(20), 3.0, 0.003, 1),
        ElectricalSample::new(at(30), 4.0, 0.004, 1),
    ])
}

fn optical(secs: &[(i64, f64)]) -> OpticalSeries {
    secs.iter()
        .map(|&(s, luminance)| OpticalSample::new(at(s), luminance))
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_end_to_end_without_smoothing() {
    let output = Pipeline::default().process(electrical(), optical(&[(5, 50.0), (15, 150.0)]));
    let series = &output.series;

    assert_eq!(series.len(), 2);
    let rows = series.records();

    assert_eq!(rows[0].timestamp, at(5));
    assert_close(rows[0].voltage, 1.5);
    assert_close(rows[0].current_ma, 1.5);
    assert_close(rows[0].test_time_h, 0.0);
    assert_eq!(rows[0].cycle_index, 1);

    assert_eq!(rows[1].timestamp, at(15));
    assert_close(rows[1].voltage, 2.5);
    assert_close(rows[1].current_ma, 2.5);
    assert_close(rows[1].test_time_h, 10.0 / 3600.0);

    let derivative = series.derivative().unwrap();
    assert_eq!(derivative[0], None);
    assert_close(derivative[1].unwrap(), 36000.0);

    let smoothed = series.derivative_smooth().unwrap();
    assert_eq!(smoothed[0], None);
    assert_close(smoothed[1].unwrap(), 36000.0);

    assert!(output.skipped.is_empty());
}

#[test]
fn test_frames_need_two_samples_on_each_side() {
    let inner_only = ElectricalSeries::new(vec![
        ElectricalSample::new(at(0), 1.0, 0.001, 1),
        ElectricalSample::new(at(10), 2.0, 0.002, 1),
        ElectricalSample::new(at(20), 3.0, 0.003, 1),
    ]);
    let output = Pipeline::default().process(inner_only, optical(&[(5, 50.0), (15, 150.0)]));

    assert!(output.series.is_empty());
    assert_eq!(output.stats.coverage_gaps, 2);
    assert_eq!(output.series.derivative(), Some(&[][..]));
}

#[test]
fn test_coverage_gap_drops_late_frame() {
    let output = Pipeline::default().process(
        electrical(),
        optical(&[(5, 50.0), (15, 150.0), (25, 250.0)]),
    );

    assert_eq!(output.series.len(), 2);
    assert_eq!(output.stats.coverage_gaps, 1);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].timestamp(), at(25));
    assert_close(output.series.records()[1].voltage, 2.5);
    assert_eq!(output.series.derivative().unwrap()[0], None);

    // Test time still counts from the first optical frame
    assert_close(output.series.records()[1].test_time_h, 10.0 / 3600.0);
}

#[test]
fn test_stats_counts() {
    let output = Pipeline::default().process(electrical(), optical(&[(5, 50.0), (15, 150.0)]));
    let stats = &output.stats;

    assert_eq!(stats.electrical_samples, 5);
    assert_eq!(stats.optical_samples, 2);
    assert_eq!(stats.records, 2);
    assert_eq!(stats.derivative_defined, 1);
    assert_eq!(stats.skipped(), 0);

    let channels: Vec<Channel> = stats.smoothing.iter().map(|s| s.channel).collect();
    assert_eq!(channels, Channel::ALL);
    assert!(stats
        .smoothing
        .iter()
        .all(|s| s.outcome == SmoothingOutcome::Disabled));
    assert!(stats.degraded_channels().is_empty());
}

#[test]
fn test_even_window_degrades_without_failing() {
    let config = PipelineConfig::with_smoothing(SmoothingWindows {
        voltage: 4,
        ..SmoothingWindows::NONE
    });
    let output = Pipeline::new(config).process(electrical(), optical(&[(5, 50.0), (15, 150.0)]));

    assert_eq!(output.series.len(), 2);
    assert_close(output.series.records()[0].voltage_smooth, 1.5);
    assert_eq!(output.stats.degraded_channels(), vec![Channel::Voltage]);
}

#[test]
fn test_smoothing_applies_to_channels() {
    let electrical: ElectricalSeries = (0..=40)
        .map(|s| ElectricalSample::new(at(s), (s % 2) as f64, 0.001, 1))
        .collect();
    let optical: OpticalSeries = (2..=38)
        .map(|s| OpticalSample::new(at(s), if s % 2 == 0 { 10.0 } else { 20.0 }))
        .collect();
    let config = PipelineConfig::with_smoothing(SmoothingWindows {
        voltage: 5,
        current: 5,
        brightness: 5,
        derivative: 5,
    });

    let output = Pipeline::new(config).process(electrical, optical);
    let rows = output.series.records();

    let middle = &rows[rows.len() / 2];
    assert!((middle.voltage_smooth - 0.5).abs() < (middle.voltage - 0.5).abs());
    assert!((middle.brightness_smooth - 15.0).abs() < (middle.brightness - 15.0).abs());
    assert!(output
        .stats
        .smoothing
        .iter()
        .all(|s| s.outcome == SmoothingOutcome::Applied { window: 5 }));
}

#[test]
fn test_empty_optical_gives_empty_output() {
    let output = Pipeline::default().process(electrical(), OpticalSeries::new(Vec::new()));

    assert!(output.series.is_empty());
    assert_eq!(output.stats.records, 0);
    assert_eq!(output.series.derivative(), Some(&[][..]));
}

#[test]
fn test_schema_error_is_fatal_and_names_stage() {
    let bad_electrical =
        || ElectricalSeries::from_reader(Cursor::new("Timestamp,Voltage(V)\n2024-05-01 08:00:00,1\n"));
    let good_optical = optical(&[(5, 50.0)]);

    let err = Pipeline::default()
        .run(&bad_electrical, &good_optical)
        .unwrap_err();

    assert_eq!(err.stage(), Stage::LoadElectrical);
    assert!(matches!(
        err,
        PipelineError::Input {
            source: SeriesError::Schema(_),
            ..
        }
    ));
    assert!(err.to_string().starts_with("loading electrical data failed"));
}

#[test]
fn test_optical_load_error_names_stage() {
    let bad_optical = || OpticalSeries::from_reader(Cursor::new("Timestamp\n"));

    let err = Pipeline::default().run(&electrical(), &bad_optical).unwrap_err();
    assert_eq!(err.stage(), Stage::LoadOptical);
}

#[test]
fn test_run_to_file_writes_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined_data.csv");

    let (output, written) = Pipeline::default()
        .run_to_file(
            &electrical(),
            &optical(&[(5, 50.0), (15, 150.0)]),
            &path,
            OutputFormat::Csv,
        )
        .unwrap();

    assert_eq!(written.rows_written, output.series.len());
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
}

#[test]
fn test_failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined_data.csv");
    let bad_optical = || OpticalSeries::from_reader(Cursor::new("Luminance\n1\n"));

    let result = Pipeline::default().run_to_file(&electrical(), &bad_optical, &path, OutputFormat::Csv);

    assert!(result.is_err());
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
