use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::*;
use crate::align::{CombinedRecord, CombinedSeries};
use crate::derivative;
use crate::schema::columns;

fn at(secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
        + Duration::seconds(secs)
}

fn record(secs: i64, brightness: f64, voltage: f64) -> CombinedRecord {
    CombinedRecord {
        timestamp: at(secs),
        test_time_h: (secs - 5) as f64 / 3600.0,
        brightness,
        brightness_smooth: brightness,
        voltage,
        voltage_smooth: voltage,
        current_ma: voltage,
        current_ma_smooth: voltage,
        cycle_index: 1,
    }
}

fn sample_series() -> CombinedSeries {
    let series = CombinedSeries::new(vec![record(5, 50.0, 1.5), record(15, 150.0, 2.5)]);
    derivative::attach(series, 0).0
}

fn csv_text(series: &CombinedSeries) -> String {
    let mut buffer = Vec::new();
    write_csv(series, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_csv_header_order() {
    let text = csv_text(&sample_series());
    let header = text.lines().next().unwrap();

    assert_eq!(header, columns::COMBINED.join(","));
    assert_eq!(
        header,
        "Timestamp,Brightness,Brightness_smooth,Voltage(V),Voltage(V)_smooth,Current(mA),\
         Current(mA)_smooth,Cycle_Index,Test Time (h),Brightness Derivative,Brightness Derivative_smooth"
    );
}

#[test]
fn test_csv_rows() {
    let text = csv_text(&sample_series());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2024-05-01 08:00:05,50,50,1.5,1.5,1.5,1.5,1,0,,");
    assert!(lines[2].starts_with("2024-05-01 08:00:15,150,150,2.5,2.5,2.5,2.5,1,"));
    let cells: Vec<&str> = lines[2].split(',').collect();
    let derivative: f64 = cells[9].parse().unwrap();
    assert!((derivative - 36000.0).abs() < 1e-6);
    assert_eq!(cells[9], cells[10]);
}

#[test]
fn test_csv_without_derivative_leaves_cells_empty() {
    let series = CombinedSeries::new(vec![record(5, 50.0, 1.5)]);
    let text = csv_text(&series);

    assert!(text.lines().nth(1).unwrap().ends_with(",0,,"));
}

#[test]
fn test_csv_non_finite_values() {
    let series = CombinedSeries::new(vec![record(5, 50.0, 1.5), record(5, 60.0, 1.5)]);
    let series = derivative::attach(series, 0).0;
    let text = csv_text(&series);

    assert!(text.lines().nth(2).unwrap().ends_with(",inf,inf"));
}

#[test]
fn test_empty_series_writes_header_only() {
    let text = csv_text(&CombinedSeries::default());
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_output_format_parsing() {
    assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    assert_eq!("Parquet".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
    assert!("xlsx".parse::<OutputFormat>().is_err());

    assert_eq!(
        OutputFormat::from_path(Path::new("out/combined_data.csv")),
        Some(OutputFormat::Csv)
    );
    assert_eq!(OutputFormat::from_path(Path::new("combined_data")), None);
    assert_eq!(OutputFormat::Parquet.to_string(), "parquet");
}

#[test]
fn test_write_combined_csv() -> Result<(), WriterError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("combined_data.csv");

    let stats = write_combined(&sample_series(), &path, OutputFormat::Csv)?;

    assert_eq!(stats.rows_written, 2);
    assert_eq!(stats.path, path);
    assert_eq!(stats.file_size_bytes, std::fs::metadata(&path)?.len());
    assert!(std::fs::read_to_string(&path)?.starts_with("Timestamp,"));

    // Only the output remains, no staging files
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_write_combined_replaces_existing() -> Result<(), WriterError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("combined_data.csv");
    std::fs::write(&path, "stale")?;

    write_combined(&sample_series(), &path, OutputFormat::Csv)?;

    assert!(!std::fs::read_to_string(&path)?.contains("stale"));
    Ok(())
}

#[test]
fn test_write_combined_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("combined_data.csv");

    let result = write_combined(&sample_series(), &path, OutputFormat::Csv);
    assert!(matches!(result, Err(WriterError::IoError(_))));
    assert!(!path.exists());
}

#[cfg(not(feature = "parquet"))]
#[test]
fn test_parquet_requires_feature() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined_data.parquet");

    let result = write_combined(&sample_series(), &path, OutputFormat::Parquet);
    assert!(matches!(result, Err(WriterError::UnsupportedFormat(_))));
    assert!(!path.exists());
}

#[cfg(feature = "parquet")]
#[test]
fn test_write_combined_parquet() -> Result<(), WriterError> {
    use parquet::file::reader::{FileReader, SerializedFileReader};

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("combined_data.parquet");

    let stats = write_combined(&sample_series(), &path, OutputFormat::Parquet)?;
    assert_eq!(stats.rows_written, 2);

    let reader = SerializedFileReader::new(std::fs::File::open(&path)?)?;
    let metadata = reader.metadata();
    assert_eq!(metadata.file_metadata().num_rows(), 2);

    let schema = combined_schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, columns::COMBINED);
    Ok(())
}
