use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, info};

use super::{timestamp, ElectricalSample, ElectricalSeries, OpticalSample, OpticalSeries, SeriesError};
use crate::schema::{columns, validate_headers, ColumnIndex};

/// Table name used in electrical errors and logs
pub const ELECTRICAL_TABLE: &str = "electrical";
/// Table name used in optical errors and logs
pub const OPTICAL_TABLE: &str = "optical";

/// Step index of the cycler's initial rest step
const REST_STEP: i64 = 1;
/// Cycle label given to rest rows
pub const REST_CYCLE: i64 = 0;

impl ElectricalSeries {
    /// Read an electrical table (`Timestamp, Voltage(V), Current(A), Cycle_Index`)
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, SeriesError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let series = Self::from_reader(BufReader::new(file))?;
        info!("Read {} electrical samples from {}", series.len(), path.display());
        Ok(series)
    }

    /// Read an electrical table from any reader.
    ///
    /// When an optional `Step_Index` column is present, rows in the initial
    /// rest step are relabelled to cycle 0.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeriesError> {
        let mut csv_reader = csv_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let index = validate_headers(
            ELECTRICAL_TABLE,
            &headers,
            &columns::ELECTRICAL_REQUIRED,
            &[columns::STEP_INDEX],
        )?;
        let step_position = index.position(columns::STEP_INDEX);
        if step_position.is_some() {
            debug!("Step_Index present; rest rows will be labelled cycle {}", REST_CYCLE);
        }

        let mut samples = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = Row {
                table: ELECTRICAL_TABLE,
                number: i + 1,
                record: &record,
                index: &index,
            };

            let mut cycle_index = row.integer(columns::CYCLE_INDEX)?;
            if let Some(pos) = step_position {
                let step = record.get(pos).unwrap_or_default();
                if !step.is_empty() && row.parse_integer(columns::STEP_INDEX, step)? == REST_STEP {
                    cycle_index = REST_CYCLE;
                }
            }

            samples.push(ElectricalSample {
                timestamp: row.timestamp()?,
                voltage: row.float(columns::VOLTAGE)?,
                current_a: row.float(columns::CURRENT_A)?,
                cycle_index,
            });
        }

        Ok(Self::new(samples))
    }
}

impl OpticalSeries {
    /// Read an optical table (`Timestamp, Luminance`)
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, SeriesError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let series = Self::from_reader(BufReader::new(file))?;
        info!("Read {} optical samples from {}", series.len(), path.display());
        Ok(series)
    }

    /// Read an optical table from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeriesError> {
        let mut csv_reader = csv_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let index = validate_headers(OPTICAL_TABLE, &headers, &columns::OPTICAL_REQUIRED, &[])?;

        let mut samples = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = Row {
                table: OPTICAL_TABLE,
                number: i + 1,
                record: &record,
                index: &index,
            };

            samples.push(OpticalSample {
                timestamp: row.timestamp()?,
                luminance: row.float(columns::LUMINANCE)?,
            });
        }

        Ok(Self::new(samples))
    }
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// One data row with its validated column positions
pub(crate) struct Row<'a> {
    pub(crate) table: &'static str,
    pub(crate) number: usize,
    pub(crate) record: &'a csv::StringRecord,
    pub(crate) index: &'a ColumnIndex,
}

impl Row<'_> {
    pub(crate) fn cell(&self, column: &str) -> &str {
        self.index
            .position(column)
            .and_then(|pos| self.record.get(pos))
            .unwrap_or_default()
    }

    pub(crate) fn invalid(&self, column: &str, value: &str) -> SeriesError {
        SeriesError::InvalidValue {
            table: self.table.to_string(),
            row: self.number,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn timestamp(&self) -> Result<NaiveDateTime, SeriesError> {
        let value = self.cell(columns::TIMESTAMP);
        timestamp::parse_timestamp(value).ok_or_else(|| self.invalid(columns::TIMESTAMP, value))
    }

    /// Empty cells read as NaN, like a missing spreadsheet value
    pub(crate) fn float(&self, column: &str) -> Result<f64, SeriesError> {
        let value = self.cell(column);
        if value.is_empty() {
            return Ok(f64::NAN);
        }
        value.parse().map_err(|_| self.invalid(column, value))
    }

    /// Optional float: empty cells read as `None`
    pub(crate) fn optional_float(&self, column: &str) -> Result<Option<f64>, SeriesError> {
        let value = self.cell(column);
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some).map_err(|_| self.invalid(column, value))
    }

    pub(crate) fn integer(&self, column: &str) -> Result<i64, SeriesError> {
        self.parse_integer(column, self.cell(column))
    }

    /// Accepts `3` as well as `3.0`, which spreadsheet exports produce
    pub(crate) fn parse_integer(&self, column: &str, value: &str) -> Result<i64, SeriesError> {
        if let Ok(v) = value.parse::<i64>() {
            return Ok(v);
        }
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
            _ => Err(self.invalid(column, value)),
        }
    }
}
