//! # Combined Table Reader
//!
//! Reads a previously written combined table back into a [`CombinedSeries`],
//! e.g. to inspect it or to select cycles without re-running the merge.
//!
//! The header must carry all eleven combined columns; their order does not
//! matter. Empty derivative cells read as undefined, `inf` and `NaN` read
//! back as the non-finite values they were written from.


use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use crate::align::{CombinedRecord, CombinedSeries};
use crate::schema::{columns, validate_headers};
use crate::series::reader::{csv_reader, Row};
use crate::series::SeriesError;

/// Table name used in combined-table errors and logs
pub const COMBINED_TABLE: &str = "combined";

impl CombinedSeries {
    /// Read a combined CSV table from `path`
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, SeriesError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let series = Self::from_reader(BufReader::new(file))?;
        info!("Read {} combined rows from {}", series.len(), path.display());
        Ok(series)
    }

    /// Read a combined CSV table from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeriesError> {
        let mut csv_reader = csv_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let index = validate_headers(COMBINED_TABLE, &headers, &columns::COMBINED, &[])?;

        let mut records = Vec::new();
        let mut derivative = Vec::new();
        let mut derivative_smooth = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = Row {
                table: COMBINED_TABLE,
                number: i + 1,
                record: &record,
                index: &index,
            };

            records.push(CombinedRecord {
                timestamp: row.timestamp()?,
                test_time_h: row.float(columns::TEST_TIME_H)?,
                brightness: row.float(columns::BRIGHTNESS)?,
                brightness_smooth: row.float(columns::BRIGHTNESS_SMOOTH)?,
                voltage: row.float(columns::VOLTAGE)?,
                voltage_smooth: row.float(columns::VOLTAGE_SMOOTH)?,
                current_ma: row.float(columns::CURRENT_MA)?,
                current_ma_smooth: row.float(columns::CURRENT_MA_SMOOTH)?,
                cycle_index: row.integer(columns::CYCLE_INDEX)?,
            });
            derivative.push(row.optional_float(columns::BRIGHTNESS_DERIVATIVE)?);
            derivative_smooth.push(row.optional_float(columns::BRIGHTNESS_DERIVATIVE_SMOOTH)?);
        }

        Ok(Self::from_columns(records, derivative, derivative_smooth))
    }
}
