use std::io::Write;

use crate::align::{CombinedRow, CombinedSeries};
use crate::schema::columns;
use crate::series::timestamp::format_timestamp;

use super::WriterError;

/// Write the combined table as CSV, returning the number of data rows.
///
/// Undefined derivative values are written as empty cells; non-finite values
/// as `inf`, `-inf` or `NaN`.
pub fn write_csv<W: Write>(series: &CombinedSeries, writer: W) -> Result<usize, WriterError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns::COMBINED)?;

    let mut rows = 0;
    for row in series.rows() {
        csv_writer.write_record(&row_fields(&row))?;
        rows += 1;
    }
    csv_writer.flush()?;

    Ok(rows)
}

fn row_fields(row: &CombinedRow<'_>) -> [String; 11] {
    let r = row.record;
    [
        format_timestamp(&r.timestamp),
        r.brightness.to_string(),
        r.brightness_smooth.to_string(),
        r.voltage.to_string(),
        r.voltage_smooth.to_string(),
        r.current_ma.to_string(),
        r.current_ma_smooth.to_string(),
        r.cycle_index.to_string(),
        r.test_time_h.to_string(),
        optional(row.derivative),
        optional(row.derivative_smooth),
    ]
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
