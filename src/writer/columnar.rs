//! Parquet output of the combined table.

use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;

use crate::align::{CombinedRecord, CombinedSeries};
use crate::schema::columns;

use super::WriterError;

/// ZSTD level for the combined table
const ZSTD_LEVEL: i32 = 3;

/// Arrow schema of the combined table, columns in CSV order
pub fn combined_schema() -> Schema {
    let float = |name: &str, nullable: bool| Field::new(name, DataType::Float64, nullable);
    Schema::new(vec![
        Field::new(
            columns::TIMESTAMP,
            DataType::Timestamp(TimeUnit::Microsecond, None),
            false,
        ),
        float(columns::BRIGHTNESS, false),
        float(columns::BRIGHTNESS_SMOOTH, false),
        float(columns::VOLTAGE, false),
        float(columns::VOLTAGE_SMOOTH, false),
        float(columns::CURRENT_MA, false),
        float(columns::CURRENT_MA_SMOOTH, false),
        Field::new(columns::CYCLE_INDEX, DataType::Int64, false),
        float(columns::TEST_TIME_H, false),
        float(columns::BRIGHTNESS_DERIVATIVE, true),
        float(columns::BRIGHTNESS_DERIVATIVE_SMOOTH, true),
    ])
}

/// Write the combined table as a single-row-group Parquet file.
pub fn write_parquet<W: Write + Send>(series: &CombinedSeries, writer: W) -> Result<usize, WriterError> {
    let schema = Arc::new(combined_schema());
    let records = series.records();

    let values = |get: fn(&CombinedRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(get).collect::<Vec<_>>()))
    };

    let timestamps: Vec<i64> = records
        .iter()
        .map(|r| r.timestamp.and_utc().timestamp_micros())
        .collect();
    let derivative: Vec<Option<f64>> = series.rows().map(|r| r.derivative).collect();
    let derivative_smooth: Vec<Option<f64>> = series.rows().map(|r| r.derivative_smooth).collect();

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(TimestampMicrosecondArray::from(timestamps)),
        values(|r| r.brightness),
        values(|r| r.brightness_smooth),
        values(|r| r.voltage),
        values(|r| r.voltage_smooth),
        values(|r| r.current_ma),
        values(|r| r.current_ma_smooth),
        Arc::new(Int64Array::from(
            records.iter().map(|r| r.cycle_index).collect::<Vec<_>>(),
        )),
        values(|r| r.test_time_h),
        Arc::new(Float64Array::from(derivative)),
        Arc::new(Float64Array::from(derivative_smooth)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::try_new(ZSTD_LEVEL)?))
        .build();
    let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))?;
    arrow_writer.write(&batch)?;
    arrow_writer.close()?;

    Ok(records.len())
}
