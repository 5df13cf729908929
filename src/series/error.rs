use std::path::PathBuf;

use crate::schema::SchemaError;

/// Errors that can occur while loading or normalizing an input series
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// I/O error reading an input table
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// A required column is absent
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A cell could not be parsed into its column's type
    #[error("{table} row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        /// Logical table name
        table: String,
        /// 1-based data row number (header excluded)
        row: usize,
        /// Column the cell belongs to
        column: String,
        /// Raw cell content
        value: String,
    },

    /// An input table does not exist
    #[error("{table} table not found at {} ({hint})", .path.display())]
    MissingInput {
        /// Logical table name
        table: String,
        /// Path that was looked up
        path: PathBuf,
        /// What the caller should do about it
        hint: String,
    },
}
