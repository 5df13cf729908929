/// Errors that can occur while writing the combined table
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Arrow error
    #[cfg(feature = "parquet")]
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Output format not available in this build
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}
