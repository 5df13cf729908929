/// Errors that can occur while reading or writing run metadata
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error reading or writing the sidecar
    #[error("Failed to access metadata file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
