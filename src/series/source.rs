//! Injected input providers.
//!
//! The pipeline does not know where its series come from. A caller hands it
//! anything implementing [`ElectricalSource`] / [`OpticalSource`]: a CSV path,
//! an in-memory series, or a closure that runs an upstream extraction first.

use std::path::{Path, PathBuf};

use super::reader::{ELECTRICAL_TABLE, OPTICAL_TABLE};
use super::{ElectricalSeries, OpticalSeries, SeriesError};

/// Produces a validated electrical series
pub trait ElectricalSource {
    /// Load the series
    fn load_electrical(&self) -> Result<ElectricalSeries, SeriesError>;

    /// Human-readable origin, for logs and run metadata
    fn describe(&self) -> String {
        "in-memory electrical series".to_string()
    }
}

/// Produces a validated optical series
pub trait OpticalSource {
    /// Load the series
    fn load_optical(&self) -> Result<OpticalSeries, SeriesError>;

    /// Human-readable origin, for logs and run metadata
    fn describe(&self) -> String {
        "in-memory optical series".to_string()
    }
}

impl<F> ElectricalSource for F
where
    F: Fn() -> Result<ElectricalSeries, SeriesError>,
{
    fn load_electrical(&self) -> Result<ElectricalSeries, SeriesError> {
        self()
    }
}

impl<F> OpticalSource for F
where
    F: Fn() -> Result<OpticalSeries, SeriesError>,
{
    fn load_optical(&self) -> Result<OpticalSeries, SeriesError> {
        self()
    }
}

impl ElectricalSource for ElectricalSeries {
    fn load_electrical(&self) -> Result<ElectricalSeries, SeriesError> {
        Ok(self.clone())
    }
}

impl OpticalSource for OpticalSeries {
    fn load_optical(&self) -> Result<OpticalSeries, SeriesError> {
        Ok(self.clone())
    }
}

/// A CSV table on disk
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    missing_hint: String,
}

impl CsvSource {
    /// Source reading `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            missing_hint: "check the input directory".to_string(),
        }
    }

    /// Replace the hint reported when the file does not exist
    pub fn with_missing_hint(mut self, hint: impl Into<String>) -> Self {
        self.missing_hint = hint.into();
        self
    }

    /// Path of the table
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_exists(&self, table: &str) -> Result<(), SeriesError> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(SeriesError::MissingInput {
                table: table.to_string(),
                path: self.path.clone(),
                hint: self.missing_hint.clone(),
            })
        }
    }
}

impl ElectricalSource for CsvSource {
    fn load_electrical(&self) -> Result<ElectricalSeries, SeriesError> {
        self.ensure_exists(ELECTRICAL_TABLE)?;
        ElectricalSeries::from_csv_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl OpticalSource for CsvSource {
    fn load_optical(&self) -> Result<OpticalSeries, SeriesError> {
        self.ensure_exists(OPTICAL_TABLE)?;
        OpticalSeries::from_csv_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
