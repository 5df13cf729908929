//! # optoechem - Opto-Electrochemical Time Series Merging
//!
//! `optoechem` merges two independently sampled measurement streams of one
//! experiment into a single table:
//!
//! - an **electrical** series from the cycler (`Timestamp, Voltage(V),
//!   Current(A), Cycle_Index`), and
//! - an **optical** series of per-frame brightness (`Timestamp, Luminance`).
//!
//! The electrical channels are interpolated onto the optical timestamps,
//! selected channels are smoothed with a quadratic Savitzky–Golay filter, and
//! the rate of change of brightness over elapsed test time is appended.
//!
//! ## Output
//!
//! One row per optical frame that has electrical coverage on both sides:
//!
//! ```text
//! Timestamp, Brightness, Brightness_smooth, Voltage(V), Voltage(V)_smooth,
//! Current(mA), Current(mA)_smooth, Cycle_Index, Test Time (h),
//! Brightness Derivative, Brightness Derivative_smooth
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use optoechem::prelude::*;
//!
//! let electrical = CsvSource::new("run/Echem_Extract.csv");
//! let optical = CsvSource::new("run/image_luminance.csv");
//!
//! let pipeline = Pipeline::new(PipelineConfig::with_smoothing(SmoothingWindows::STANDARD));
//! let (output, written) = pipeline.run_to_file(
//!     &electrical,
//!     &optical,
//!     std::path::Path::new("run/combined_data.csv"),
//!     OutputFormat::Csv,
//! )?;
//!
//! println!("{}", written);
//! println!("{} frames skipped", output.stats.skipped());
//! # Ok::<(), optoechem::pipeline::PipelineError>(())
//! ```
//!
//! ## Failure Model
//!
//! Only a malformed input table (missing column, unparseable cell) or a write
//! failure aborts a run. Frames without electrical coverage, rejected
//! smoothing windows and degenerate interpolation brackets are logged,
//! counted in [`pipeline::PipelineStats`], and skipped.
//!
//! ## Features
//!
//! - `colorized_output` (default): coloured run summaries via `console`
//! - `parquet`: Parquet output of the combined table
//! - `parallel`: electrical and optical smoothing on separate threads

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod align;
pub mod derivative;
pub mod metadata;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod series;
pub mod smoothing;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::align::{cycle_label, CombinedRecord, CombinedSeries, SkipReason};
    pub use crate::metadata::{RunInputs, RunMetadata};
    pub use crate::pipeline::{
        Pipeline, PipelineConfig, PipelineError, PipelineOutput, PipelineStats, SmoothingWindows,
        Stage,
    };
    pub use crate::schema::{columns, SchemaError};
    pub use crate::series::{
        CsvSource, ElectricalSample, ElectricalSeries, ElectricalSource, OpticalSample,
        OpticalSeries, OpticalSource, SeriesError,
    };
    pub use crate::smoothing::{Channel, SavitzkyGolay, SmoothingOutcome};
    pub use crate::writer::{write_combined, OutputFormat, WriterError, WriterStats};
}
