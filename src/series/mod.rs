//! # Input Series
//!
//! Typed samples for the two instrument streams, CSV ingestion with one-time
//! schema validation, and the normalization step (stable time sort plus the
//! A → mA current conversion).
//!
//! Series are never mutated in place. Normalizing or smoothing consumes the
//! previous value and returns a new one with the extra columns.

mod error;
mod normalize;
pub(crate) mod reader;
mod source;
pub mod timestamp;
mod types;


pub use error::SeriesError;
pub use normalize::{
    NormalizedElectrical, NormalizedOptical, PreparedElectrical, PreparedOptical,
    LUMINANCE_PERCENT_SCALE, MILLIAMPS_PER_AMP,
};
pub use reader::{ELECTRICAL_TABLE, OPTICAL_TABLE, REST_CYCLE};
pub use source::{CsvSource, ElectricalSource, OpticalSource};
pub use types::{
    ElectricalSample, ElectricalSeries, OpticalSample, OpticalSeries, Series, Timestamped,
};
