//! # Run Metadata
//!
//! Every merge can leave a JSON sidecar next to its output
//! (`combined_data.csv` → `combined_data.meta.json`) recording where the
//! inputs came from, the configuration used and what happened to each
//! channel. The combined table itself carries no provenance, so the sidecar
//! is what makes a result reproducible.

mod error;
mod run;


pub use error::MetadataError;
pub use run::{sidecar_path, OutputSummary, RunInputs, RunMetadata, SIDECAR_EXTENSION};
