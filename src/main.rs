//! # optoechem
//!
//! Command-line front end for merging electrochemical and optical brightness
//! measurements.
//!
//! ## Usage
//!
//! ```bash
//! # Merge DIR/Echem_Extract.csv and DIR/image_luminance.csv into DIR/combined_data.csv
//! optoechem merge DIR
//!
//! # Explicit inputs, no smoothing, Parquet output
//! optoechem merge --electrical echem.csv --optical frames.csv \
//!     --preset raw --output merged.parquet
//!
//! # Inspect a combined table
//! optoechem info DIR/combined_data.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
