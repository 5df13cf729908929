use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use optoechem::writer::OutputFormat;

mod config;
mod info;
mod merge;
mod preset;

pub use preset::SmoothingPreset;

/// optoechem - merge electrochemical and optical time series
#[derive(Parser)]
#[command(name = "optoechem")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Smoothing preset for the four channels.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PresetArg {
    /// No smoothing on any channel
    Raw,
    /// Front-end defaults (21/21/101/41)
    #[default]
    Standard,
}

impl From<PresetArg> for SmoothingPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Raw => SmoothingPreset::Raw,
            PresetArg::Standard => SmoothingPreset::Standard,
        }
    }
}

/// Output format of the combined table.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Comma-separated text
    Csv,
    /// Apache Parquet (requires the parquet feature)
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

/// Arguments of the merge command
#[derive(Args, Debug, Default)]
pub struct MergeArgs {
    /// Experiment directory holding Echem_Extract.csv and image_luminance.csv
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Electrical table (default: DIR/Echem_Extract.csv)
    #[arg(short = 'e', long, value_name = "FILE")]
    pub electrical: Option<PathBuf>,

    /// Optical table (default: DIR/image_luminance.csv)
    #[arg(short = 'l', long, value_name = "FILE")]
    pub optical: Option<PathBuf>,

    /// Combined output file (default: DIR/combined_data.csv)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Smoothing preset; individual window flags override it
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Voltage smoothing window (0 disables)
    #[arg(long, value_name = "N")]
    pub voltage_window: Option<usize>,

    /// Current smoothing window (0 disables)
    #[arg(long, value_name = "N")]
    pub current_window: Option<usize>,

    /// Brightness smoothing window (0 disables)
    #[arg(long, value_name = "N")]
    pub brightness_window: Option<usize>,

    /// Brightness derivative smoothing window (0 disables)
    #[arg(long, value_name = "N")]
    pub derivative_window: Option<usize>,

    /// Rescale 8-bit luminance to percent of full scale
    #[arg(long)]
    pub normalize_luminance: bool,

    /// Output format (default: from the output extension, else csv)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Do not write the <stem>.meta.json run metadata sidecar
    #[arg(long)]
    pub no_metadata: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Align an electrical and an optical series into one combined table
    Merge(MergeArgs),

    /// Display information about a combined table
    Info {
        /// Combined CSV file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge(args) => merge::run(args),
        Commands::Info { file } => info::run(file),
    }
}
