//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, a lab can keep its settings next to the
//! data:
//!
//! ```toml
//! # optoechem.toml
//! [smoothing]
//! preset = "standard"
//! brightness = 51
//!
//! [input]
//! electrical = "Echem_Extract.csv"
//! optical = "image_luminance.csv"
//! normalize_luminance = false
//!
//! [output]
//! file = "combined_data.csv"
//! format = "csv"
//! metadata = true
//! ```
//!
//! Relative paths are resolved against the experiment directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use optoechem::writer::OutputFormat;

use super::SmoothingPreset;

/// Root configuration structure for optoechem.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Smoothing windows.
    #[serde(default)]
    pub smoothing: SmoothingConfig,

    /// Input tables.
    #[serde(default)]
    pub input: InputConfig,

    /// Output table.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Smoothing settings; explicit windows override the preset.
#[derive(Debug, Default, Deserialize)]
pub struct SmoothingConfig {
    /// Base preset.
    pub preset: Option<SmoothingPreset>,

    /// Voltage window.
    pub voltage: Option<usize>,

    /// Current window.
    pub current: Option<usize>,

    /// Brightness window.
    pub brightness: Option<usize>,

    /// Brightness derivative window.
    pub derivative: Option<usize>,
}

/// Input table settings.
#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    /// Electrical table path.
    pub electrical: Option<PathBuf>,

    /// Optical table path.
    pub optical: Option<PathBuf>,

    /// Rescale 8-bit luminance to percent.
    pub normalize_luminance: Option<bool>,
}

/// Output settings.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Combined table path.
    pub file: Option<PathBuf>,

    /// Combined table format.
    pub format: Option<OutputFormat>,

    /// Write the run metadata sidecar.
    pub metadata: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [smoothing]
            preset = "raw"
            brightness = 51

            [input]
            electrical = "echem.csv"
            optical = "frames.csv"
            normalize_luminance = true

            [output]
            file = "merged.parquet"
            format = "parquet"
            metadata = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.smoothing.preset, Some(SmoothingPreset::Raw));
        assert_eq!(config.smoothing.brightness, Some(51));
        assert_eq!(config.smoothing.voltage, None);
        assert_eq!(config.input.electrical, Some(PathBuf::from("echem.csv")));
        assert_eq!(config.input.optical, Some(PathBuf::from("frames.csv")));
        assert_eq!(config.input.normalize_luminance, Some(true));
        assert_eq!(config.output.file, Some(PathBuf::from("merged.parquet")));
        assert_eq!(config.output.format, Some(OutputFormat::Parquet));
        assert_eq!(config.output.metadata, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [smoothing]
            derivative = 0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.smoothing.derivative, Some(0));
        assert_eq!(config.smoothing.preset, None);
        assert!(config.input.electrical.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.smoothing.voltage, None);
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let toml = r#"
            [smoothing]
            preset = "heavy"
        "#;
        let err = Config::from_str(toml).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("heavy"));
        assert!(message.contains("raw") && message.contains("standard"));
    }
}
