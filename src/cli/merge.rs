use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use optoechem::metadata::{RunInputs, RunMetadata};
use optoechem::pipeline::{Pipeline, PipelineConfig, SmoothingWindows};
use optoechem::series::{CsvSource, ElectricalSource, OpticalSource};
use optoechem::writer::OutputFormat;

use super::config::Config;
use super::{MergeArgs, SmoothingPreset};

/// Electrical table written by the extraction step
pub const ELECTRICAL_FILE: &str = "Echem_Extract.csv";
/// Optical table written by the image luminance step
pub const OPTICAL_FILE: &str = "image_luminance.csv";
/// Default combined table name
pub const OUTPUT_FILE: &str = "combined_data.csv";

const ELECTRICAL_HINT: &str = "run the extraction step on the cycler export first";
const OPTICAL_HINT: &str = "run the image luminance extraction first";

/// Fully resolved merge settings
#[derive(Debug, Clone, PartialEq)]
pub struct MergePlan {
    pub electrical: PathBuf,
    pub optical: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub config: PipelineConfig,
    pub metadata: bool,
}

impl MergePlan {
    /// Combine CLI flags, the config file and the preset.
    ///
    /// Precedence: explicit flag, then config file, then preset or directory
    /// convention.
    pub fn resolve(args: &MergeArgs, file: &Config) -> Self {
        let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let in_dir = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                dir.join(path)
            }
        };

        let electrical = args.electrical.clone().unwrap_or_else(|| {
            in_dir(file.input.electrical.as_deref().unwrap_or(Path::new(ELECTRICAL_FILE)))
        });
        let optical = args.optical.clone().unwrap_or_else(|| {
            in_dir(file.input.optical.as_deref().unwrap_or(Path::new(OPTICAL_FILE)))
        });
        let output = args.output.clone().unwrap_or_else(|| {
            in_dir(file.output.file.as_deref().unwrap_or(Path::new(OUTPUT_FILE)))
        });

        let format = args
            .format
            .map(OutputFormat::from)
            .or(file.output.format)
            .or_else(|| OutputFormat::from_path(&output))
            .unwrap_or_default();

        let preset = args
            .preset
            .map(SmoothingPreset::from)
            .or(file.smoothing.preset)
            .unwrap_or_default();
        let base = preset.windows();
        let smoothing = SmoothingWindows {
            voltage: args
                .voltage_window
                .or(file.smoothing.voltage)
                .unwrap_or(base.voltage),
            current: args
                .current_window
                .or(file.smoothing.current)
                .unwrap_or(base.current),
            brightness: args
                .brightness_window
                .or(file.smoothing.brightness)
                .unwrap_or(base.brightness),
            derivative: args
                .derivative_window
                .or(file.smoothing.derivative)
                .unwrap_or(base.derivative),
        };

        let config = PipelineConfig {
            smoothing,
            normalize_luminance: args.normalize_luminance
                || file.input.normalize_luminance.unwrap_or(false),
        };

        Self {
            electrical,
            optical,
            output,
            format,
            config,
            metadata: !args.no_metadata && file.output.metadata.unwrap_or(true),
        }
    }
}

/// Merge an electrical and an optical table into a combined table
pub fn run(args: MergeArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let plan = MergePlan::resolve(&args, &file_config);

    info!("optoechem - merge");
    info!("=================");
    info!("Electrical: {}", plan.electrical.display());
    info!("Optical:    {}", plan.optical.display());
    info!("Output:     {} ({})", plan.output.display(), plan.format);
    let windows = plan.config.smoothing;
    info!(
        "Smoothing windows: voltage {}, current {}, brightness {}, derivative {}",
        windows.voltage, windows.current, windows.brightness, windows.derivative
    );
    if plan.config.normalize_luminance {
        info!("Luminance: rescaled to percent");
    }

    let electrical = CsvSource::new(&plan.electrical).with_missing_hint(ELECTRICAL_HINT);
    let optical = CsvSource::new(&plan.optical).with_missing_hint(OPTICAL_HINT);

    let pipeline = Pipeline::new(plan.config);
    let (output, written) = pipeline
        .run_to_file(&electrical, &optical, &plan.output, plan.format)
        .context("Merge failed")?;

    if plan.metadata {
        let inputs = RunInputs {
            electrical: ElectricalSource::describe(&electrical),
            optical: OpticalSource::describe(&optical),
        };
        let metadata =
            RunMetadata::new(inputs, plan.config, output.stats.clone()).with_output(&written);
        write_sidecar(&metadata, &plan.output);
    }

    print!("{}", output.stats.format_colored());
    println!("{}", written);

    Ok(())
}

/// Write the run metadata next to `output`.
///
/// The combined table is already persisted at this point, so a failure here
/// is logged and the merge still succeeds.
fn write_sidecar(metadata: &RunMetadata, output: &Path) -> Option<PathBuf> {
    match metadata.write_sidecar(output) {
        Ok(path) => {
            info!("Run metadata: {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!(
                "Run metadata for {} was not written: {}",
                output.display(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{FormatArg, PresetArg};

    fn in_dir(dir: &str) -> MergeArgs {
        MergeArgs {
            dir: Some(PathBuf::from(dir)),
            ..Default::default()
        }
    }

    #[test]
    fn test_directory_defaults() {
        let plan = MergePlan::resolve(&in_dir("run7"), &Config::default());

        assert_eq!(plan.electrical, Path::new("run7").join(ELECTRICAL_FILE));
        assert_eq!(plan.optical, Path::new("run7").join(OPTICAL_FILE));
        assert_eq!(plan.output, Path::new("run7").join(OUTPUT_FILE));
        assert_eq!(plan.format, OutputFormat::Csv);
        assert_eq!(plan.config.smoothing, SmoothingWindows::STANDARD);
        assert!(!plan.config.normalize_luminance);
        assert!(plan.metadata);
    }

    #[test]
    fn test_flags_override_config_and_preset() {
        let config = Config::from_str(
            r#"
            [smoothing]
            preset = "raw"
            brightness = 51
            voltage = 7

            [output]
            metadata = false
            "#,
        )
        .unwrap();
        let args = MergeArgs {
            voltage_window: Some(3),
            ..in_dir("run7")
        };

        let plan = MergePlan::resolve(&args, &config);

        assert_eq!(
            plan.config.smoothing,
            SmoothingWindows {
                voltage: 3,
                current: 0,
                brightness: 51,
                derivative: 0,
            }
        );
        assert!(!plan.metadata);
    }

    #[test]
    fn test_preset_flag_beats_config_preset() {
        let config = Config::from_str("[smoothing]\npreset = \"standard\"\n").unwrap();
        let args = MergeArgs {
            preset: Some(PresetArg::Raw),
            ..Default::default()
        };

        let plan = MergePlan::resolve(&args, &config);
        assert_eq!(plan.config.smoothing, SmoothingWindows::NONE);
    }

    #[test]
    fn test_config_paths_resolve_against_directory() {
        let config = Config::from_str(
            r#"
            [input]
            electrical = "echem.csv"

            [output]
            file = "merged.parquet"
            "#,
        )
        .unwrap();

        let plan = MergePlan::resolve(&in_dir("run7"), &config);

        assert_eq!(plan.electrical, Path::new("run7").join("echem.csv"));
        assert_eq!(plan.output, Path::new("run7").join("merged.parquet"));
        assert_eq!(plan.format, OutputFormat::Parquet);
    }

    #[test]
    fn test_explicit_paths_and_format() {
        let args = MergeArgs {
            electrical: Some(PathBuf::from("/data/e.csv")),
            optical: Some(PathBuf::from("o.csv")),
            output: Some(PathBuf::from("out.parquet")),
            format: Some(FormatArg::Csv),
            no_metadata: true,
            normalize_luminance: true,
            ..in_dir("run7")
        };

        let plan = MergePlan::resolve(&args, &Config::default());

        assert_eq!(plan.electrical, PathBuf::from("/data/e.csv"));
        assert_eq!(plan.optical, PathBuf::from("o.csv"));
        assert_eq!(plan.output, PathBuf::from("out.parquet"));
        assert_eq!(plan.format, OutputFormat::Csv);
        assert!(plan.config.normalize_luminance);
        assert!(!plan.metadata);
    }

    fn metadata() -> RunMetadata {
        RunMetadata::new(
            RunInputs {
                electrical: ELECTRICAL_FILE.to_string(),
                optical: OPTICAL_FILE.to_string(),
            },
            PipelineConfig::default(),
            Default::default(),
        )
    }

    #[test]
    fn test_sidecar_written_next_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(OUTPUT_FILE);

        let path = write_sidecar(&metadata(), &output).unwrap();

        assert_eq!(path, dir.path().join("combined_data.meta.json"));
        assert!(path.is_file());
    }

    #[test]
    fn test_sidecar_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(OUTPUT_FILE);
        std::fs::write(&output, "Timestamp\n").unwrap();
        // a directory in the way of the sidecar file
        std::fs::create_dir(dir.path().join("combined_data.meta.json")).unwrap();

        assert_eq!(write_sidecar(&metadata(), &output), None);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Timestamp\n");
    }
}
