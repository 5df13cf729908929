//! # Pipeline
//!
//! Runs the stages strictly in order:
//!
//! ```text
//! load ─▶ normalize (sort, A → mA) ─▶ smooth V, I, brightness ─▶ align ─▶ derivative ─▶ smooth derivative
//! ```
//!
//! Only loading and writing can fail; those errors abort the run and name the
//! stage. Everything between them recovers locally: bad smoothing windows
//! degrade to a copy and unalignable frames are dropped, both logged and
//! counted in [`PipelineStats`].
//!
//! With the `parallel` feature the electrical and optical smoothing passes run
//! concurrently; they share nothing.

mod config;
mod error;
mod stats;

#[cfg(test)]
mod tests;

use std::path::Path;

use log::info;

use crate::align::{align, Alignment, CombinedSeries, SkipReason};
use crate::derivative;
use crate::series::{ElectricalSeries, ElectricalSource, OpticalSeries, OpticalSource};
use crate::smoothing::Channel;
use crate::writer::{write_combined, OutputFormat, WriterStats};

pub use config::{PipelineConfig, SmoothingWindows};
pub use error::{PipelineError, Stage};
pub use stats::{ChannelSmoothing, PipelineStats};

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Combined table with derivative columns
    pub series: CombinedSeries,
    /// Optical samples that produced no row
    pub skipped: Vec<SkipReason>,
    /// Run counters
    pub stats: PipelineStats,
}

/// The alignment/smoothing/derivative engine
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Pipeline using `config`
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load both inputs and process them.
    pub fn run<E, O>(&self, electrical: &E, optical: &O) -> Result<PipelineOutput, PipelineError>
    where
        E: ElectricalSource + ?Sized,
        O: OpticalSource + ?Sized,
    {
        let electrical = electrical
            .load_electrical()
            .map_err(|source| PipelineError::Input {
                stage: Stage::LoadElectrical,
                source,
            })?;
        let optical = optical
            .load_optical()
            .map_err(|source| PipelineError::Input {
                stage: Stage::LoadOptical,
                source,
            })?;
        info!("Files read successfully.");

        Ok(self.process(electrical, optical))
    }

    /// Run and write the combined table to `path`.
    ///
    /// The file only appears once it is complete.
    pub fn run_to_file<E, O>(
        &self,
        electrical: &E,
        optical: &O,
        path: &Path,
        format: OutputFormat,
    ) -> Result<(PipelineOutput, WriterStats), PipelineError>
    where
        E: ElectricalSource + ?Sized,
        O: OpticalSource + ?Sized,
    {
        let output = self.run(electrical, optical)?;
        let written = write_combined(&output.series, path, format)?;
        Ok((output, written))
    }

    /// Process already-loaded series. Never fails.
    pub fn process(&self, electrical: ElectricalSeries, optical: OpticalSeries) -> PipelineOutput {
        let mut stats = PipelineStats {
            electrical_samples: electrical.len(),
            optical_samples: optical.len(),
            ..Default::default()
        };

        let electrical = electrical.normalize();
        let optical = optical.normalize(self.config.normalize_luminance);
        info!("Data preprocessing successful.");

        let windows = self.config.smoothing;

        #[cfg(feature = "parallel")]
        let (electrical, optical) = rayon::join(
            move || electrical.smooth(windows.voltage, windows.current),
            move || optical.smooth(windows.brightness),
        );

        #[cfg(not(feature = "parallel"))]
        let (electrical, optical) = (
            electrical.smooth(windows.voltage, windows.current),
            optical.smooth(windows.brightness),
        );

        for (channel, outcome) in electrical.outcomes() {
            stats.smoothing.push(ChannelSmoothing { channel, outcome });
        }
        stats.smoothing.push(ChannelSmoothing {
            channel: Channel::Brightness,
            outcome: optical.outcome(),
        });

        let alignment = align(&electrical, &optical);
        stats.coverage_gaps = alignment.coverage_gaps();
        stats.computation_errors = alignment.computation_errors();
        let Alignment { records, skipped } = alignment;

        let (series, outcome) = derivative::attach(CombinedSeries::new(records), windows.derivative);
        stats.smoothing.push(ChannelSmoothing {
            channel: Channel::BrightnessDerivative,
            outcome,
        });
        stats.records = series.len();
        stats.derivative_defined = series
            .derivative()
            .map(|d| d.iter().flatten().filter(|v| v.is_finite()).count())
            .unwrap_or(0);
        info!("Data combination successful.");

        PipelineOutput {
            series,
            skipped,
            stats,
        }
    }
}
