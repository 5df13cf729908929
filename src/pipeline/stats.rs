use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "colorized_output")]
use console::style;

use crate::smoothing::{Channel, SmoothingOutcome};

/// Smoothing result of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSmoothing {
    /// Smoothed channel
    pub channel: Channel,
    /// What happened
    pub outcome: SmoothingOutcome,
}

/// Counters collected during a run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Electrical samples read
    pub electrical_samples: usize,
    /// Optical samples read
    pub optical_samples: usize,
    /// Combined rows produced
    pub records: usize,
    /// Optical samples dropped for lack of electrical coverage
    pub coverage_gaps: usize,
    /// Optical samples dropped because interpolation failed
    pub computation_errors: usize,
    /// Rows with a defined, finite brightness derivative
    pub derivative_defined: usize,
    /// Per-channel smoothing outcomes, in pipeline order
    pub smoothing: Vec<ChannelSmoothing>,
}

impl PipelineStats {
    /// Channels whose smoothing request was rejected
    pub fn degraded_channels(&self) -> Vec<Channel> {
        self.smoothing
            .iter()
            .filter(|s| s.outcome.is_degraded())
            .map(|s| s.channel)
            .collect()
    }

    /// Optical samples that produced no row
    pub fn skipped(&self) -> usize {
        self.coverage_gaps + self.computation_errors
    }

    /// Format the summary with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Merge Summary").bold().cyan()));
            output.push_str(&format!("{}\n", style("=============").cyan()));
            output.push_str(&format!(
                "{}: {} electrical, {} optical\n",
                style("Input").bold(),
                self.electrical_samples,
                self.optical_samples
            ));
            output.push_str(&format!(
                "{}: {} rows\n",
                style("Output").bold(),
                style(self.records).green()
            ));

            let skipped = if self.skipped() > 0 {
                style(self.skipped()).yellow()
            } else {
                style(self.skipped()).green()
            };
            output.push_str(&format!(
                "{}: {} ({} coverage gaps, {} computation errors)\n",
                style("Skipped").bold(),
                skipped,
                self.coverage_gaps,
                self.computation_errors
            ));

            output.push_str(&format!("{}:\n", style("Smoothing").bold()));
            for s in &self.smoothing {
                let outcome = if s.outcome.is_degraded() {
                    style(s.outcome.to_string()).yellow()
                } else {
                    style(s.outcome.to_string()).green()
                };
                output.push_str(&format!("  {}: {}\n", s.channel, outcome));
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Merge Summary")?;
        writeln!(f, "=============")?;
        writeln!(
            f,
            "Input: {} electrical, {} optical",
            self.electrical_samples, self.optical_samples
        )?;
        writeln!(f, "Output: {} rows", self.records)?;
        writeln!(
            f,
            "Skipped: {} ({} coverage gaps, {} computation errors)",
            self.skipped(),
            self.coverage_gaps,
            self.computation_errors
        )?;
        writeln!(f, "Smoothing:")?;
        for s in &self.smoothing {
            writeln!(f, "  {}: {}", s.channel, s.outcome)?;
        }
        Ok(())
    }
}
