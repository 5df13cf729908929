//! Normalization and per-channel smoothing of the two input series.
//!
//! Each step consumes its input and returns a new type carrying the extra
//! columns, so a stage can never see half-prepared data:
//!
//! ```text
//! ElectricalSeries --normalize--> NormalizedElectrical --smooth--> PreparedElectrical
//! OpticalSeries    --normalize--> NormalizedOptical    --smooth--> PreparedOptical
//! ```

use chrono::NaiveDateTime;
use log::debug;

use super::{ElectricalSeries, OpticalSeries};
use crate::smoothing::{smooth_channel, Channel, SmoothedChannel, SmoothingOutcome};

/// Amperes to milliamperes
pub const MILLIAMPS_PER_AMP: f64 = 1000.0;

/// 8-bit greyscale to percent of full scale
pub const LUMINANCE_PERCENT_SCALE: f64 = 100.0 / 255.0;

/// Electrical series sorted by time, current in mA
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedElectrical {
    timestamps: Vec<NaiveDateTime>,
    voltage: Vec<f64>,
    current_ma: Vec<f64>,
    cycle_index: Vec<i64>,
}

/// Optical series sorted by time
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOptical {
    timestamps: Vec<NaiveDateTime>,
    brightness: Vec<f64>,
}

impl ElectricalSeries {
    /// Sort by timestamp (stable) and convert current to milliamperes.
    ///
    /// This is the only place the unit conversion happens.
    pub fn normalize(self) -> NormalizedElectrical {
        if !self.is_time_ordered() {
            debug!("Electrical samples out of time order; sorting");
        }
        let samples = self.into_time_ordered();
        debug!("Normalized {} electrical samples", samples.len());

        NormalizedElectrical {
            timestamps: samples.iter().map(|s| s.timestamp).collect(),
            voltage: samples.iter().map(|s| s.voltage).collect(),
            current_ma: samples.iter().map(|s| s.current_a * MILLIAMPS_PER_AMP).collect(),
            cycle_index: samples.iter().map(|s| s.cycle_index).collect(),
        }
    }
}

impl OpticalSeries {
    /// Sort by timestamp (stable), optionally rescaling 8-bit luminance to percent.
    pub fn normalize(self, luminance_percent: bool) -> NormalizedOptical {
        if !self.is_time_ordered() {
            debug!("Optical samples out of time order; sorting");
        }
        let samples = self.into_time_ordered();
        let scale = if luminance_percent {
            LUMINANCE_PERCENT_SCALE
        } else {
            1.0
        };
        debug!(
            "Normalized {} optical samples (luminance scale {})",
            samples.len(),
            scale
        );

        NormalizedOptical {
            timestamps: samples.iter().map(|s| s.timestamp).collect(),
            brightness: samples.iter().map(|s| s.luminance * scale).collect(),
        }
    }
}

impl NormalizedElectrical {
    /// Sample instants, non-decreasing
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Voltage (V)
    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    /// Current (mA)
    pub fn current_ma(&self) -> &[f64] {
        &self.current_ma
    }

    /// Cycle index per sample
    pub fn cycle_index(&self) -> &[i64] {
        &self.cycle_index
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Add the smoothed voltage and current channels.
    pub fn smooth(self, voltage_window: usize, current_window: usize) -> PreparedElectrical {
        let voltage_smooth = smooth_channel(Channel::Voltage, &self.voltage, voltage_window);
        let current_ma_smooth = smooth_channel(Channel::Current, &self.current_ma, current_window);

        PreparedElectrical {
            base: self,
            voltage_smooth,
            current_ma_smooth,
        }
    }
}

impl NormalizedOptical {
    /// Frame instants, non-decreasing
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Brightness per frame
    pub fn brightness(&self) -> &[f64] {
        &self.brightness
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether there are no frames
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Add the smoothed brightness channel.
    pub fn smooth(self, brightness_window: usize) -> PreparedOptical {
        let brightness_smooth = smooth_channel(Channel::Brightness, &self.brightness, brightness_window);

        PreparedOptical {
            base: self,
            brightness_smooth,
        }
    }
}

/// Electrical series ready for alignment
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedElectrical {
    base: NormalizedElectrical,
    voltage_smooth: SmoothedChannel,
    current_ma_smooth: SmoothedChannel,
}

impl PreparedElectrical {
    /// Underlying normalized columns
    pub fn normalized(&self) -> &NormalizedElectrical {
        &self.base
    }

    /// Smoothed voltage (V)
    pub fn voltage_smooth(&self) -> &[f64] {
        &self.voltage_smooth.values
    }

    /// Smoothed current (mA)
    pub fn current_ma_smooth(&self) -> &[f64] {
        &self.current_ma_smooth.values
    }

    /// Smoothing outcomes for voltage and current
    pub fn outcomes(&self) -> [(Channel, SmoothingOutcome); 2] {
        [
            (Channel::Voltage, self.voltage_smooth.outcome),
            (Channel::Current, self.current_ma_smooth.outcome),
        ]
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

/// Optical series ready for alignment
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOptical {
    base: NormalizedOptical,
    brightness_smooth: SmoothedChannel,
}

impl PreparedOptical {
    /// Underlying normalized columns
    pub fn normalized(&self) -> &NormalizedOptical {
        &self.base
    }

    /// Smoothed brightness
    pub fn brightness_smooth(&self) -> &[f64] {
        &self.brightness_smooth.values
    }

    /// Smoothing outcome for brightness
    pub fn outcome(&self) -> SmoothingOutcome {
        self.brightness_smooth.outcome
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Whether there are no frames
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}
