use serde::{Deserialize, Serialize};

use crate::smoothing::Channel;

/// Smoothing window per channel; `0` disables smoothing for that channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingWindows {
    /// Voltage window
    pub voltage: usize,
    /// Current window
    pub current: usize,
    /// Brightness window
    pub brightness: usize,
    /// Brightness derivative window
    pub derivative: usize,
}

impl SmoothingWindows {
    /// No smoothing on any channel
    pub const NONE: Self = Self {
        voltage: 0,
        current: 0,
        brightness: 0,
        derivative: 0,
    };

    /// Windows used by the lab front end by default
    pub const STANDARD: Self = Self {
        voltage: 21,
        current: 21,
        brightness: 101,
        derivative: 41,
    };

    /// Window configured for `channel`
    pub fn window(&self, channel: Channel) -> usize {
        match channel {
            Channel::Voltage => self.voltage,
            Channel::Current => self.current,
            Channel::Brightness => self.brightness,
            Channel::BrightnessDerivative => self.derivative,
        }
    }
}

impl Default for SmoothingWindows {
    fn default() -> Self {
        Self::NONE
    }
}

/// Everything the engine needs to know, passed by value into [`super::Pipeline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Per-channel smoothing windows
    pub smoothing: SmoothingWindows,

    /// Rescale 8-bit luminance to percent of full scale before smoothing
    pub normalize_luminance: bool,
}

impl PipelineConfig {
    /// Config with the given smoothing windows and raw luminance
    pub fn with_smoothing(smoothing: SmoothingWindows) -> Self {
        Self {
            smoothing,
            ..Default::default()
        }
    }
}
