//! Smoothing presets for common use cases.
//!
//! Presets fill in all four smoothing windows at once so that a typical run
//! needs no window flags at all.

use serde::Deserialize;

use optoechem::pipeline::SmoothingWindows;

/// Smoothing presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingPreset {
    /// Unsmoothed output; every `_smooth` column equals its source.
    Raw,

    /// Windows the plotting front end starts with (default).
    ///
    /// - Voltage: 21
    /// - Current: 21
    /// - Brightness: 101
    /// - Brightness derivative: 41
    #[default]
    Standard,
}

impl SmoothingPreset {
    /// Returns the smoothing windows for this preset.
    pub fn windows(&self) -> SmoothingWindows {
        match self {
            SmoothingPreset::Raw => SmoothingWindows::NONE,
            SmoothingPreset::Standard => SmoothingWindows::STANDARD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_defaults() {
        let standard = SmoothingPreset::default();
        assert_eq!(standard, SmoothingPreset::Standard);
        assert_eq!(standard.windows().voltage, 21);
        assert_eq!(standard.windows().current, 21);
        assert_eq!(standard.windows().brightness, 101);
        assert_eq!(standard.windows().derivative, 41);
    }

    #[test]
    fn test_raw_disables_everything() {
        assert_eq!(SmoothingPreset::Raw.windows(), SmoothingWindows::NONE);
    }
}
