//! # Smoothing Filter
//!
//! Applies the quadratic Savitzky–Golay filter to one named channel and
//! returns its `_smooth` companion.
//!
//! ## Window policy
//!
//! | Window | Result | Outcome |
//! |--------|--------|---------|
//! | `0` | exact copy | [`SmoothingOutcome::Disabled`] |
//! | odd, `<= len` | filtered, same length | [`SmoothingOutcome::Applied`] |
//! | even | exact copy, warning logged | [`SmoothingOutcome::InvalidWindow`] |
//! | odd, `> len` | exact copy, warning logged | [`SmoothingOutcome::WindowTooLong`] |
//!
//! None of these fail the run: callers use `0` to skip smoothing, and a bad
//! window only costs the one channel its smoothing.

mod savgol;

#[cfg(test)]
mod tests;

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::schema::columns;

pub use savgol::{SavitzkyGolay, QUADRATIC};

/// Errors raised by the filter itself
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmoothingError {
    /// Window is zero or even
    #[error("Smoothing window must be a positive odd number, got {0}")]
    InvalidWindow(usize),

    /// Fewer samples than the window needs
    #[error("Smoothing window {window} exceeds series length {len}")]
    WindowTooLong {
        /// Requested window
        window: usize,
        /// Available samples
        len: usize,
    },

    /// Normal equations could not be solved
    #[error("Singular fit for window {window}, order {order}")]
    Singular {
        /// Requested window
        window: usize,
        /// Polynomial order
        order: usize,
    },
}

/// Channels that carry a configurable smoothing window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Electrical voltage
    Voltage,
    /// Electrical current, in milliamperes
    Current,
    /// Optical brightness
    Brightness,
    /// Derivative of smoothed brightness over test time
    BrightnessDerivative,
}

impl Channel {
    /// Every smoothed channel, in pipeline order
    pub const ALL: [Channel; 4] = [
        Channel::Voltage,
        Channel::Current,
        Channel::Brightness,
        Channel::BrightnessDerivative,
    ];

    /// Column holding the unsmoothed values
    pub fn column(&self) -> &'static str {
        match self {
            Channel::Voltage => columns::VOLTAGE,
            Channel::Current => columns::CURRENT_MA,
            Channel::Brightness => columns::BRIGHTNESS,
            Channel::BrightnessDerivative => columns::BRIGHTNESS_DERIVATIVE,
        }
    }

    /// Column holding the smoothed values
    pub fn smoothed_column(&self) -> &'static str {
        match self {
            Channel::Voltage => columns::VOLTAGE_SMOOTH,
            Channel::Current => columns::CURRENT_MA_SMOOTH,
            Channel::Brightness => columns::BRIGHTNESS_SMOOTH,
            Channel::BrightnessDerivative => columns::BRIGHTNESS_DERIVATIVE_SMOOTH,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// What happened to a channel's smoothing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SmoothingOutcome {
    /// Window 0: values copied
    Disabled,
    /// Filter applied with this window
    Applied {
        /// Window length
        window: usize,
    },
    /// Even window: values copied
    InvalidWindow {
        /// Rejected window length
        window: usize,
    },
    /// Window longer than the channel: values copied
    WindowTooLong {
        /// Rejected window length
        window: usize,
        /// Number of samples available
        len: usize,
    },
}

impl SmoothingOutcome {
    /// Whether the filter actually changed the values
    pub fn is_applied(&self) -> bool {
        matches!(self, SmoothingOutcome::Applied { .. })
    }

    /// Whether the request was rejected and degraded to a copy
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            SmoothingOutcome::InvalidWindow { .. } | SmoothingOutcome::WindowTooLong { .. }
        )
    }
}

impl fmt::Display for SmoothingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoothingOutcome::Disabled => write!(f, "disabled"),
            SmoothingOutcome::Applied { window } => write!(f, "applied ({} points)", window),
            SmoothingOutcome::InvalidWindow { window } => {
                write!(f, "skipped: even window {}", window)
            }
            SmoothingOutcome::WindowTooLong { window, len } => {
                write!(f, "skipped: window {} > {} samples", window, len)
            }
        }
    }
}

/// A channel's `_smooth` companion
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedChannel {
    /// Source channel
    pub channel: Channel,
    /// One value per source sample
    pub values: Vec<f64>,
    /// How the values were produced
    pub outcome: SmoothingOutcome,
}

/// Smooth one channel according to the window policy.
///
/// Never fails and never changes the number of values.
pub fn smooth_channel(channel: Channel, values: &[f64], window: usize) -> SmoothedChannel {
    let outcome = if window == 0 {
        debug!("Smoothing disabled for {}", channel);
        SmoothingOutcome::Disabled
    } else if window % 2 == 0 {
        warn!(
            "Smoothing points for {} must be a positive odd number, got {}. No smoothing applied.",
            channel, window
        );
        SmoothingOutcome::InvalidWindow { window }
    } else {
        match SavitzkyGolay::quadratic(window).and_then(|filter| filter.apply(values)) {
            Ok(smoothed) => {
                debug!(
                    "Smoothing applied on {} with {} points and stored in {}",
                    channel,
                    window,
                    channel.smoothed_column()
                );
                return SmoothedChannel {
                    channel,
                    values: smoothed,
                    outcome: SmoothingOutcome::Applied { window },
                };
            }
            Err(e) => {
                warn!("Could not smooth {}: {}. No smoothing applied.", channel, e);
                match e {
                    SmoothingError::InvalidWindow(window) => {
                        SmoothingOutcome::InvalidWindow { window }
                    }
                    SmoothingError::WindowTooLong { window, len } => {
                        SmoothingOutcome::WindowTooLong { window, len }
                    }
                    SmoothingError::Singular { window, .. } => {
                        SmoothingOutcome::InvalidWindow { window }
                    }
                }
            }
        }
    };

    SmoothedChannel {
        channel,
        values: values.to_vec(),
        outcome,
    }
}

/// Smooth a channel with undefined entries.
///
/// The defined values are smoothed as one contiguous sequence and written back
/// to their positions; undefined entries stay undefined.
pub fn smooth_gapped(
    channel: Channel,
    values: &[Option<f64>],
    window: usize,
) -> (Vec<Option<f64>>, SmoothingOutcome) {
    let defined: Vec<f64> = values.iter().flatten().copied().collect();
    let smoothed = smooth_channel(channel, &defined, window);

    let mut filled = smoothed.values.into_iter();
    let out = values
        .iter()
        .map(|v| v.and_then(|_| filled.next()))
        .collect();

    (out, smoothed.outcome)
}
