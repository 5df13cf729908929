//! # Interpolation/Alignment Engine
//!
//! Re-indexes the electrical channels onto the optical timestamps.
//!
//! For every optical frame at `t` the engine finds the last electrical sample
//! at or before `t` (`p`) and the first at or after `t` (`f`), then linearly
//! interpolates each electrical channel in time:
//!
//! ```text
//! frac  = (t - t_p) / (t_f - t_p)
//! value = v_p + (v_f - v_p) * frac        (v_p when t_p == t_f)
//! ```
//!
//! A frame is only aligned when at least two electrical samples lie at or
//! before it *and* at least two at or after it. Frames outside that range are
//! dropped and reported as [`SkipReason::CoverageGap`]; nothing is ever
//! extrapolated.
//!
//! The cycle index is a label: it is copied from `p`, never interpolated.

mod combined;
mod cursor;
mod elapsed;


use std::fmt;

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::series::timestamp::{format_timestamp, seconds_between};
use crate::series::{PreparedElectrical, PreparedOptical};

pub use combined::{cycle_label, CombinedRow, CombinedSeries};
pub use cursor::{Bracket, BracketCursor, Coverage, MIN_SAMPLES_PER_SIDE};
pub use elapsed::ElapsedTime;

/// One aligned output row, before derivative columns are added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord {
    /// Optical frame instant
    pub timestamp: NaiveDateTime,
    /// Hours since the first optical frame
    pub test_time_h: f64,
    /// Brightness of the frame
    pub brightness: f64,
    /// Smoothed brightness of the frame
    pub brightness_smooth: f64,
    /// Interpolated voltage (V)
    pub voltage: f64,
    /// Interpolated smoothed voltage (V)
    pub voltage_smooth: f64,
    /// Interpolated current (mA)
    pub current_ma: f64,
    /// Interpolated smoothed current (mA)
    pub current_ma_smooth: f64,
    /// Cycle index of the lower bracket sample
    pub cycle_index: i64,
}

/// Why an optical frame produced no record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Not enough electrical samples on one side of the frame
    CoverageGap {
        /// Frame instant
        timestamp: NaiveDateTime,
        /// Electrical samples at or before the frame
        before: usize,
        /// Electrical samples at or after the frame
        after: usize,
    },
    /// Interpolation produced no usable fraction
    Computation {
        /// Frame instant
        timestamp: NaiveDateTime,
        /// What went wrong
        detail: String,
    },
}

impl SkipReason {
    /// Instant of the skipped frame
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            SkipReason::CoverageGap { timestamp, .. } | SkipReason::Computation { timestamp, .. } => {
                *timestamp
            }
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::CoverageGap {
                timestamp,
                before,
                after,
            } => write!(
                f,
                "No valid interpolation points found for brightness timestamp {} ({} before, {} after)",
                format_timestamp(timestamp),
                before,
                after
            ),
            SkipReason::Computation { timestamp, detail } => write!(
                f,
                "Interpolation failed for brightness timestamp {}: {}",
                format_timestamp(timestamp),
                detail
            ),
        }
    }
}

/// Result of aligning the optical frames onto the electrical series
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Aligned rows, in optical time order
    pub records: Vec<CombinedRecord>,
    /// Frames that were dropped, in optical time order
    pub skipped: Vec<SkipReason>,
}

impl Alignment {
    /// Frames dropped for lack of electrical coverage
    pub fn coverage_gaps(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, SkipReason::CoverageGap { .. }))
            .count()
    }

    /// Frames dropped because interpolation failed
    pub fn computation_errors(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, SkipReason::Computation { .. }))
            .count()
    }

    /// Wrap the aligned rows for the derivative stage
    pub fn into_series(self) -> CombinedSeries {
        CombinedSeries::new(self.records)
    }
}

/// Align every optical frame onto the electrical series.
///
/// Both inputs are sorted (normalization guarantees it), so a single forward
/// pass with two cursors finds every bracket.
pub fn align(electrical: &PreparedElectrical, optical: &PreparedOptical) -> Alignment {
    let frames = optical.normalized();
    let mut records = Vec::with_capacity(frames.len());
    let mut skipped = Vec::new();

    let Some(clock) = ElapsedTime::from_earliest(frames.timestamps()) else {
        info!("No optical samples to align");
        return Alignment { records, skipped };
    };

    let mut cursor = BracketCursor::new(electrical.normalized().timestamps());

    for (i, &t) in frames.timestamps().iter().enumerate() {
        let result = cursor
            .seek(t)
            .map_err(|coverage| SkipReason::CoverageGap {
                timestamp: t,
                before: coverage.before,
                after: coverage.after,
            })
            .and_then(|bracket| {
                interpolate(
                    electrical,
                    bracket,
                    t,
                    clock.hours(t),
                    frames.brightness()[i],
                    optical.brightness_smooth()[i],
                )
            });

        match result {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!("{}. Skipping this point.", reason);
                skipped.push(reason);
            }
        }
    }

    info!(
        "Aligned {} of {} optical samples ({} skipped)",
        records.len(),
        frames.len(),
        skipped.len()
    );

    Alignment { records, skipped }
}

/// Build the record for one optical frame from its bracket.
pub fn interpolate(
    electrical: &PreparedElectrical,
    bracket: Bracket,
    t: NaiveDateTime,
    test_time_h: f64,
    brightness: f64,
    brightness_smooth: f64,
) -> Result<CombinedRecord, SkipReason> {
    let base = electrical.normalized();
    let (p, f) = (bracket.lower, bracket.upper);
    let (t1, t2) = (base.timestamps()[p], base.timestamps()[f]);

    let frac = if t1 == t2 {
        0.0
    } else {
        let frac = seconds_between(t1, t) / seconds_between(t1, t2);
        if !frac.is_finite() {
            return Err(SkipReason::Computation {
                timestamp: t,
                detail: format!("non-finite time fraction {}", frac),
            });
        }
        frac
    };
    debug!("Bracket {}..{} for {} (frac {:.6})", p, f, format_timestamp(&t), frac);

    let lerp = |values: &[f64]| {
        if t1 == t2 {
            values[p]
        } else {
            values[p] + (values[f] - values[p]) * frac
        }
    };

    Ok(CombinedRecord {
        timestamp: t,
        test_time_h,
        brightness,
        brightness_smooth,
        voltage: lerp(base.voltage()),
        voltage_smooth: lerp(electrical.voltage_smooth()),
        current_ma: lerp(base.current_ma()),
        current_ma_smooth: lerp(electrical.current_ma_smooth()),
        cycle_index: base.cycle_index()[p],
    })
}
