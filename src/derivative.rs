//! # Derivative Engine
//!
//! First difference of smoothed brightness over elapsed test time:
//!
//! ```text
//! d[0] = undefined
//! d[i] = (b_smooth[i] - b_smooth[i-1]) / (t_h[i] - t_h[i-1])
//! ```
//!
//! Row 0 has no predecessor and stays undefined (`None`), never zero. Two rows
//! with the same elapsed time give an IEEE infinity or NaN rather than an
//! error.

use log::{debug, info};

use crate::align::{CombinedRecord, CombinedSeries};
use crate::smoothing::{smooth_gapped, Channel, SmoothingOutcome};

/// Brightness derivative per row, in brightness units per hour
pub fn brightness_derivative(records: &[CombinedRecord]) -> Vec<Option<f64>> {
    let mut derivative = Vec::with_capacity(records.len());
    if records.is_empty() {
        return derivative;
    }

    derivative.push(None);
    derivative.extend(records.windows(2).map(|w| {
        let db = w[1].brightness_smooth - w[0].brightness_smooth;
        let dt = w[1].test_time_h - w[0].test_time_h;
        Some(db / dt)
    }));

    let non_finite = derivative
        .iter()
        .flatten()
        .filter(|d| !d.is_finite())
        .count();
    if non_finite > 0 {
        debug!("{} derivative values are non-finite (repeated instants)", non_finite);
    }

    derivative
}

/// Compute the derivative, smooth it with `window`, and attach both columns.
pub fn attach(series: CombinedSeries, window: usize) -> (CombinedSeries, SmoothingOutcome) {
    let derivative = brightness_derivative(series.records());
    let (smoothed, outcome) = smooth_gapped(Channel::BrightnessDerivative, &derivative, window);
    info!(
        "Computed brightness derivative for {} rows (smoothing {})",
        derivative.len(),
        outcome
    );

    (series.with_derivative(derivative, smoothed), outcome)
}
