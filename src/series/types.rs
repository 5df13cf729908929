use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Anything that sits at one instant of a series
pub trait Timestamped {
    /// Instant of the sample
    fn timestamp(&self) -> NaiveDateTime;
}

/// One row of the electrical table, in the instrument's units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricalSample {
    /// Sample instant
    pub timestamp: NaiveDateTime,
    /// Cell voltage (V)
    pub voltage: f64,
    /// Cell current (A)
    pub current_a: f64,
    /// Cycler cycle counter
    pub cycle_index: i64,
}

impl ElectricalSample {
    /// Create a new electrical sample
    pub fn new(timestamp: NaiveDateTime, voltage: f64, current_a: f64, cycle_index: i64) -> Self {
        Self {
            timestamp,
            voltage,
            current_a,
            cycle_index,
        }
    }
}

impl Timestamped for ElectricalSample {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// One row of the optical table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalSample {
    /// Frame instant
    pub timestamp: NaiveDateTime,
    /// Mean greyscale value of the frame
    pub luminance: f64,
}

impl OpticalSample {
    /// Create a new optical sample
    pub fn new(timestamp: NaiveDateTime, luminance: f64) -> Self {
        Self {
            timestamp,
            luminance,
        }
    }
}

impl Timestamped for OpticalSample {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Samples sharing one clock, in the order they were read
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series<S> {
    samples: Vec<S>,
}

/// Raw electrical input
pub type ElectricalSeries = Series<ElectricalSample>;

/// Raw optical input
pub type OpticalSeries = Series<OpticalSample>;

impl<S: Timestamped> Series<S> {
    /// Wrap a sample vector
    pub fn new(samples: Vec<S>) -> Self {
        Self { samples }
    }

    /// Samples in storage order
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether timestamps are non-decreasing
    pub fn is_time_ordered(&self) -> bool {
        self.samples
            .windows(2)
            .all(|w| w[0].timestamp() <= w[1].timestamp())
    }

    /// Stable sort by timestamp; ties keep their read order.
    pub(crate) fn into_time_ordered(mut self) -> Vec<S> {
        self.samples.sort_by_key(|s| s.timestamp());
        self.samples
    }
}

impl<S> FromIterator<S> for Series<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
