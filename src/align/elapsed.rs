use chrono::NaiveDateTime;

use crate::series::timestamp::hours_between;

/// Converts absolute instants into hours since a fixed origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    origin: NaiveDateTime,
}

impl ElapsedTime {
    /// Clock starting at `origin`
    pub fn new(origin: NaiveDateTime) -> Self {
        Self { origin }
    }

    /// Clock starting at the earliest of `timestamps`, or `None` if empty
    pub fn from_earliest(timestamps: &[NaiveDateTime]) -> Option<Self> {
        timestamps.iter().min().copied().map(Self::new)
    }

    /// Instant treated as hour zero
    pub fn origin(&self) -> NaiveDateTime {
        self.origin
    }

    /// Hours from the origin to `timestamp`
    pub fn hours(&self, timestamp: NaiveDateTime) -> f64 {
        hours_between(self.origin, timestamp)
    }
}
