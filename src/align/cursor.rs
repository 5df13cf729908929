use chrono::NaiveDateTime;

/// Samples required on each side of an instant before it may be interpolated
pub const MIN_SAMPLES_PER_SIDE: usize = 2;

/// Indices of the electrical samples around one optical instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    /// Last sample at or before the instant
    pub lower: usize,
    /// First sample at or after the instant
    pub upper: usize,
}

/// How many samples lie on each side of an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// Samples at or before the instant
    pub before: usize,
    /// Samples at or after the instant
    pub after: usize,
}

impl Coverage {
    /// Both sides have enough samples
    pub fn is_sufficient(&self) -> bool {
        self.before >= MIN_SAMPLES_PER_SIDE && self.after >= MIN_SAMPLES_PER_SIDE
    }
}

/// Two monotonic cursors over sorted timestamps.
///
/// For a query instant `t`, `below` counts samples `< t` and `through`
/// counts samples `<= t`. Queries must come in non-decreasing order, so both
/// cursors only move forward and a full pass costs O(n + m).
#[derive(Debug)]
pub struct BracketCursor<'a> {
    timestamps: &'a [NaiveDateTime],
    below: usize,
    through: usize,
}

impl<'a> BracketCursor<'a> {
    /// Cursor at the start of `timestamps`, which must be sorted
    pub fn new(timestamps: &'a [NaiveDateTime]) -> Self {
        Self {
            timestamps,
            below: 0,
            through: 0,
        }
    }

    /// Advance to `t` and return its bracket, or the coverage that fell short.
    pub fn seek(&mut self, t: NaiveDateTime) -> Result<Bracket, Coverage> {
        let ts = self.timestamps;
        while self.below < ts.len() && ts[self.below] < t {
            self.below += 1;
        }
        if self.through < self.below {
            self.through = self.below;
        }
        while self.through < ts.len() && ts[self.through] <= t {
            self.through += 1;
        }

        let coverage = Coverage {
            before: self.through,
            after: ts.len() - self.below,
        };
        if !coverage.is_sufficient() {
            return Err(coverage);
        }

        Ok(Bracket {
            lower: self.through - 1,
            upper: self.below,
        })
    }
}
