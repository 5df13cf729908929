use std::collections::BTreeSet;

use super::CombinedRecord;

/// The aligned table plus any derivative columns added after alignment.
///
/// Rows are fixed once alignment is done; later stages only attach columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedSeries {
    records: Vec<CombinedRecord>,
    derivative: Option<Vec<Option<f64>>>,
    derivative_smooth: Option<Vec<Option<f64>>>,
}

/// Borrowed view of one output row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedRow<'a> {
    /// Aligned values
    pub record: &'a CombinedRecord,
    /// Brightness derivative, `None` where undefined
    pub derivative: Option<f64>,
    /// Smoothed brightness derivative, `None` where undefined
    pub derivative_smooth: Option<f64>,
}

impl CombinedSeries {
    /// Series without derivative columns
    pub fn new(records: Vec<CombinedRecord>) -> Self {
        Self {
            records,
            derivative: None,
            derivative_smooth: None,
        }
    }

    /// Rebuild a series from stored columns, e.g. a previously written table
    pub(crate) fn from_columns(
        records: Vec<CombinedRecord>,
        derivative: Vec<Option<f64>>,
        derivative_smooth: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(records.len(), derivative.len());
        debug_assert_eq!(records.len(), derivative_smooth.len());
        Self {
            records,
            derivative: Some(derivative),
            derivative_smooth: Some(derivative_smooth),
        }
    }

    /// Attach the derivative columns; both must have one entry per row.
    pub(crate) fn with_derivative(
        mut self,
        derivative: Vec<Option<f64>>,
        derivative_smooth: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(self.records.len(), derivative.len());
        debug_assert_eq!(self.records.len(), derivative_smooth.len());
        self.derivative = Some(derivative);
        self.derivative_smooth = Some(derivative_smooth);
        self
    }

    /// Aligned rows
    pub fn records(&self) -> &[CombinedRecord] {
        &self.records
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the derivative columns have been attached
    pub fn has_derivative(&self) -> bool {
        self.derivative.is_some()
    }

    /// Brightness derivative column, if attached
    pub fn derivative(&self) -> Option<&[Option<f64>]> {
        self.derivative.as_deref()
    }

    /// Smoothed brightness derivative column, if attached
    pub fn derivative_smooth(&self) -> Option<&[Option<f64>]> {
        self.derivative_smooth.as_deref()
    }

    /// Rows with their derivative values
    pub fn rows(&self) -> impl Iterator<Item = CombinedRow<'_>> + '_ {
        self.records.iter().enumerate().map(move |(i, record)| CombinedRow {
            record,
            derivative: self.derivative.as_ref().and_then(|d| d[i]),
            derivative_smooth: self.derivative_smooth.as_ref().and_then(|d| d[i]),
        })
    }

    /// Distinct cycle indices, ascending
    pub fn cycles(&self) -> Vec<i64> {
        self.records
            .iter()
            .map(|r| r.cycle_index)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Keep only rows from the given cycles.
    ///
    /// Derivative values are carried over as computed on the full series, not
    /// recomputed across the removed rows.
    pub fn select_cycles(&self, cycles: &[i64]) -> Self {
        let keep: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| cycles.contains(&r.cycle_index))
            .map(|(i, _)| i)
            .collect();

        let pick = |column: &Option<Vec<Option<f64>>>| -> Option<Vec<Option<f64>>> {
            column
                .as_ref()
                .map(|values| keep.iter().map(|&i| values[i]).collect())
        };

        Self {
            records: keep.iter().map(|&i| self.records[i].clone()).collect(),
            derivative: pick(&self.derivative),
            derivative_smooth: pick(&self.derivative_smooth),
        }
    }

    /// Elapsed hours of the last row
    pub fn duration_h(&self) -> Option<f64> {
        self.records.last().map(|r| r.test_time_h)
    }
}

/// Display label of a cycle index; cycle 0 is the initial rest
pub fn cycle_label(cycle: i64) -> String {
    if cycle == crate::series::REST_CYCLE {
        "Rest".to_string()
    } else {
        cycle.to_string()
    }
}
