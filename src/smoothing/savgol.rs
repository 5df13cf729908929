//! Local polynomial least-squares (Savitzky–Golay) smoothing.
//!
//! A polynomial of degree `order` is fitted to every run of `window`
//! consecutive samples. Interior samples take the fitted value at the window
//! centre. The first and last `window / 2` samples take the fitted value at
//! their own position inside the first or last full window, so the output has
//! exactly one value per input sample and no undefined border.
//!
//! The fit only depends on sample positions. Interior samples use one row of
//! convolution weights. Each border is handled by fitting the polynomial to
//! its full window once and evaluating it at the border positions, so the
//! filter holds O(window) numbers however long the window is.

use super::SmoothingError;

/// Polynomial degree used for every smoothed channel
pub const QUADRATIC: usize = 2;

/// Pivot magnitude below which the normal matrix is treated as singular
const PIVOT_EPSILON: f64 = 1e-12;

/// Precomputed Savitzky–Golay filter
#[derive(Debug, Clone, PartialEq)]
pub struct SavitzkyGolay {
    window: usize,
    order: usize,
    /// `(AᵀA)⁻¹` for the Vandermonde matrix `A` of the window
    inverse: Vec<Vec<f64>>,
    /// Contribution of each window sample to the fitted centre value
    centre: Vec<f64>,
}

impl SavitzkyGolay {
    /// Build a filter for an odd `window`.
    ///
    /// The order is capped at `window - 1`, where the fit becomes an exact
    /// interpolation (window 1 and, for a quadratic, window 3 are identities).
    pub fn new(window: usize, order: usize) -> Result<Self, SmoothingError> {
        if window == 0 || window % 2 == 0 {
            return Err(SmoothingError::InvalidWindow(window));
        }
        let order = order.min(window - 1);
        let terms = order + 1;

        let mut normal = vec![vec![0.0; terms]; terms];
        for j in 0..window {
            let row = powers(abscissa(j, window), terms);
            for a in 0..terms {
                for b in 0..terms {
                    normal[a][b] += row[a] * row[b];
                }
            }
        }
        let inverse = invert(normal).ok_or(SmoothingError::Singular { window, order })?;

        // The centre abscissa is 0, so only the constant term survives:
        // weight_j = row 0 of (AᵀA)⁻¹ dotted with row j of A
        let centre: Vec<f64> = (0..window)
            .map(|j| {
                powers(abscissa(j, window), terms)
                    .iter()
                    .zip(&inverse[0])
                    .map(|(x, c)| x * c)
                    .sum::<f64>()
            })
            .collect();

        Ok(Self {
            window,
            order,
            inverse,
            centre,
        })
    }

    /// Quadratic filter, the only degree the pipeline uses
    pub fn quadratic(window: usize) -> Result<Self, SmoothingError> {
        Self::new(window, QUADRATIC)
    }

    /// Window length in samples
    pub fn window(&self) -> usize {
        self.window
    }

    /// Effective polynomial degree
    pub fn order(&self) -> usize {
        self.order
    }

    /// Convolution weights applied to interior samples
    pub fn centre_weights(&self) -> &[f64] {
        &self.centre
    }

    /// Smooth `data`, one output value per input value.
    pub fn apply(&self, data: &[f64]) -> Result<Vec<f64>, SmoothingError> {
        let n = data.len();
        let w = self.window;
        if n < w {
            return Err(SmoothingError::WindowTooLong { window: w, len: n });
        }
        let half = w / 2;

        let mut smoothed = Vec::with_capacity(n);

        let leading = self.fit(&data[..w]);
        smoothed.extend((0..half).map(|p| self.evaluate(&leading, p)));

        smoothed.extend(data.windows(w).map(|segment| {
            self.centre
                .iter()
                .zip(segment)
                .map(|(c, x)| c * x)
                .sum::<f64>()
        }));

        let trailing = self.fit(&data[n - w..]);
        smoothed.extend((w - half..w).map(|p| self.evaluate(&trailing, p)));

        Ok(smoothed)
    }

    /// Least-squares polynomial coefficients for one full window
    fn fit(&self, segment: &[f64]) -> Vec<f64> {
        let terms = self.order + 1;
        let mut moments = vec![0.0; terms];
        for (j, y) in segment.iter().enumerate() {
            for (m, x) in moments.iter_mut().zip(powers(abscissa(j, self.window), terms)) {
                *m += x * y;
            }
        }
        self.inverse
            .iter()
            .map(|row| row.iter().zip(&moments).map(|(a, m)| a * m).sum())
            .collect()
    }

    /// Fitted polynomial at window position `position`
    fn evaluate(&self, coefficients: &[f64], position: usize) -> f64 {
        powers(abscissa(position, self.window), coefficients.len())
            .iter()
            .zip(coefficients)
            .map(|(x, c)| x * c)
            .sum()
    }
}

/// Window position mapped onto `[-1, 1]`, which keeps the normal matrix well
/// conditioned for long windows
fn abscissa(position: usize, window: usize) -> f64 {
    let half = window / 2;
    if half == 0 {
        0.0
    } else {
        (position as f64 - half as f64) / half as f64
    }
}

/// `[1, x, x², ...]` with `terms` entries
fn powers(x: f64, terms: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(terms);
    let mut value = 1.0;
    for _ in 0..terms {
        row.push(value);
        value *= x;
    }
    row
}

/// Gauss–Jordan inversion with partial pivoting.
fn invert(mut matrix: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let n = matrix.len();
    let mut inverse: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..n {
        let pivot = (col..n).max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))?;
        if matrix[pivot][col].abs() < PIVOT_EPSILON {
            return None;
        }
        matrix.swap(col, pivot);
        inverse.swap(col, pivot);

        let scale = matrix[col][col];
        for j in 0..n {
            matrix[col][j] /= scale;
            inverse[col][j] /= scale;
        }

        let pivot_row = matrix[col].clone();
        let pivot_inverse = inverse[col].clone();
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = matrix[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                matrix[row][j] -= factor * pivot_row[j];
                inverse[row][j] -= factor * pivot_inverse[j];
            }
        }
    }

    Some(inverse)
}
