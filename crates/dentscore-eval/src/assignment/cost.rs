//! Dense pairwise cost matrices

use dentscore_core::{InputError, Point, geometry::validate_points};

/// Largest cost magnitude accepted; keeps the solver's dual potentials finite
pub const MAX_COST: f64 = f64::MAX / 8.0;

fn is_assignable(cost: f64) -> bool {
    cost.is_finite() && cost.abs() <= MAX_COST
}

/// Row-major `rows x cols` matrix of assignment costs.
///
/// Every entry is finite and within [`MAX_COST`].
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Build from a row-major buffer; `None` if the length does not match
    /// or any entry is not finite or exceeds [`MAX_COST`]
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == rows * cols && data.iter().all(|&c| is_assignable(c)))
            .then_some(Self { rows, cols, data })
    }

    /// Euclidean distances, `cost[i][j] = |rows[i] - cols[j]|`
    pub fn euclidean(rows: &[Point], cols: &[Point]) -> Result<Self, InputError> {
        validate_points("pred_points", rows)?;
        validate_points("gt_points", cols)?;

        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for (row, a) in rows.iter().enumerate() {
            for (col, b) in cols.iter().enumerate() {
                let cost = a.distance(b);
                if !is_assignable(cost) {
                    return Err(InputError::CostOverflow { row, col });
                }
                data.push(cost);
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols: cols.len(),
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Sum of the costs of the given `(row, col)` pairs
    pub fn total(&self, pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().map(|&(r, c)| self.get(r, c)).sum()
    }
}
