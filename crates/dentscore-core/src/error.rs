//! Input validation errors
//!
//! Empty point or box sets are not errors; they produce `0.0` metrics.
//! Everything here is a caller contract violation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field}[{index}]: expected {expected} values, found {found}")]
    InvalidShape {
        field: &'static str,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{field}[{index}]: coordinate is not finite ({value})")]
    NonFinite {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error("distance between pred_points[{row}] and gt_points[{col}] is outside the assignable range")]
    CostOverflow { row: usize, col: usize },

    #[error("image dimensions must be finite and positive, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

pub type InputResult<T> = std::result::Result<T, InputError>;
