use serde::{Deserialize, Serialize};

use crate::error::{InputError, InputResult};

/// A 2D location in image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from a raw `[x, y]` entry of `field` at position `index`
    pub fn from_slice(field: &'static str, index: usize, values: &[f64]) -> InputResult<Self> {
        match values {
            [x, y] => {
                let point = Self::new(*x, *y);
                point.validate(field, index)?;
                Ok(point)
            }
            _ => Err(InputError::InvalidShape {
                field,
                index,
                expected: 2,
                found: values.len(),
            }),
        }
    }

    /// Euclidean (L2) distance to another point.
    ///
    /// Only overflows when the true distance exceeds `f64::MAX`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn validate(&self, field: &'static str, index: usize) -> InputResult<()> {
        for value in [self.x, self.y] {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field, index, value });
            }
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Check every point of `points`, reporting the first offender
pub fn validate_points(field: &'static str, points: &[Point]) -> InputResult<()> {
    points
        .iter()
        .enumerate()
        .try_for_each(|(index, point)| point.validate(field, index))
}
