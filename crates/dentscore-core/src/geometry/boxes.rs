//! Ground-truth region boxes
//!
//! Annotations arrive in YOLO form (normalized center, width, height). The
//! evaluator works on the pixel-space projection of each box.

use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::error::{InputError, InputResult};

/// Normalized box `(x_center, y_center, width, height)` relative to the image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YoloBox {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl YoloBox {
    pub fn new(x_center: f64, y_center: f64, width: f64, height: f64) -> Self {
        Self {
            x_center,
            y_center,
            width,
            height,
        }
    }

    /// Build a box from a raw `[x_center, y_center, width, height]` entry
    pub fn from_slice(field: &'static str, index: usize, values: &[f64]) -> InputResult<Self> {
        match values {
            [x_center, y_center, width, height] => {
                let yolo = Self::new(*x_center, *y_center, *width, *height);
                yolo.validate(field, index)?;
                Ok(yolo)
            }
            _ => Err(InputError::InvalidShape {
                field,
                index,
                expected: 4,
                found: values.len(),
            }),
        }
    }

    /// Project into pixel space. Not clamped to the image.
    pub fn to_pixel_box(&self, img_width: f64, img_height: f64) -> PixelBox {
        yolo_to_pixel_box(self, img_width, img_height)
    }

    pub(crate) fn validate(&self, field: &'static str, index: usize) -> InputResult<()> {
        for value in [self.x_center, self.y_center, self.width, self.height] {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field, index, value });
            }
        }
        Ok(())
    }
}

/// Axis-aligned box `(x_min, y_min, x_max, y_max)` in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PixelBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Closed-rectangle containment; points on an edge count as inside
    pub fn contains(&self, point: &Point) -> bool {
        self.x_min <= point.x
            && point.x <= self.x_max
            && self.y_min <= point.y
            && point.y <= self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

/// Convert a normalized YOLO box to pixel coordinates.
///
/// Boxes that extend past the unit square are projected as-is, so the result
/// may be negative or exceed the image dimensions.
pub fn yolo_to_pixel_box(yolo: &YoloBox, img_width: f64, img_height: f64) -> PixelBox {
    let half_w = yolo.width / 2.0;
    let half_h = yolo.height / 2.0;
    PixelBox {
        x_min: (yolo.x_center - half_w) * img_width,
        y_min: (yolo.y_center - half_h) * img_height,
        x_max: (yolo.x_center + half_w) * img_width,
        y_max: (yolo.y_center + half_h) * img_height,
    }
}

/// Check every box of `boxes`, reporting the first offender
pub fn validate_boxes(field: &'static str, boxes: &[YoloBox]) -> InputResult<()> {
    boxes
        .iter()
        .enumerate()
        .try_for_each(|(index, yolo)| yolo.validate(field, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yolo_to_pixel_box() {
        let yolo = YoloBox::new(0.5, 0.5, 0.2, 0.4);
        let pixel = yolo_to_pixel_box(&yolo, 100.0, 200.0);
        assert_eq!(pixel, PixelBox::new(40.0, 60.0, 60.0, 140.0));
    }

    #[test]
    fn test_out_of_range_box_is_not_clamped() {
        let yolo = YoloBox::new(0.0, 1.0, 0.5, 0.5);
        let pixel = yolo.to_pixel_box(100.0, 100.0);
        assert_eq!(pixel.x_min, -25.0);
        assert_eq!(pixel.y_max, 125.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let pixel = PixelBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(pixel.contains(&Point::new(5.0, 5.0)));
        assert!(pixel.contains(&Point::new(10.0, 10.0)));
        assert!(pixel.contains(&Point::new(0.0, 10.0)));
        assert!(!pixel.contains(&Point::new(10.0001, 5.0)));
        assert!(!pixel.contains(&Point::new(5.0, -0.5)));
    }

    #[test]
    fn test_from_slice_rejects_short_box() {
        let err = YoloBox::from_slice("gt_boxes_yolo", 1, &[0.5, 0.5, 0.1]).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidShape { expected: 4, found: 3, .. }
        ));
    }
}
