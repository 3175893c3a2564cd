//! Points and boxes in normalized and pixel space

pub mod boxes;
pub mod point;

pub use boxes::{PixelBox, YoloBox, validate_boxes, yolo_to_pixel_box};
pub use point::{Point, validate_points};
