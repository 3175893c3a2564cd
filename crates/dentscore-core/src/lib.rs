//! Dentscore core data model
//!
//! Geometry primitives shared by the evaluator and the per-image annotation
//! records they are loaded from.

pub mod error;
pub mod geometry;
pub mod records;

pub use error::InputError;
pub use geometry::{PixelBox, Point, YoloBox};
pub use records::{ImageInputs, ImageRecord, RecordSet};
