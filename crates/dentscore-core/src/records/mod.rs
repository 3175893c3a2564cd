//! Per-image annotation records

pub mod data;

pub use data::{ImageInputs, ImageRecord, RecordSet};
