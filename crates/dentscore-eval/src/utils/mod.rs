//! Utility modules

pub mod batch;
pub mod report;

pub use batch::{ImageEvaluation, evaluate_batch};
pub use report::{BatchReport, BatchSummary};
