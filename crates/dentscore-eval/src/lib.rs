//! Dentscore evaluation library
//!
//! Scores predicted landmark points against ground-truth lesion boxes and
//! ground-truth landmark points for a dental-imaging benchmark.

pub mod assignment;
pub mod containment;
pub mod evaluation;
pub mod utils;

// Re-export commonly used types
pub use assignment::{CostMatrix, HungarianSolver};
pub use containment::{CoarseMetrics, coarse_precision_and_recall};
pub use evaluation::{EvalConfig, EvaluationResult, Evaluator, Match, average_absolute_error};
pub use utils::{BatchReport, BatchSummary, ImageEvaluation, evaluate_batch};

pub use dentscore_core::{InputError, PixelBox, Point, YoloBox, geometry::yolo_to_pixel_box};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the evaluation system
pub mod traits {
    use super::*;

    /// Minimum-cost bipartite matching over a rectangular cost matrix
    pub trait AssignmentSolver {
        /// Returns `(row, col)` pairs sorted by row, one per row or column of
        /// the smaller side
        fn solve(&self, costs: &CostMatrix) -> Vec<(usize, usize)>;
    }
}
