//! Optimal point-to-point assignment

pub mod cost;
pub mod hungarian;

pub use cost::{CostMatrix, MAX_COST};
pub use hungarian::HungarianSolver;
