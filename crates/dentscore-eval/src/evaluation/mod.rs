//! Per-image detection evaluation

pub mod config;
pub mod evaluator;

pub use config::EvalConfig;
pub use evaluator::{EvaluationResult, Evaluator, Match, average_absolute_error};
