//! Dataset-level summaries and JSON report export

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::batch::ImageEvaluation;
use crate::Result;
use crate::evaluation::EvalConfig;

/// Aggregate metrics over a sweep.
///
/// Means are per-image averages; images with no points or boxes contribute
/// their `0.0` values. `pooled_error` weights every match equally instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub images: usize,
    pub mean_precision: f64,
    pub mean_recall: f64,
    pub mean_avg_error: f64,
    pub total_matches: usize,
    pub pooled_error: f64,
}

impl BatchSummary {
    pub fn from_evaluations(evaluations: &[ImageEvaluation]) -> Self {
        if evaluations.is_empty() {
            return Self::default();
        }

        let images = evaluations.len();
        let mut precision_sum = 0.0;
        let mut recall_sum = 0.0;
        let mut error_sum = 0.0;
        let mut total_matches = 0;
        let mut cost_sum = 0.0;

        for evaluation in evaluations {
            let result = &evaluation.result;
            precision_sum += result.coarse_precision;
            recall_sum += result.recall;
            error_sum += result.avg_error;
            total_matches += result.matches.len();
            cost_sum += result.matches.iter().map(|m| m.cost).sum::<f64>();
        }

        let n = images as f64;
        Self {
            images,
            mean_precision: precision_sum / n,
            mean_recall: recall_sum / n,
            mean_avg_error: error_sum / n,
            total_matches,
            pooled_error: if total_matches == 0 {
                0.0
            } else {
                cost_sum / total_matches as f64
            },
        }
    }
}

/// Serialized output of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageEvaluation>,
}

impl BatchReport {
    /// Summarize `evaluations`, keeping them only when `config.per_image` is set
    pub fn new(evaluations: Vec<ImageEvaluation>, config: &EvalConfig) -> Self {
        let summary = BatchSummary::from_evaluations(&evaluations);
        Self {
            summary,
            images: if config.per_image { evaluations } else { Vec::new() },
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize evaluation report")
    }

    /// Write the report, creating parent directories as needed
    pub fn export_json(&self, output_path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(output_path, self.to_json(pretty)?)
            .with_context(|| format!("Failed to write JSON to: {:?}", output_path))?;

        info!("Report saved: {:?}", output_path);
        Ok(())
    }
}
