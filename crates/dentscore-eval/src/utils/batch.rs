//! Dataset sweeps over many independent images

use anyhow::Context;
use dentscore_core::{ImageRecord, RecordSet};
use log::info;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::Result;
use crate::evaluation::{EvalConfig, EvaluationResult, Evaluator};

/// Result for one record, tagged with the record's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEvaluation {
    pub image: String,
    pub result: EvaluationResult,
}

fn evaluate_record(index: usize, record: &ImageRecord) -> Result<ImageEvaluation> {
    let image = record.display_name(index);
    let evaluator = Evaluator::from_record(record)
        .with_context(|| format!("Invalid record {} ({})", index, image))?;

    Ok(ImageEvaluation {
        image,
        result: evaluator.evaluate(),
    })
}

/// Evaluate every record; output order matches input order.
///
/// The first invalid record aborts the sweep.
pub fn evaluate_batch(records: &RecordSet, config: &EvalConfig) -> Result<Vec<ImageEvaluation>> {
    let start_time = std::time::Instant::now();

    let evaluations = if config.parallel {
        evaluate_parallel(records)?
    } else {
        evaluate_sequential(records)?
    };

    info!(
        "Evaluated {} images in {}ms",
        evaluations.len(),
        start_time.elapsed().as_millis()
    );
    Ok(evaluations)
}

fn evaluate_sequential(records: &RecordSet) -> Result<Vec<ImageEvaluation>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| evaluate_record(i, record))
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(records: &RecordSet) -> Result<Vec<ImageEvaluation>> {
    records
        .records
        .par_iter()
        .enumerate()
        .map(|(i, record)| evaluate_record(i, record))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(records: &RecordSet) -> Result<Vec<ImageEvaluation>> {
    log::warn!("Parallel evaluation requested but the `parallel` feature is disabled; running sequentially");
    evaluate_sequential(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::from_json_str(
            r#"[
                {"image": "a.png", "img_width": 10, "img_height": 10,
                 "pred_points": [[5, 5]], "gt_boxes_yolo": [[0.5, 0.5, 1.0, 1.0]], "gt_points": [[5, 6]]},
                {"image": "b.png", "img_width": 10, "img_height": 10},
                {"img_width": 100, "img_height": 100,
                 "pred_points": [[0, 0], [10, 10]], "gt_points": [[0, 1], [9, 9]]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_batch_keeps_order() -> Result<()> {
        let evaluations = evaluate_batch(&sample(), &EvalConfig::default())?;
        let names: Vec<_> = evaluations.iter().map(|e| e.image.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png", "#2"]);

        assert_eq!(evaluations[0].result.coarse_precision, 1.0);
        assert_eq!(evaluations[0].result.avg_error, 1.0);
        assert_eq!(evaluations[1].result.recall, 0.0);
        assert_eq!(evaluations[2].result.matches.len(), 2);
        Ok(())
    }

    #[test]
    fn test_parallel_matches_sequential() -> Result<()> {
        let records = sample();
        let sequential = evaluate_batch(&records, &EvalConfig::default())?;
        let parallel = evaluate_batch(&records, &EvalConfig::for_large_sweep())?;
        assert_eq!(sequential, parallel);
        Ok(())
    }

    #[test]
    fn test_invalid_record_names_position() {
        let mut records = sample();
        records.records[1].pred_points.push(vec![1.0, 2.0, 3.0]);

        let err = evaluate_batch(&records, &EvalConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid record 1 (b.png)"));
    }
}
