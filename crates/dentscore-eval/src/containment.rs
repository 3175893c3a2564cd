//! Coarse point-in-box matching
//!
//! Scores predicted points against ground-truth regions by containment only.
//! Matching is greedy and first-found: the outcome depends on input order.

use dentscore_core::{PixelBox, Point};
use serde::{Deserialize, Serialize};

/// Containment precision and recall with the counts behind them
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoarseMetrics {
    pub precision: f64,
    pub recall: f64,
    pub matched_points: usize,
    pub matched_boxes: usize,
}

/// Greedy one-to-one containment matching.
///
/// Each point, in order, claims the first unclaimed box that contains it
/// (edges inclusive). Precision is `0.0` without points and recall is `0.0`
/// without boxes.
pub fn coarse_precision_and_recall(pred_points: &[Point], boxes: &[PixelBox]) -> CoarseMetrics {
    let mut claimed = vec![false; boxes.len()];
    let mut matched_points = 0;

    for point in pred_points {
        let hit = boxes
            .iter()
            .enumerate()
            .find(|(j, pixel)| !claimed[*j] && pixel.contains(point))
            .map(|(j, _)| j);

        if let Some(j) = hit {
            claimed[j] = true;
            matched_points += 1;
        }
    }

    let matched_boxes = claimed.iter().filter(|&&c| c).count();

    CoarseMetrics {
        precision: ratio(matched_points, pred_points.len()),
        recall: ratio(matched_boxes, boxes.len()),
        matched_points,
        matched_boxes,
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
