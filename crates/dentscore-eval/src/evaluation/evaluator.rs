//! Detection evaluator for a single image

use dentscore_core::{
    ImageInputs, ImageRecord, InputError, PixelBox, Point, YoloBox,
    geometry::validate_boxes,
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::assignment::{CostMatrix, HungarianSolver};
use crate::containment::{CoarseMetrics, coarse_precision_and_recall};
use crate::traits::AssignmentSolver;

/// One predicted point paired with one ground-truth point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub pred_index: usize,
    pub gt_index: usize,
    pub pred: Point,
    pub gt: Point,
    /// Euclidean distance between `pred` and `gt`
    pub cost: f64,
}

/// Both quality signals for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub coarse_precision: f64,
    pub recall: f64,
    pub avg_error: f64,
    pub matches: Vec<Match>,
}

/// Optimal one-to-one pairing of predicted and ground-truth points.
///
/// Returns the mean matched distance (`0.0` when either side is empty) and
/// the `min(P, G)` matches in ascending predicted-index order. Fails on
/// non-finite coordinates or distances too large to assign.
pub fn average_absolute_error(
    pred_points: &[Point],
    gt_points: &[Point],
) -> Result<(f64, Vec<Match>), InputError> {
    let costs = CostMatrix::euclidean(pred_points, gt_points)?;
    Ok(match_points(&costs, pred_points, gt_points))
}

fn match_points(costs: &CostMatrix, pred_points: &[Point], gt_points: &[Point]) -> (f64, Vec<Match>) {
    let pairs = HungarianSolver.solve(costs);

    let matches: Vec<Match> = pairs
        .into_iter()
        .map(|(i, j)| Match {
            pred_index: i,
            gt_index: j,
            pred: pred_points[i],
            gt: gt_points[j],
            cost: costs.get(i, j),
        })
        .collect();

    let avg_error = if matches.is_empty() {
        0.0
    } else {
        matches.iter().map(|m| m.cost).sum::<f64>() / matches.len() as f64
    };

    (avg_error, matches)
}

/// Fixed inputs for one image plus the pixel boxes and point costs derived
/// from them.
///
/// Nothing here is mutated after construction, so [`Evaluator::evaluate`]
/// can be called any number of times with identical results.
#[derive(Debug, Clone)]
pub struct Evaluator {
    pred_points: Vec<Point>,
    gt_boxes_yolo: Vec<YoloBox>,
    gt_points: Vec<Point>,
    img_width: f64,
    img_height: f64,
    pixel_boxes: Vec<PixelBox>,
    costs: CostMatrix,
}

impl Evaluator {
    /// Validate inputs, project the ground-truth boxes into pixel space and
    /// build the point-to-point cost matrix
    pub fn new(
        pred_points: Vec<Point>,
        gt_boxes_yolo: Vec<YoloBox>,
        gt_points: Vec<Point>,
        img_width: f64,
        img_height: f64,
    ) -> Result<Self, InputError> {
        if !(img_width.is_finite() && img_width > 0.0)
            || !(img_height.is_finite() && img_height > 0.0)
        {
            return Err(InputError::InvalidDimensions {
                width: img_width,
                height: img_height,
            });
        }
        validate_boxes("gt_boxes_yolo", &gt_boxes_yolo)?;
        let costs = CostMatrix::euclidean(&pred_points, &gt_points)?;

        let pixel_boxes = gt_boxes_yolo
            .iter()
            .map(|yolo| yolo.to_pixel_box(img_width, img_height))
            .collect();

        Ok(Self {
            pred_points,
            gt_boxes_yolo,
            gt_points,
            img_width,
            img_height,
            pixel_boxes,
            costs,
        })
    }

    pub fn from_inputs(inputs: ImageInputs) -> Result<Self, InputError> {
        Self::new(
            inputs.pred_points,
            inputs.gt_boxes_yolo,
            inputs.gt_points,
            inputs.img_width,
            inputs.img_height,
        )
    }

    /// Shape-check a raw record and build its evaluator
    pub fn from_record(record: &ImageRecord) -> Result<Self, InputError> {
        Self::from_inputs(record.to_inputs()?)
    }

    pub fn pred_points(&self) -> &[Point] {
        &self.pred_points
    }

    pub fn gt_boxes_yolo(&self) -> &[YoloBox] {
        &self.gt_boxes_yolo
    }

    pub fn gt_points(&self) -> &[Point] {
        &self.gt_points
    }

    pub fn pixel_boxes(&self) -> &[PixelBox] {
        &self.pixel_boxes
    }

    pub fn image_size(&self) -> (f64, f64) {
        (self.img_width, self.img_height)
    }

    pub fn coarse_precision_and_recall(&self) -> CoarseMetrics {
        coarse_precision_and_recall(&self.pred_points, &self.pixel_boxes)
    }

    pub fn average_absolute_error(&self) -> (f64, Vec<Match>) {
        match_points(&self.costs, &self.pred_points, &self.gt_points)
    }

    pub fn evaluate(&self) -> EvaluationResult {
        let coarse = self.coarse_precision_and_recall();
        let (avg_error, matches) = self.average_absolute_error();

        debug!(
            "Evaluated {} predictions against {} boxes / {} points: precision={:.3} recall={:.3} error={:.3}",
            self.pred_points.len(),
            self.pixel_boxes.len(),
            self.gt_points.len(),
            coarse.precision,
            coarse.recall,
            avg_error
        );

        EvaluationResult {
            coarse_precision: coarse.precision,
            recall: coarse.recall,
            avg_error,
            matches,
        }
    }
}
