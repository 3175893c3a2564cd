use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::geometry::{Point, YoloBox};

/// One image's predictions and ground truth as found on disk.
///
/// Coordinates stay as raw number lists until [`ImageRecord::to_inputs`]
/// checks their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub image: Option<String>,
    pub img_width: f64,
    pub img_height: f64,
    #[serde(default)]
    pub pred_points: Vec<Vec<f64>>,
    #[serde(default)]
    pub gt_boxes_yolo: Vec<Vec<f64>>,
    #[serde(default)]
    pub gt_points: Vec<Vec<f64>>,
}

/// Shape-checked evaluator inputs for a single image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInputs {
    pub pred_points: Vec<Point>,
    pub gt_boxes_yolo: Vec<YoloBox>,
    pub gt_points: Vec<Point>,
    pub img_width: f64,
    pub img_height: f64,
}

impl ImageRecord {
    /// Name used in logs and reports; falls back to the record position
    pub fn display_name(&self, index: usize) -> String {
        match &self.image {
            Some(name) => name.clone(),
            None => format!("#{}", index),
        }
    }

    pub fn to_inputs(&self) -> InputResult<ImageInputs> {
        if !(self.img_width.is_finite() && self.img_width > 0.0)
            || !(self.img_height.is_finite() && self.img_height > 0.0)
        {
            return Err(InputError::InvalidDimensions {
                width: self.img_width,
                height: self.img_height,
            });
        }

        Ok(ImageInputs {
            pred_points: parse_points("pred_points", &self.pred_points)?,
            gt_boxes_yolo: self
                .gt_boxes_yolo
                .iter()
                .enumerate()
                .map(|(i, values)| YoloBox::from_slice("gt_boxes_yolo", i, values))
                .collect::<InputResult<_>>()?,
            gt_points: parse_points("gt_points", &self.gt_points)?,
            img_width: self.img_width,
            img_height: self.img_height,
        })
    }
}

fn parse_points(field: &'static str, raw: &[Vec<f64>]) -> InputResult<Vec<Point>> {
    raw.iter()
        .enumerate()
        .map(|(i, values)| Point::from_slice(field, i, values))
        .collect()
}

/// A dataset sweep: every image record from one file
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub records: Vec<ImageRecord>,
}

impl RecordSet {
    /// Load records from a `.json` array file or a `.jsonl` file with one
    /// record per line
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_lines = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

        let set = if is_lines {
            Self::load_lines(path)?
        } else {
            let file =
                File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
            let records: Vec<ImageRecord> = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse records from {:?}", path))?;
            Self { records }
        };

        info!("Loaded {} image records from {:?}", set.len(), path);
        Ok(set)
    }

    fn load_lines(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("Failed to read line {} from {:?}", line_num + 1, path))?;

            if line.trim().is_empty() {
                continue;
            }

            let record: ImageRecord = serde_json::from_str(&line).with_context(|| {
                format!("Invalid record at line {} of {:?}", line_num + 1, path)
            })?;
            records.push(record);
        }

        if records.is_empty() {
            warn!("No records found in {:?}", path);
        }

        Ok(Self { records })
    }

    /// Parse a JSON array of records held in memory
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records = serde_json::from_str(json).context("Failed to parse records")?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageRecord> {
        self.records.iter()
    }
}

impl IntoIterator for RecordSet {
    type Item = ImageRecord;
    type IntoIter = std::vec::IntoIter<ImageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
