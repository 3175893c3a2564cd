//! Evaluation run configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;

/// Settings for a dataset sweep and its report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Evaluate images on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    pub output_path: PathBuf,
    pub pretty_json: bool,
    /// Include every image's result in the report, not only the summary
    pub per_image: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            output_path: "outputs/eval_report.json".into(),
            pretty_json: true,
            per_image: true,
        }
    }
}

impl EvalConfig {
    /// Summary-only compact report, evaluated in parallel when available
    pub fn for_large_sweep() -> Self {
        Self {
            parallel: true,
            pretty_json: false,
            per_image: false,
            ..Self::default()
        }
    }

    /// Read a JSON config file; missing keys take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid config in {:?}", path))
    }
}
