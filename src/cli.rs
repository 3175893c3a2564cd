//! Dataset sweep driver built on dentscore-eval

use clap::Parser;
use dentscore_core::RecordSet;
use anyhow::Result;
use dentscore_eval::{BatchReport, BatchSummary, EvalConfig, evaluate_batch};
use log::info;
use std::path::PathBuf;

/// Score predicted dental landmarks against ground-truth boxes and points.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Records file: a JSON array, or JSON Lines when the extension is .jsonl
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// JSON evaluation config; CLI flags override its values
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Where to write the JSON report
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Evaluate images in parallel (requires the `parallel` feature)
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Leave per-image results out of the report
    #[arg(long = "summary-only")]
    pub summary_only: bool,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long = "compact")]
    pub compact: bool,
}

impl Args {
    pub fn resolve_config(&self) -> Result<EvalConfig> {
        let mut config = match &self.config {
            Some(path) => EvalConfig::load(path)?,
            None => EvalConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        config.parallel |= self.parallel;
        if self.summary_only {
            config.per_image = false;
        }
        if self.compact {
            config.pretty_json = false;
        }

        Ok(config)
    }
}

pub fn run(args: &Args) -> Result<BatchSummary> {
    let config = args.resolve_config()?;
    let records = RecordSet::load(&args.input)?;

    let evaluations = evaluate_batch(&records, &config)?;
    let report = BatchReport::new(evaluations, &config);
    report.export_json(&config.output_path, config.pretty_json)?;

    let summary = report.summary;
    info!("Evaluation completed:");
    info!("  - Images: {}", summary.images);
    info!("  - Coarse precision: {:.4}", summary.mean_precision);
    info!("  - Recall: {:.4}", summary.mean_recall);
    info!("  - Mean point error: {:.3}px", summary.mean_avg_error);
    info!(
        "  - Pooled point error: {:.3}px over {} matches",
        summary.pooled_error, summary.total_matches
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_flags_override_defaults() -> Result<()> {
        let args = Args::parse_from([
            "dentscore",
            "--input",
            "records.json",
            "--output",
            "out/report.json",
            "--summary-only",
            "--compact",
        ]);
        let config = args.resolve_config()?;

        assert_eq!(config.output_path, PathBuf::from("out/report.json"));
        assert!(!config.per_image);
        assert!(!config.pretty_json);
        assert!(!config.parallel);
        Ok(())
    }

    #[test]
    fn test_run_end_to_end() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("dentscore_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;
        let input = dir.join("records.json");
        std::fs::write(
            &input,
            r#"[{"image": "x.png", "img_width": 100, "img_height": 200,
                 "pred_points": [[50, 100]], "gt_boxes_yolo": [[0.5, 0.5, 0.2, 0.4]],
                 "gt_points": [[50, 103]]}]"#,
        )?;

        let argv: Vec<OsString> = vec![
            "dentscore".into(),
            "--input".into(),
            input.into_os_string(),
            "--output".into(),
            dir.join("report.json").into_os_string(),
        ];
        let args = Args::parse_from(argv);
        let summary = run(&args)?;
        let written = dir.join("report.json").exists();
        std::fs::remove_dir_all(&dir)?;

        assert!(written);
        assert_eq!(summary.images, 1);
        assert_eq!(summary.mean_precision, 1.0);
        assert_eq!(summary.mean_recall, 1.0);
        assert_eq!(summary.pooled_error, 3.0);
        Ok(())
    }
}
