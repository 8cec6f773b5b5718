//! Batch result aggregation and report persistence.
//!
//! Collects all per-video runs in discovery order, derives the summary
//! statistics, and persists the combined artifact as one JSON document with
//! two top-level fields: the processing summary and the ordered mapping
//! from video file name to final report text.

use crate::error::CoreResult;
use crate::pipeline::PipelineRun;
use crate::report::HARD_FAILURE_MARKER;

use log::info;
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::Path;

/// Derived counts for one batch. Computed once, written once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub total_videos: usize,
    pub successful_analyses: usize,
    pub failed_analyses: usize,
    /// Percentage with one decimal place; the literal "0%" for empty batches
    pub success_rate: String,
    pub timestamp: String,
}

/// The persisted batch artifact.
///
/// `video_results` preserves discovery order; serde_json's `preserve_order`
/// feature keeps the map insertion-ordered through serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub processing_summary: ProcessingSummary,
    pub video_results: serde_json::Map<String, serde_json::Value>,
}

/// Aggregates an ordered sequence of runs into a batch summary.
///
/// A run counts as successful when its final report does not begin with the
/// hard-failure marker; degraded-but-present results therefore count as
/// successes, which is what lets consumers distinguish the two without
/// re-parsing report content.
#[must_use]
pub fn aggregate_runs(runs: &[PipelineRun]) -> BatchSummary {
    let total_videos = runs.len();
    let successful_analyses = runs
        .iter()
        .filter(|run| !run.final_report.starts_with(HARD_FAILURE_MARKER))
        .count();
    let failed_analyses = total_videos - successful_analyses;

    let success_rate = if total_videos == 0 {
        "0%".to_string()
    } else {
        format!(
            "{:.1}%",
            (successful_analyses as f64 / total_videos as f64) * 100.0
        )
    };

    let mut video_results = serde_json::Map::new();
    for run in runs {
        video_results.insert(
            run.filename.clone(),
            serde_json::Value::String(run.final_report.clone()),
        );
    }

    BatchSummary {
        processing_summary: ProcessingSummary {
            total_videos,
            successful_analyses,
            failed_analyses,
            success_rate,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        },
        video_results,
    }
}

/// Persists the batch summary as pretty-printed JSON.
///
/// The destination's parent directory is created if absent; the document is
/// serialized and written in a single pass.
pub fn persist_summary(summary: &BatchSummary, output_path: &Path) -> CoreResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let document = serde_json::to_string_pretty(summary)?;
    fs::write(output_path, document)?;

    info!("Results saved to {}", output_path.display());
    Ok(())
}
