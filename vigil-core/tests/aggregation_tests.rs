// vigil-core/tests/aggregation_tests.rs

use vigil_core::aggregation::{aggregate_runs, persist_summary};
use vigil_core::analysis::StageResult;
use vigil_core::pipeline::PipelineRun;
use vigil_core::report::HARD_FAILURE_MARKER;

use std::fs;
use tempfile::tempdir;

fn make_run(filename: &str, final_report: &str) -> PipelineRun {
    PipelineRun {
        filename: filename.to_string(),
        stage_one: StageResult::synthetic(final_report.to_string()),
        stage_two: StageResult::synthetic(final_report.to_string()),
        final_report: final_report.to_string(),
        threat_score: "Unknown".to_string(),
        classification: "Unknown".to_string(),
    }
}

#[test]
fn test_empty_batch_reports_zero_percent() -> Result<(), Box<dyn std::error::Error>> {
    let summary = aggregate_runs(&[]);

    assert_eq!(summary.processing_summary.total_videos, 0);
    assert_eq!(summary.processing_summary.successful_analyses, 0);
    assert_eq!(summary.processing_summary.failed_analyses, 0);
    assert_eq!(summary.processing_summary.success_rate, "0%");
    assert!(summary.video_results.is_empty());

    Ok(())
}

#[test]
fn test_marker_prefix_counts_as_failed() -> Result<(), Box<dyn std::error::Error>> {
    let runs = vec![
        make_run("a.mp4", "SUMMARY: quiet\n\nRISK_SCORE: 4"),
        make_run("b.mov", &format!("{HARD_FAILURE_MARKER} decoder exploded")),
        make_run("c.avi", "FALLBACK ANALYSIS for c.avi:\nRISK_SCORE: 125"),
    ];

    let summary = aggregate_runs(&runs);

    assert_eq!(summary.processing_summary.total_videos, 3);
    // Degraded-but-present output counts as success; only the marker fails
    assert_eq!(summary.processing_summary.successful_analyses, 2);
    assert_eq!(summary.processing_summary.failed_analyses, 1);
    assert_eq!(summary.processing_summary.success_rate, "66.7%");

    Ok(())
}

#[test]
fn test_aggregation_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let runs = vec![
        make_run("a.mp4", "SUMMARY: quiet"),
        make_run("b.mov", &format!("{HARD_FAILURE_MARKER} broken")),
    ];

    let first = aggregate_runs(&runs);
    let second = aggregate_runs(&runs);

    assert_eq!(
        first.processing_summary.total_videos,
        second.processing_summary.total_videos
    );
    assert_eq!(
        first.processing_summary.successful_analyses,
        second.processing_summary.successful_analyses
    );
    assert_eq!(
        first.processing_summary.failed_analyses,
        second.processing_summary.failed_analyses
    );
    assert_eq!(
        first.processing_summary.success_rate,
        second.processing_summary.success_rate
    );

    Ok(())
}

#[test]
fn test_persisted_document_preserves_discovery_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    // Parent directories are created on demand
    let output_path = dir.path().join("results").join("video_analysis_results.json");

    let runs = vec![
        make_run("a.mp4", "report for a"),
        make_run("b.mov", "report for b"),
    ];

    let summary = aggregate_runs(&runs);
    persist_summary(&summary, &output_path)?;

    let document = fs::read_to_string(&output_path)?;
    let parsed: serde_json::Value = serde_json::from_str(&document)?;

    let results = parsed["video_results"].as_object().unwrap();
    let keys: Vec<&String> = results.keys().collect();
    assert_eq!(keys, vec!["a.mp4", "b.mov"]);
    assert_eq!(results["a.mp4"], "report for a");
    assert_eq!(results["b.mov"], "report for b");

    assert_eq!(parsed["processing_summary"]["total_videos"], 2);
    assert_eq!(parsed["processing_summary"]["success_rate"], "100.0%");
    assert!(parsed["processing_summary"]["timestamp"].is_string());

    dir.close()?;
    Ok(())
}
