// ============================================================================
// vigil-core/src/pipeline.rs
// ============================================================================
//
// PIPELINE: Main Batch Analysis Orchestration
//
// This module houses the per-video state machine and the batch loop for the
// vigil-core library. It coordinates frame sampling and both analysis
// stages, and guarantees exactly one finalized PipelineRun per discovered
// video, including total failures.
//
// WORKFLOW:
// 1. For each video file, in discovery order:
//    a. Sample frames (a failure here synthesizes the stage-1 report)
//    b. Run stage 1 (visual summarization) unless synthesized
//    c. Run stage 2 (threat classification) - always, even against a
//       synthetic stage-1 report
//    d. Extract the score and classification and assemble the final report
// 2. Any error escaping a video's processing is converted at the loop
//    boundary into a finalized hard-failure run; the batch never aborts.

use crate::analysis::analyzer::{AnalysisRequest, AnalysisRole, Analyzer};
use crate::analysis::prompts;
use crate::analysis::quota::QuotaGuard;
use crate::analysis::stage::{RetryPolicy, StageResult, run_stage};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::report;
use crate::sampling::FrameSource;

use colored::Colorize;
use log::{error, info, warn};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-video aggregate produced by the pipeline. Finalized exactly once,
/// thereafter immutable.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// File name of the processed video
    pub filename: String,
    /// Stage-1 (summarization) outcome
    pub stage_one: StageResult,
    /// Stage-2 (classification) outcome
    pub stage_two: StageResult,
    /// Combined final report text
    pub final_report: String,
    /// Score extracted from the stage-2 text, or "Unknown"
    pub threat_score: String,
    /// Classification extracted from the stage-2 text, or "Unknown"
    pub classification: String,
}

/// Processes a list of video files according to the provided configuration.
///
/// This is the main entry point for the vigil-core library. Videos are
/// processed independently, sequentially, in the order given; one video's
/// failure never aborts the batch, and every input path yields exactly one
/// `PipelineRun` in the returned vector.
///
/// The function is generic over the collaborators for dependency injection
/// and testing:
/// - `F`: `FrameSource` - frame extraction
/// - `A`: `Analyzer` - the external analysis capability
///
/// `interrupt` is honored only between videos: once a video has started,
/// its current attempt completes before the flag is observed again. When
/// set, the remaining videos are skipped and the runs collected so far are
/// returned.
pub fn process_videos<F: FrameSource, A: Analyzer>(
    sampler: &F,
    analyzer: &A,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
    interrupt: &AtomicBool,
) -> Vec<PipelineRun> {
    let quota = QuotaGuard::new(config.token_budget);
    let policy = RetryPolicy {
        max_attempts: config.max_attempts,
        backoff_unit: config.backoff_unit,
    };

    let mut runs: Vec<PipelineRun> = Vec::with_capacity(files_to_process.len());

    for (index, input_path) in files_to_process.iter().enumerate() {
        if interrupt.load(Ordering::SeqCst) {
            warn!(
                "Interrupt received; stopping before {} remaining video(s)",
                files_to_process.len() - index
            );
            break;
        }

        let filename = display_filename(input_path);
        info!(
            "{} {}/{}: {}",
            "Processing".cyan().bold(),
            index + 1,
            files_to_process.len(),
            filename.yellow()
        );

        // No error may escape the per-video boundary: anything the stages
        // did not absorb becomes a finalized hard-failure run.
        let run = match analyze_video(
            sampler, analyzer, config, &quota, &policy, input_path, &filename,
        ) {
            Ok(run) => run,
            Err(e) => {
                error!("Critical error processing {}: {}", filename, e);
                hard_failure_run(&filename, &e)
            }
        };

        info!(
            "Completed: {} (score {}, classification {})",
            filename.green(),
            run.threat_score,
            run.classification
        );
        runs.push(run);

        info!("----------------------------------------");
    }

    runs
}

/// Drives one video through the two-stage state machine.
fn analyze_video<F: FrameSource, A: Analyzer>(
    sampler: &F,
    analyzer: &A,
    config: &CoreConfig,
    quota: &QuotaGuard,
    policy: &RetryPolicy,
    input_path: &Path,
    filename: &str,
) -> CoreResult<PipelineRun> {
    // ---- Stage 1: frame sampling + visual summarization ----

    let stage_one = match sampler.extract_frames(input_path, config.frames_per_video) {
        Ok(frame_set) => {
            info!(
                "Extracted {} frame(s) from {} decoded",
                frame_set.len(),
                frame_set.decoded_frames
            );

            let request = AnalysisRequest::with_frames(
                AnalysisRole::VideoSummarizer,
                prompts::SURVEILLANCE_PROMPT,
                prompts::summary_request_text(input_path),
                frame_set.frames,
            );

            run_stage(
                analyzer,
                &request,
                &report::summary_stage_fallback(filename),
                policy,
                quota,
            )
        }
        Err(e) => {
            // The summarizer is never invoked for this video; the stage-1
            // report is synthesized with fixed placeholder scores.
            warn!("Frame extraction failed for {}: {}", filename, e);
            StageResult::synthetic(report::frame_extraction_fallback(filename, &e.to_string()))
        }
    };

    // ---- Stage 2: threat classification (always runs) ----

    let request = AnalysisRequest::text_only(
        AnalysisRole::ThreatClassifier,
        prompts::CLASSIFICATION_PROMPT,
        prompts::classification_request_text(&stage_one.text),
    );

    let stage_two = run_stage(
        analyzer,
        &request,
        report::classification_stage_fallback(),
        policy,
        quota,
    );

    // ---- Finalization ----

    let threat_score = report::extract_field_or_unknown(&stage_two.text, report::THREAT_SCORE_KEY);
    let classification =
        report::extract_field_or_unknown(&stage_two.text, report::CLASSIFICATION_KEY);
    let final_report =
        report::assemble_final_report(&stage_one.text, &threat_score, &classification);

    Ok(PipelineRun {
        filename: filename.to_string(),
        stage_one,
        stage_two,
        final_report,
        threat_score,
        classification,
    })
}

/// Builds the terminal fallback run for an orchestration failure.
fn hard_failure_run(filename: &str, error: &CoreError) -> PipelineRun {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let final_report =
        report::orchestration_failure_report(filename, &error.to_string(), &timestamp);

    let threat_score =
        report::extract_field_or_unknown(&final_report, report::THREAT_SCORE_KEY);
    let classification =
        report::extract_field_or_unknown(&final_report, report::CLASSIFICATION_KEY);

    PipelineRun {
        filename: filename.to_string(),
        stage_one: StageResult::synthetic(final_report.clone()),
        stage_two: StageResult::synthetic(final_report.clone()),
        final_report,
        threat_score,
        classification,
    }
}

/// Extracts a display file name, falling back to the full path text when
/// the path has no final component.
fn display_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
