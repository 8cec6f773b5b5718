//! Core library for batch video surveillance analysis.
//!
//! This crate provides video file discovery, bounded frame sampling, a
//! two-stage analyzer pipeline (visual summarization, then threat
//! classification) with retry/backoff/fallback handling, and aggregation of
//! all per-video outcomes into one persisted JSON report.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vigil_core::{CoreConfig, aggregate_runs, find_processable_files, persist_summary, process_videos};
//! use vigil_core::analysis::GeminiAnalyzer;
//! use vigil_core::sampling::SidecarFrameSampler;
//! use std::path::PathBuf;
//! use std::sync::atomic::AtomicBool;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/videos"),
//!     PathBuf::from("results/video_analysis_results.json"),
//! );
//! config.validate().unwrap();
//!
//! let files = find_processable_files(&config.input_dir).unwrap();
//! let sampler = SidecarFrameSampler::new();
//! let analyzer = GeminiAnalyzer::new("api-key", &config.model).unwrap();
//! let interrupt = AtomicBool::new(false);
//!
//! let runs = process_videos(&sampler, &analyzer, &config, &files, &interrupt);
//! let summary = aggregate_runs(&runs);
//! persist_summary(&summary, &config.output_path).unwrap();
//! ```

pub mod aggregation;
pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sampling;

// Re-exports for public API
pub use aggregation::{BatchSummary, ProcessingSummary, aggregate_runs, persist_summary};
pub use analysis::{AnalysisRequest, AnalysisRole, Analyzer, QuotaGuard, RetryPolicy, StageResult};
pub use config::CoreConfig;
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use pipeline::{PipelineRun, process_videos};
pub use sampling::{FrameSource, SampledFrameSet, SidecarFrameSampler};
