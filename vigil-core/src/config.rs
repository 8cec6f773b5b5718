// ============================================================================
// vigil-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structure and Constants
//
// This module defines the configuration structure and constants used
// throughout the vigil-core library. A single immutable CoreConfig value is
// created by the consumer (vigil-cli) and passed explicitly into
// process_videos; nothing in the library reads ambient state.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Hard ceiling on the number of frames forwarded to the summarization
/// stage. Kept very low so the frame payload stays within analyzer request
/// budgets.
pub const MAX_SAMPLED_FRAMES: usize = 2;

/// Every Nth decoded frame is retained until the cap is reached.
pub const FRAME_SAMPLE_STRIDE: u64 = 25;

/// Retained frames are resized to this square edge before re-encoding.
pub const FRAME_EDGE_PIXELS: u32 = 96;

/// JPEG quality for re-encoded frames. Deliberately low; the summarizer
/// only needs coarse scene content.
pub const FRAME_JPEG_QUALITY: u8 = 20;

/// Default number of analyzer attempts per stage.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff delay unit between retries; the delay grows linearly with the
/// attempt index (attempt 1 waits one unit, attempt 2 two units, ...).
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(2);

/// Pre-flight request budget in estimated tokens.
pub const DEFAULT_TOKEN_BUDGET: usize = 8000;

/// Default analyzer model identifier.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the vigil-core library.
///
/// Holds the paths and tuning parameters for one batch run. Created by the
/// consumer of the library (e.g. vigil-cli) and passed to `process_videos`.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Directory containing input video files to process
    pub input_dir: PathBuf,

    /// Path the combined JSON report is written to
    pub output_path: PathBuf,

    // ---- Frame Sampling ----
    /// Requested frames per video; `None` or `Some(0)` use the
    /// `MAX_SAMPLED_FRAMES` ceiling, larger values are clamped to it
    pub frames_per_video: Option<usize>,

    // ---- Analyzer Retry Policy ----
    /// Maximum analyzer attempts per stage
    pub max_attempts: u32,

    /// Backoff delay unit between retries
    pub backoff_unit: Duration,

    // ---- Pre-flight Quota ----
    /// Estimated-token budget a request must stay under to be sent
    pub token_budget: usize,

    // ---- Analyzer Settings ----
    /// Analyzer model identifier used for both stages
    pub model: String,
}

impl CoreConfig {
    /// Creates a configuration with default tuning parameters.
    pub fn new(input_dir: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_dir,
            output_path,
            frames_per_video: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            token_budget: DEFAULT_TOKEN_BUDGET,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Validates the configuration before a batch run.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::PathError(format!(
                "Input directory does not exist: {}",
                self.input_dir.display()
            )));
        }
        if self.max_attempts == 0 {
            return Err(CoreError::PathError(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
