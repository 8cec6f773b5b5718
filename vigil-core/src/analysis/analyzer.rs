//! The opaque analyzer seam.
//!
//! An [`Analyzer`] maps one structured request (role, instruction, text
//! prompt, optional frame payload) to free-text output. The pipeline never
//! assumes anything about the transport behind the trait; the concrete
//! implementation lives in [`super::gemini`] and tests drive the pipeline
//! with [`super::mocks::MockAnalyzer`].

use crate::error::CoreResult;

/// Identifies which stage persona a request is issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisRole {
    /// Stage 1: summarizes sampled frames and scores the risk.
    VideoSummarizer,
    /// Stage 2: classifies a stage-1 summary into an incident category.
    ThreatClassifier,
}

impl AnalysisRole {
    /// Stable name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisRole::VideoSummarizer => "VideoSummarizer",
            AnalysisRole::ThreatClassifier => "ThreatClassifier",
        }
    }
}

/// One analyzer invocation: instruction plus payload.
///
/// `frames` carries base64-encoded JPEG attachments; stage 2 sends none.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub role: AnalysisRole,
    /// System instruction defining the stage persona
    pub instruction: String,
    /// User-visible prompt text for this invocation
    pub prompt: String,
    /// Base64-encoded JPEG frames, in temporal order
    pub frames: Vec<String>,
}

impl AnalysisRequest {
    /// Builds a text-only request.
    #[must_use]
    pub fn text_only(role: AnalysisRole, instruction: &str, prompt: String) -> Self {
        Self {
            role,
            instruction: instruction.to_string(),
            prompt,
            frames: Vec::new(),
        }
    }

    /// Builds a request carrying a frame payload.
    #[must_use]
    pub fn with_frames(
        role: AnalysisRole,
        instruction: &str,
        prompt: String,
        frames: Vec<String>,
    ) -> Self {
        Self {
            role,
            instruction: instruction.to_string(),
            prompt,
            frames,
        }
    }
}

/// External capability mapping a structured request to free-text output.
///
/// Implementations are invoked once per attempt per stage and may block on
/// network I/O. An `Ok` result with blank text is treated as a failed
/// attempt by the stage runner, not by implementations.
pub trait Analyzer {
    fn analyze(&self, request: &AnalysisRequest) -> CoreResult<String>;
}
