//! Two-stage analyzer integration.
//!
//! The analysis layer is split into the opaque [`Analyzer`] seam, the
//! concrete Gemini-backed implementation, the pre-flight [`QuotaGuard`],
//! and the retry/fallback stage runner shared by both stages.

pub mod analyzer;
pub mod gemini;
pub mod mocks;
pub mod prompts;
pub mod quota;
pub mod stage;

pub use analyzer::{AnalysisRequest, AnalysisRole, Analyzer};
pub use gemini::GeminiAnalyzer;
pub use quota::QuotaGuard;
pub use stage::{RetryPolicy, StageResult, run_stage};
