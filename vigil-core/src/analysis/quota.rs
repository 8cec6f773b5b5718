//! Pre-flight request quota guard.
//!
//! Rejects requests whose estimated token footprint exceeds a fixed budget
//! before they are sent to the analyzer. The guard is pure: it inspects the
//! prospective request and returns either an abort reason or nothing, with
//! no side effects, so the stage runner may consult it before every attempt.

use super::analyzer::AnalysisRequest;

/// Rough token estimation divisor: ~4 payload bytes per token.
const BYTES_PER_TOKEN: usize = 4;

/// Estimates the token footprint of one request.
///
/// Counts the instruction, the prompt text, and the base64 frame payload.
#[must_use]
pub fn estimate_tokens(request: &AnalysisRequest) -> usize {
    let frame_bytes: usize = request.frames.iter().map(String::len).sum();
    (request.instruction.len() + request.prompt.len() + frame_bytes) / BYTES_PER_TOKEN
}

/// Pre-flight check rejecting oversized requests.
#[derive(Debug, Clone)]
pub struct QuotaGuard {
    token_budget: usize,
}

impl QuotaGuard {
    #[must_use]
    pub fn new(token_budget: usize) -> Self {
        Self { token_budget }
    }

    /// Screens a prospective request.
    ///
    /// Returns `Some(reason)` when the estimated size exceeds the budget and
    /// the request must not be sent, `None` when it may proceed.
    #[must_use]
    pub fn screen(&self, request: &AnalysisRequest) -> Option<String> {
        let estimated = estimate_tokens(request);
        if estimated > self.token_budget {
            Some(format!(
                "[ABORT] Request too large: ~{estimated} tokens exceeds quota budget of {}",
                self.token_budget
            ))
        } else {
            None
        }
    }
}
