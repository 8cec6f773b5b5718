// ============================================================================
// vigil-core/src/analysis/stage.rs
// ============================================================================
//
// STAGE RUNNER: Retry, Backoff and Fallback Around One Analyzer Stage
//
// Generic wrapper used identically for both analysis stages. It owns the
// failure policy of a single stage invocation: pre-flight quota gating,
// bounded retries with growing backoff, and a guaranteed non-throwing
// degraded fallback. Every failure mode resolves to a StageResult; this
// module never raises to its caller.

use crate::analysis::analyzer::{AnalysisRequest, Analyzer};
use crate::analysis::quota::QuotaGuard;
use crate::config::{DEFAULT_BACKOFF_UNIT, DEFAULT_MAX_ATTEMPTS};

use colored::Colorize;
use log::{info, warn};

use std::thread;
use std::time::{Duration, Instant};

/// Output of one stage invocation. Immutable once produced.
#[derive(Debug, Clone)]
pub struct StageResult {
    /// Free-text stage output, or the fixed fallback text when degraded
    pub text: String,
    /// Analyzer attempts actually sent
    pub attempts: u32,
    /// Whether the text was produced by fallback logic rather than a
    /// successful analyzer response
    pub degraded: bool,
    /// Wall-clock time spent in the stage, including backoff
    pub elapsed: Duration,
}

impl StageResult {
    /// A synthetic result that never touched the analyzer.
    #[must_use]
    pub fn synthetic(text: String) -> Self {
        Self {
            text,
            attempts: 0,
            degraded: true,
            elapsed: Duration::ZERO,
        }
    }
}

/// Retry policy for one stage.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum analyzer attempts before falling back
    pub max_attempts: u32,
    /// Backoff unit; the delay after attempt N is N × unit
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt following failed attempt `attempt_index`
    /// (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.backoff_unit * attempt_index
    }
}

/// Runs one analysis stage to completion.
///
/// Before each attempt the quota guard screens the request; a rejection
/// yields an immediate degraded result with `fallback_text` and does not
/// consume an attempt slot. Otherwise the analyzer is invoked once per
/// attempt; blank output counts as a failed attempt even without an error.
/// Exhausting `policy.max_attempts` also resolves to `fallback_text` with
/// `degraded = true`.
pub fn run_stage<A: Analyzer>(
    analyzer: &A,
    request: &AnalysisRequest,
    fallback_text: &str,
    policy: &RetryPolicy,
    quota: &QuotaGuard,
) -> StageResult {
    let stage_start = Instant::now();
    let role = request.role.name();
    let mut attempts: u32 = 0;

    while attempts < policy.max_attempts {
        if let Some(reason) = quota.screen(request) {
            warn!("{} pre-flight rejection: {}", role.yellow(), reason);
            return StageResult {
                text: fallback_text.to_string(),
                attempts,
                degraded: true,
                elapsed: stage_start.elapsed(),
            };
        }

        attempts += 1;
        info!(
            "{} attempt {}/{}",
            role.cyan(),
            attempts,
            policy.max_attempts
        );

        match analyzer.analyze(request) {
            Ok(text) if !text.trim().is_empty() => {
                return StageResult {
                    text,
                    attempts,
                    degraded: false,
                    elapsed: stage_start.elapsed(),
                };
            }
            Ok(_) => {
                warn!(
                    "{} returned empty output on attempt {}/{}",
                    role, attempts, policy.max_attempts
                );
            }
            Err(e) => {
                warn!(
                    "{} attempt {}/{} failed: {}",
                    role, attempts, policy.max_attempts, e
                );
            }
        }

        if attempts < policy.max_attempts {
            let delay = policy.delay_for(attempts);
            if !delay.is_zero() {
                info!("Waiting {}s before retry...", delay.as_secs());
                thread::sleep(delay);
            }
        }
    }

    warn!(
        "{} exhausted {} attempts, using fallback output",
        role.yellow(),
        policy.max_attempts
    );

    StageResult {
        text: fallback_text.to_string(),
        attempts,
        degraded: true,
        elapsed: stage_start.elapsed(),
    }
}
