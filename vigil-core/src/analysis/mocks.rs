// vigil-core/src/analysis/mocks.rs
//
// --- Mocking Infrastructure (for testing) ---
//
// Scripted Analyzer used by the stage-runner and pipeline tests. Responses
// are consumed in FIFO order; every call is recorded. Compiled
// unconditionally so tests/ can depend on it.

use super::analyzer::{AnalysisRequest, AnalysisRole, Analyzer};
use crate::error::{CoreError, CoreResult};

use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted analyzer response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful non-empty output.
    Text(String),
    /// Successful call that produced blank output.
    Blank,
    /// Transport failure.
    Failure(String),
}

/// Record of one analyzer invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub role: AnalysisRole,
    pub prompt: String,
    pub frame_count: usize,
}

/// Mock implementation of `Analyzer` with FIFO-scripted responses.
#[derive(Debug, Default)]
pub struct MockAnalyzer {
    responses: Mutex<VecDeque<MockResponse>>,
    received_calls: Mutex<Vec<RecordedCall>>,
}

impl MockAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_text(&self, text: &str) {
        self.push_response(MockResponse::Text(text.to_string()));
    }

    pub fn push_blank(&self) {
        self.push_response(MockResponse::Blank);
    }

    pub fn push_failure(&self, message: &str) {
        self.push_response(MockResponse::Failure(message.to_string()));
    }

    /// Returns the recorded calls in invocation order.
    #[must_use]
    pub fn received_calls(&self) -> Vec<RecordedCall> {
        self.received_calls.lock().unwrap().clone()
    }

    /// Total number of analyzer invocations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.received_calls.lock().unwrap().len()
    }
}

impl Analyzer for MockAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> CoreResult<String> {
        self.received_calls.lock().unwrap().push(RecordedCall {
            role: request.role,
            prompt: request.prompt.clone(),
            frame_count: request.frames.len(),
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Blank) => Ok(String::new()),
            Some(MockResponse::Failure(message)) => Err(CoreError::Analyzer(message)),
            None => Err(CoreError::Analyzer(
                "no scripted response remaining".to_string(),
            )),
        }
    }
}
