//! Gemini-backed `Analyzer` implementation.
//!
//! Issues blocking `generateContent` requests against the Gemini REST API.
//! The stage instruction becomes the system instruction; the prompt text and
//! any sampled frames become parts of a single user turn.

use crate::error::{CoreError, CoreResult};

use super::analyzer::{AnalysisRequest, Analyzer};

use log::debug;
use serde::{Deserialize, Serialize};

use std::time::Duration;

/// MIME type of the re-encoded frame payload.
const FRAME_MIME_TYPE: &str = "image/jpeg";

/// Request timeout; generation against a frame payload can take a while.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Implementation of `Analyzer` using the Gemini `generateContent` API
/// (blocking).
pub struct GeminiAnalyzer {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiAnalyzer {
    /// Default Gemini API base URL.
    pub const DEFAULT_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";

    /// Creates a new analyzer for `model`, authenticated with `api_key`.
    pub fn new(api_key: &str, model: &str) -> CoreResult<Self> {
        if api_key.is_empty() {
            return Err(CoreError::Analyzer(
                "API key must not be empty".to_string(),
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Analyzer(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Overrides the API base URL (used against local test endpoints).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn build_request(request: &AnalysisRequest) -> GenerateContentRequest {
        let mut parts: Vec<Part> = vec![Part::Text {
            text: request.prompt.clone(),
        }];

        for frame in &request.frames {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: FRAME_MIME_TYPE.to_string(),
                    data: frame.clone(),
                },
            });
        }

        GenerateContentRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::Text {
                    text: request.instruction.clone(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        }
    }
}

impl Analyzer for GeminiAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> CoreResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(
            "{} request: {} frame(s), {} prompt bytes",
            request.role.name(),
            request.frames.len(),
            request.prompt.len()
        );

        let body = Self::build_request(request);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| CoreError::Analyzer(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(CoreError::Analyzer(format!(
                "HTTP {status}: {}",
                detail.trim()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| CoreError::Analyzer(format!("invalid response body: {e}")))?;

        let candidates = parsed.candidates.unwrap_or_default();
        if candidates.is_empty() {
            return Err(CoreError::EmptyAnalyzerOutput);
        }

        // Concatenate every text part of every candidate; providers may
        // split one logical answer across parts.
        let text: String = candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts.unwrap_or_default())
            .filter_map(|part| part.text)
            .collect::<Vec<String>>()
            .join("\n");

        Ok(text)
    }
}

// --- Wire format ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::AnalysisRole;

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(GeminiAnalyzer::new("", "gemini-1.5-flash").is_err());
    }

    #[test]
    fn frames_become_inline_data_parts() {
        let request = AnalysisRequest::with_frames(
            AnalysisRole::VideoSummarizer,
            "instruction",
            "prompt".to_string(),
            vec!["AAAA".to_string(), "BBBB".to_string()],
        );

        let wire = GeminiAnalyzer::build_request(&request);
        let json = serde_json::to_value(&wire).unwrap();

        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "prompt");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[2]["inline_data"]["data"], "BBBB");
        assert_eq!(
            json["system_instruction"]["parts"][0]["text"],
            "instruction"
        );
    }
}
