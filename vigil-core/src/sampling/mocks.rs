// vigil-core/src/sampling/mocks.rs
//
// --- Mocking Infrastructure (for testing) ---
//
// Scripted FrameSource used by the pipeline integration tests. Compiled
// unconditionally so tests/ can depend on it.

use super::{FrameSource, SampledFrameSet, clamp_frame_request};
use crate::error::{CoreError, CoreResult};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Scripted outcome for one video path.
#[derive(Debug, Clone)]
pub enum MockFrameOutcome {
    /// Extraction succeeds with these pre-encoded frames.
    Frames(Vec<String>),
    /// The path does not exist.
    NotFound,
    /// The stream cannot be opened.
    Unreadable,
    /// The stream opens but decodes zero frames.
    Empty,
}

/// Mock implementation of `FrameSource` with per-path expectations.
#[derive(Debug, Default)]
pub struct MockFrameSource {
    expectations: Mutex<HashMap<PathBuf, MockFrameOutcome>>,
    received_calls: Mutex<Vec<(PathBuf, usize)>>,
}

impl MockFrameSource {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Scripts a successful extraction for `path`.
    pub fn expect_frames(&self, path: &Path, frames: Vec<String>) {
        self.expectations
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), MockFrameOutcome::Frames(frames));
    }

    /// Scripts a failure outcome for `path`.
    pub fn expect_failure(&self, path: &Path, outcome: MockFrameOutcome) {
        self.expectations
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), outcome);
    }

    /// Returns the recorded `(path, clamped_request)` calls in order.
    #[must_use]
    pub fn received_calls(&self) -> Vec<(PathBuf, usize)> {
        self.received_calls.lock().unwrap().clone()
    }
}

impl FrameSource for MockFrameSource {
    fn extract_frames(
        &self,
        video_path: &Path,
        requested: Option<usize>,
    ) -> CoreResult<SampledFrameSet> {
        let target = clamp_frame_request(requested);
        self.received_calls
            .lock()
            .unwrap()
            .push((video_path.to_path_buf(), target));

        let outcome = self
            .expectations
            .lock()
            .unwrap()
            .get(video_path)
            .cloned()
            // Unscripted paths behave like missing files.
            .unwrap_or(MockFrameOutcome::NotFound);

        match outcome {
            MockFrameOutcome::Frames(frames) => {
                let sampled: Vec<String> = frames.into_iter().take(target).collect();
                let decoded_frames = sampled.len() as u64;
                Ok(SampledFrameSet {
                    frames: sampled,
                    decoded_frames,
                })
            }
            MockFrameOutcome::NotFound => Err(CoreError::VideoNotFound(
                video_path.display().to_string(),
            )),
            MockFrameOutcome::Unreadable => Err(CoreError::VideoUnreadable(
                video_path.display().to_string(),
            )),
            MockFrameOutcome::Empty => Err(CoreError::NoFramesDecoded(
                video_path.display().to_string(),
            )),
        }
    }
}
