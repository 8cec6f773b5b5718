// ============================================================================
// vigil-core/src/sampling/mod.rs
// ============================================================================
//
// FRAME SAMPLING: Bounded Frame Extraction from Video Files
//
// This module extracts a small, temporally ordered sample of frames from one
// video file. Frames are decoded through ffmpeg, and every retained frame is
// downscaled and re-encoded as a low-quality JPEG before leaving the module,
// so raw pixel data never reaches the analysis stages.
//
// KEY COMPONENTS:
// - FrameSource: trait seam for frame extraction (mockable in tests)
// - SidecarFrameSampler: concrete implementation using ffmpeg-sidecar
// - SampledFrameSet: the immutable result of one extraction

pub mod mocks;

use crate::config::{FRAME_EDGE_PIXELS, FRAME_JPEG_QUALITY, FRAME_SAMPLE_STRIDE, MAX_SAMPLED_FRAMES};
use crate::error::{CoreError, CoreResult};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::RgbImage;
use log::{debug, warn};

use std::path::Path;

/// Ordered set of encoded frames sampled from one video.
///
/// Frames appear in temporal order, each as a base64-encoded JPEG already
/// downscaled to `FRAME_EDGE_PIXELS` square at `FRAME_JPEG_QUALITY`. Never
/// mutated after creation.
#[derive(Debug, Clone)]
pub struct SampledFrameSet {
    /// Base64-encoded JPEG frames in temporal order
    pub frames: Vec<String>,
    /// Total number of frames decoded from the stream while sampling
    pub decoded_frames: u64,
}

impl SampledFrameSet {
    /// Number of sampled frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Trait seam for frame extraction, allowing the pipeline to be driven with
/// a scripted source in tests.
pub trait FrameSource {
    /// Extracts up to `requested` frames from the video at `video_path`.
    ///
    /// The request is clamped into `[1, MAX_SAMPLED_FRAMES]`; `None` and
    /// `Some(0)` default to the ceiling. Reaching end-of-stream before the
    /// cap is not an error, but zero decoded frames is.
    fn extract_frames(
        &self,
        video_path: &Path,
        requested: Option<usize>,
    ) -> CoreResult<SampledFrameSet>;
}

/// Clamps a frame request into `[1, MAX_SAMPLED_FRAMES]`.
///
/// Absent or zero requests default to the ceiling; oversized requests are
/// capped at it.
#[must_use]
pub fn clamp_frame_request(requested: Option<usize>) -> usize {
    match requested {
        None | Some(0) => MAX_SAMPLED_FRAMES,
        Some(count) => count.min(MAX_SAMPLED_FRAMES),
    }
}

/// Concrete `FrameSource` decoding through an ffmpeg child process.
#[derive(Debug, Clone, Default)]
pub struct SidecarFrameSampler;

impl SidecarFrameSampler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FrameSource for SidecarFrameSampler {
    fn extract_frames(
        &self,
        video_path: &Path,
        requested: Option<usize>,
    ) -> CoreResult<SampledFrameSet> {
        let target = clamp_frame_request(requested);

        if !video_path.exists() {
            return Err(CoreError::VideoNotFound(video_path.display().to_string()));
        }

        let mut cmd = FfmpegCommand::new();
        cmd.input(video_path.to_string_lossy().as_ref());
        cmd.arg("-an"); // No audio
        cmd.arg("-sn"); // No subtitles
        cmd.rawvideo(); // Raw RGB frames on stdout

        let mut child = cmd.spawn().map_err(|e| {
            CoreError::VideoUnreadable(format!("{}: {}", video_path.display(), e))
        })?;

        let iterator = match child.iter() {
            Ok(iterator) => iterator,
            Err(e) => {
                // The child was spawned; reap it before reporting.
                let _ = child.kill();
                let _ = child.wait();
                return Err(CoreError::VideoUnreadable(format!(
                    "{}: {}",
                    video_path.display(),
                    e
                )));
            }
        };

        let mut frames: Vec<String> = Vec::with_capacity(target);
        let mut decoded_frames: u64 = 0;
        let mut stream_error: Option<String> = None;
        let mut encode_error: Option<CoreError> = None;

        for event in iterator {
            match event {
                FfmpegEvent::OutputFrame(frame) => {
                    if decoded_frames % FRAME_SAMPLE_STRIDE == 0 {
                        match encode_jpeg_frame(frame.width, frame.height, frame.data) {
                            Ok(encoded) => frames.push(encoded),
                            Err(e) => {
                                encode_error = Some(e);
                                break;
                            }
                        }
                    }
                    decoded_frames += 1;

                    if frames.len() >= target {
                        break; // Cap reached; stop decoding early
                    }
                }
                FfmpegEvent::Error(message)
                | FfmpegEvent::Log(LogLevel::Error, message)
                | FfmpegEvent::Log(LogLevel::Fatal, message) => {
                    debug!("ffmpeg reported: {message}");
                    stream_error = Some(message);
                }
                _ => {}
            }
        }

        // The decode handle is released on every exit path: cap reached,
        // stream exhausted, and mid-read errors all land here.
        let _ = child.kill();
        let _ = child.wait();

        if let Some(e) = encode_error {
            return Err(e);
        }

        if frames.is_empty() {
            return match stream_error {
                Some(message) => Err(CoreError::VideoUnreadable(format!(
                    "{}: {}",
                    video_path.display(),
                    message
                ))),
                None => Err(CoreError::NoFramesDecoded(
                    video_path.display().to_string(),
                )),
            };
        }

        if frames.len() < target {
            // End-of-stream before the cap; short videos legitimately yield
            // fewer frames than requested.
            warn!(
                "Sampled {} of {} requested frames from {}",
                frames.len(),
                target,
                video_path.display()
            );
        }

        Ok(SampledFrameSet {
            frames,
            decoded_frames,
        })
    }
}

/// Downscales one raw RGB frame and re-encodes it as a base64 JPEG.
///
/// `data` must hold `width * height * 3` bytes of packed RGB.
pub(crate) fn encode_jpeg_frame(width: u32, height: u32, data: Vec<u8>) -> CoreResult<String> {
    let image = RgbImage::from_raw(width, height, data).ok_or_else(|| {
        CoreError::FrameEncode(format!(
            "decoded frame buffer does not match {width}x{height} RGB"
        ))
    })?;

    let resized = image::imageops::resize(
        &image,
        FRAME_EDGE_PIXELS,
        FRAME_EDGE_PIXELS,
        FilterType::Triangle,
    );

    let mut jpeg: Vec<u8> = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, FRAME_JPEG_QUALITY);
    encoder
        .encode_image(&resized)
        .map_err(|e| CoreError::FrameEncode(e.to_string()))?;

    Ok(BASE64.encode(&jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_defaults_to_ceiling() {
        assert_eq!(clamp_frame_request(None), MAX_SAMPLED_FRAMES);
        assert_eq!(clamp_frame_request(Some(0)), MAX_SAMPLED_FRAMES);
    }

    #[test]
    fn clamp_caps_oversized_requests() {
        assert_eq!(clamp_frame_request(Some(100)), MAX_SAMPLED_FRAMES);
        assert_eq!(clamp_frame_request(Some(MAX_SAMPLED_FRAMES + 1)), MAX_SAMPLED_FRAMES);
    }

    #[test]
    fn clamp_passes_in_range_requests_through() {
        assert_eq!(clamp_frame_request(Some(1)), 1);
        assert_eq!(clamp_frame_request(Some(MAX_SAMPLED_FRAMES)), MAX_SAMPLED_FRAMES);
    }

    #[test]
    fn encode_jpeg_frame_produces_base64_jpeg() {
        let width = 8u32;
        let height = 8u32;
        let data = vec![128u8; (width * height * 3) as usize];

        let encoded = encode_jpeg_frame(width, height, data).unwrap();
        assert!(!encoded.is_empty());

        // JPEG data starts with the SOI marker 0xFFD8.
        let bytes = BASE64.decode(encoded.as_bytes()).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_jpeg_frame_rejects_short_buffers() {
        let result = encode_jpeg_frame(8, 8, vec![0u8; 10]);
        assert!(matches!(result, Err(CoreError::FrameEncode(_))));
    }

    #[test]
    fn missing_file_fails_with_not_found() {
        let sampler = SidecarFrameSampler::new();
        let result = sampler.extract_frames(Path::new("no_such_video_42.mp4"), None);
        assert!(matches!(result, Err(CoreError::VideoNotFound(_))));
    }
}
