use thiserror::Error;

/// Custom error types for vigil
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("No processable video files found")]
    NoFilesFound,

    #[error("Video file not found: {0}")]
    VideoNotFound(String),

    #[error("Could not open video stream: {0}")]
    VideoUnreadable(String),

    #[error("No frames could be extracted from the video: {0}")]
    NoFramesDecoded(String),

    #[error("Frame encoding failed: {0}")]
    FrameEncode(String),

    #[error("Analyzer request failed: {0}")]
    Analyzer(String),

    #[error("Analyzer returned empty output")]
    EmptyAnalyzerOutput,

    #[error("Report serialization failed: {0}")]
    ReportSerialization(#[from] serde_json::Error),
}

/// Result type for vigil operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
