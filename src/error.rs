//! VoiceCart Error Types
//!
//! Parsing and matching never fail; errors only come from the speech
//! boundary, configuration and catalog loading.

use thiserror::Error;

/// Failure reported by a speech recognition backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("speech recognition is not supported on this platform")]
    NotSupported,

    #[error("a listening session is already active")]
    Busy,

    #[error("no speech detected")]
    NoSpeech,

    #[error("audio capture failed: {0}")]
    AudioCapture(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("listening aborted")]
    Aborted,

    #[error("speech service error: {0}")]
    Service(String),
}

/// Central error type for VoiceCart
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for VoiceCart operations
pub type VoiceResult<T> = Result<T, VoiceError>;

impl From<std::io::Error> for RecognitionError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                RecognitionError::PermissionDenied(err.to_string())
            }
            std::io::ErrorKind::NotFound | std::io::ErrorKind::UnexpectedEof => {
                RecognitionError::AudioCapture(err.to_string())
            }
            _ => RecognitionError::Service(err.to_string()),
        }
    }
}
