//! Speech acquisition boundary
//!
//! Recognizers turn audio (or anything else) into transcribed text. The
//! parsing core never depends on them; `VoiceService` glues a located
//! recognizer to the parser and matcher.
//!
//! Backends:
//! - Wyoming: remote ASR protocol (e.g., faster-whisper) fed from a capture file
//! - Line: one typed line from stdin, a keyboard stand-in for a microphone

pub mod line;
pub mod service;
pub mod wyoming;

use crate::config::Config;
use crate::error::RecognitionError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

// Re-export main types
pub use line::LineRecognizer;
pub use service::VoiceService;
pub use wyoming::WyomingRecognizer;

/// Cancellation handle passed to a listening session
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub(crate) fn new(rx: watch::Receiver<bool>) -> Self {
        Self { rx }
    }

    /// A signal that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether a stop was already requested
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once a stop is requested. Pends forever if nobody can stop us.
    pub async fn stopped(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Trait for speech recognition backends
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Run one listening session and return the transcript.
    /// Backends should settle with `RecognitionError::Aborted` once `stop` fires.
    async fn listen(&self, stop: StopSignal) -> Result<String, RecognitionError>;
}

/// Factory to locate the configured recognizer, if any
pub fn locate(config: &Config) -> Option<Arc<dyn SpeechRecognizer>> {
    match config.speech_engine.as_str() {
        "wyoming" => {
            if config.capture_file.is_empty() {
                warn!("⚠️ Wyoming engine selected but no capture file configured");
                return None;
            }
            Some(Arc::new(WyomingRecognizer::from_config(config)))
        }
        "stdin" => Some(Arc::new(LineRecognizer::stdin())),
        "none" | "" => None,
        other => {
            warn!("⚠️ Unknown speech engine '{}', voice input disabled", other);
            None
        }
    }
}
