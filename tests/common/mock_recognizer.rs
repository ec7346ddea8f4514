//! Mock Speech Recognizer for Testing
//!
//! Plays back scripted session outcomes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use voicecart::speech::{SpeechRecognizer, StopSignal};
use voicecart::RecognitionError;

/// What the next listening session does
#[derive(Debug, Clone)]
pub enum Script {
    Transcript(String),
    Fail(RecognitionError),
    /// Block until stopped, then settle with `Aborted`
    WaitForStop,
}

pub struct MockRecognizer {
    script: Mutex<VecDeque<Script>>,
    /// Number of sessions started
    pub sessions: Arc<AtomicUsize>,
    /// Notified whenever a session starts
    pub started: Arc<Notify>,
}

impl MockRecognizer {
    pub fn new(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sessions: Arc::new(AtomicUsize::new(0)),
            started: Arc::new(Notify::new()),
        }
    }

    /// Create a mock that hears a single phrase
    pub fn with_phrase(text: &str) -> Self {
        Self::new(vec![Script::Transcript(text.to_string())])
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn listen(&self, mut stop: StopSignal) -> Result<String, RecognitionError> {
        self.sessions.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Script::Fail(RecognitionError::NoSpeech));
        self.started.notify_one();

        match next {
            Script::Transcript(text) => Ok(text),
            Script::Fail(err) => Err(err),
            Script::WaitForStop => {
                stop.stopped().await;
                Err(RecognitionError::Aborted)
            }
        }
    }
}
