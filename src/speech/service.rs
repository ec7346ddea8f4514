//! Voice Service
//!
//! Owns the located recognizer and enforces one listening session at a time.

use super::{locate, SpeechRecognizer, StopSignal};
use crate::catalog::CatalogProduct;
use crate::config::Config;
use crate::core::{SpokenProduct, VoiceParser, VoiceTransactionData};
use crate::error::RecognitionError;
use crate::matcher::{match_products_with_options, MatchOptions, MatchedLineItem};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

struct ActiveSession {
    id: u64,
    stop: watch::Sender<bool>,
}

/// Entry point for the surrounding application
pub struct VoiceService {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    parser: VoiceParser,
    match_options: MatchOptions,
    session: Mutex<Option<ActiveSession>>,
    next_session: AtomicU64,
}

/// Clears the active session when listening settles or is dropped
struct SessionGuard<'a> {
    service: &'a VoiceService,
    id: u64,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut session) = self.service.session.lock() {
            if session.as_ref().map(|s| s.id) == Some(self.id) {
                *session = None;
            }
        }
    }
}

impl VoiceService {
    pub fn new(
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
        parser: VoiceParser,
        match_options: MatchOptions,
    ) -> Self {
        match &recognizer {
            Some(r) => info!("🎙️ Voice input available via {}", r.name()),
            None => info!("⌨️ No speech recognizer, text input only"),
        }

        Self {
            recognizer,
            parser,
            match_options,
            session: Mutex::new(None),
            next_session: AtomicU64::new(1),
        }
    }

    /// Locate the configured recognizer and build the parser from config
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            locate(config),
            VoiceParser::from_config(config),
            config.match_options(),
        )
    }

    /// Text-only service with default parsing and matching
    pub fn text_only() -> Self {
        Self::new(None, VoiceParser::default(), MatchOptions::default())
    }

    pub fn is_voice_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Whether a listening session is in progress
    pub fn is_listening(&self) -> bool {
        self.session.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Listen once and return the transcript
    pub async fn start_listening(&self) -> Result<String, RecognitionError> {
        let recognizer = self
            .recognizer
            .clone()
            .ok_or(RecognitionError::NotSupported)?;

        let (id, signal) = self.begin_session()?;
        let _guard = SessionGuard { service: self, id };

        info!("👂 Listening (session {}, {})", id, recognizer.name());
        let text = recognizer.listen(signal).await.map_err(|e| {
            warn!("Listening session {} failed: {}", id, e);
            e
        })?;

        let text = text.trim();
        if text.is_empty() {
            return Err(RecognitionError::NoSpeech);
        }

        info!("📝 Heard: '{}'", text);
        Ok(text.to_string())
    }

    /// Ask the active session to stop. No-op when idle.
    pub fn stop_listening(&self) {
        let Ok(session) = self.session.lock() else {
            return;
        };

        match session.as_ref() {
            Some(active) => {
                info!("🛑 Stopping listening session {}", active.id);
                let _ = active.stop.send(true);
            }
            None => debug!("stop_listening with no active session"),
        }
    }

    pub fn parse_voice_input(&self, text: &str) -> VoiceTransactionData {
        self.parser.parse(text)
    }

    pub fn match_products_with_database(
        &self,
        products: &[SpokenProduct],
        catalog: &[CatalogProduct],
    ) -> Vec<MatchedLineItem> {
        match_products_with_options(products, catalog, self.match_options)
    }

    pub fn parser(&self) -> &VoiceParser {
        &self.parser
    }

    fn begin_session(&self) -> Result<(u64, StopSignal), RecognitionError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| RecognitionError::Service(e.to_string()))?;

        if session.is_some() {
            return Err(RecognitionError::Busy);
        }

        let (tx, rx) = watch::channel(false);
        let id = self.next_session.fetch_add(1, Ordering::SeqCst);
        *session = Some(ActiveSession { id, stop: tx });
        Ok((id, StopSignal::new(rx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn test_unsupported_rejects_immediately() {
        let service = VoiceService::text_only();
        assert!(!service.is_voice_supported());
        assert_eq!(
            service.start_listening().await,
            Err(RecognitionError::NotSupported)
        );
        assert!(!service.is_listening());
        // stop with nothing active is harmless
        service.stop_listening();
    }

    #[test]
    fn test_text_paths_work_without_recognizer() {
        let service = VoiceService::text_only();
        let data = service.parse_voice_input("2 coke, 60 pesos");
        let catalog = vec![CatalogProduct::new("c1", "Coca Cola", BigDecimal::from(25))];
        let items = service.match_products_with_database(&data.products, &catalog);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total, BigDecimal::from(50));
    }
}
