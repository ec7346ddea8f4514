use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use voicecart::core::VoiceParser;
use voicecart::matcher::MatchOptions;
use voicecart::speech::SpeechRecognizer;
use voicecart::{RecognitionError, VoiceService};

mod common;
use common::mock_recognizer::{MockRecognizer, Script};

fn service_with(mock: MockRecognizer) -> VoiceService {
    let recognizer: Arc<dyn SpeechRecognizer> = Arc::new(mock);
    VoiceService::new(Some(recognizer), VoiceParser::default(), MatchOptions::default())
}

#[tokio::test]
async fn test_listen_returns_trimmed_transcript() {
    let service = service_with(MockRecognizer::with_phrase("  2 coke, 50 pesos \n"));
    assert!(service.is_voice_supported());

    let text = assert_ok!(service.start_listening().await);
    assert_eq!(text, "2 coke, 50 pesos");
    assert!(!service.is_listening());

    let data = service.parse_voice_input(&text);
    assert_eq!(data.products.len(), 1);
    assert_eq!(data.products[0].name, "Coca Cola");
}

#[tokio::test]
async fn test_blank_transcript_is_no_speech() {
    let service = service_with(MockRecognizer::with_phrase("   "));
    let err = assert_err!(service.start_listening().await);
    assert_eq!(err, RecognitionError::NoSpeech);
}

#[tokio::test]
async fn test_backend_failure_propagates() {
    let service = service_with(MockRecognizer::new(vec![Script::Fail(
        RecognitionError::PermissionDenied("microphone".to_string()),
    )]));
    let err = assert_err!(service.start_listening().await);
    assert_eq!(
        err,
        RecognitionError::PermissionDenied("microphone".to_string())
    );
    assert!(!service.is_listening());
}

#[tokio::test]
async fn test_stop_aborts_active_session() {
    let mock = MockRecognizer::new(vec![
        Script::WaitForStop,
        Script::Transcript("1 bread".to_string()),
    ]);
    let started = mock.started.clone();
    let service = Arc::new(service_with(mock));

    let listener = {
        let service = service.clone();
        tokio::spawn(async move { service.start_listening().await })
    };

    started.notified().await;
    assert!(service.is_listening());
    service.stop_listening();

    let result = listener.await.expect("listener task");
    assert_eq!(result, Err(RecognitionError::Aborted));
    assert!(!service.is_listening());

    // A fresh session works after the aborted one
    assert_eq!(service.start_listening().await, Ok("1 bread".to_string()));
}

#[tokio::test]
async fn test_second_session_is_busy() {
    let mock = MockRecognizer::new(vec![Script::WaitForStop]);
    let started = mock.started.clone();
    let sessions = mock.sessions.clone();
    let service = Arc::new(service_with(mock));

    let listener = {
        let service = service.clone();
        tokio::spawn(async move { service.start_listening().await })
    };
    started.notified().await;

    assert_eq!(service.start_listening().await, Err(RecognitionError::Busy));
    assert_eq!(sessions.load(Ordering::SeqCst), 1);

    service.stop_listening();
    assert_eq!(
        listener.await.expect("listener task"),
        Err(RecognitionError::Aborted)
    );
}

#[tokio::test]
async fn test_dropped_session_is_released() {
    let service = service_with(MockRecognizer::new(vec![
        Script::WaitForStop,
        Script::Transcript("3 water".to_string()),
    ]));

    let timed_out =
        tokio::time::timeout(Duration::from_millis(50), service.start_listening()).await;
    assert!(timed_out.is_err());
    assert!(!service.is_listening());

    assert_eq!(service.start_listening().await, Ok("3 water".to_string()));
}

#[tokio::test]
async fn test_stop_when_idle_is_noop() {
    let service = service_with(MockRecognizer::with_phrase("1 candy"));
    service.stop_listening();
    // An earlier stop must not leak into the next session
    assert_eq!(service.start_listening().await, Ok("1 candy".to_string()));
}

#[tokio::test]
async fn test_unsupported_platform() {
    let service = VoiceService::text_only();
    assert!(!service.is_voice_supported());
    assert_eq!(
        service.start_listening().await,
        Err(RecognitionError::NotSupported)
    );
}
