//! Line recognizer
//!
//! Reads one line of already-transcribed text, typically from stdin.

use super::{SpeechRecognizer, StopSignal};
use crate::error::RecognitionError;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::debug;

/// Treats each line from a reader as one utterance
pub struct LineRecognizer<R> {
    reader: Mutex<R>,
}

impl LineRecognizer<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }
}

#[async_trait]
impl<R> SpeechRecognizer for LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    fn name(&self) -> &str {
        "line"
    }

    async fn listen(&self, mut stop: StopSignal) -> Result<String, RecognitionError> {
        if stop.is_stopped() {
            return Err(RecognitionError::Aborted);
        }

        let mut reader = self.reader.lock().await;
        let mut line = String::new();

        tokio::select! {
            _ = stop.stopped() => {
                debug!("Line recognizer stopped");
                Err(RecognitionError::Aborted)
            }
            read = reader.read_line(&mut line) => {
                if read? == 0 {
                    return Err(RecognitionError::NoSpeech);
                }
                Ok(line.trim().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_one_line_per_session() {
        let recognizer = LineRecognizer::new(&b"2 coke, 50 pesos\n1 bread\n"[..]);
        assert_eq!(
            recognizer.listen(StopSignal::never()).await,
            Ok("2 coke, 50 pesos".to_string())
        );
        assert_eq!(
            recognizer.listen(StopSignal::never()).await,
            Ok("1 bread".to_string())
        );
        assert_eq!(
            recognizer.listen(StopSignal::never()).await,
            Err(RecognitionError::NoSpeech)
        );
    }

    #[tokio::test]
    async fn test_stopped_before_start() {
        let (tx, rx) = tokio::sync::watch::channel(true);
        let recognizer = LineRecognizer::new(&b"2 coke\n"[..]);
        assert_eq!(
            recognizer.listen(StopSignal::new(rx)).await,
            Err(RecognitionError::Aborted)
        );
        drop(tx);
    }
}
