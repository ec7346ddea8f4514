//! Wyoming Protocol Recognizer
//!
//! Streams a captured utterance to an external ASR service speaking the
//! Wyoming protocol: JSON events, one per line, over TCP.
//!
//! Reference: https://github.com/rhasspy/wyoming

use super::{SpeechRecognizer, StopSignal};
use crate::config::Config;
use crate::error::RecognitionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info};

/// Wyoming event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WyomingEvent {
    /// Describe request (handshake)
    #[serde(rename = "describe")]
    Describe,

    /// Info response from server
    #[serde(rename = "info")]
    Info(InfoData),

    /// Start of audio stream
    #[serde(rename = "audio-start")]
    AudioStart(AudioFormat),

    /// Audio chunk
    #[serde(rename = "audio-chunk")]
    AudioChunk(AudioChunkData),

    /// End of audio stream
    #[serde(rename = "audio-stop")]
    AudioStop,

    /// Transcript result
    #[serde(rename = "transcript")]
    Transcript(TranscriptData),
}

/// Info response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InfoData {
    #[serde(default)]
    pub asr: Vec<AsrInfo>,
}

/// ASR service info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrInfo {
    pub name: String,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// 16-bit PCM stream format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFormat {
    pub rate: u32,
    pub width: u8,
    pub channels: u8,
}

/// Audio chunk data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioChunkData {
    pub rate: u32,
    pub width: u8,
    pub channels: u8,
    #[serde(with = "base64_bytes")]
    pub audio: Vec<u8>,
    #[serde(default)]
    pub timestamp: u64,
}

/// Transcript result data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptData {
    pub text: String,
}

/// Base64 serialization for audio bytes
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Wyoming-backed recognizer reading raw 16-bit mono PCM from a capture file
pub struct WyomingRecognizer {
    host: String,
    port: u16,
    sample_rate: u32,
    capture_path: PathBuf,
    timeout: Duration,
}

impl WyomingRecognizer {
    pub fn new(host: &str, port: u16, capture_path: impl Into<PathBuf>) -> Self {
        Self {
            host: host.to_string(),
            port,
            sample_rate: 16000,
            capture_path: capture_path.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.wyoming_host, config.wyoming_port, &config.capture_file)
            .with_sample_rate(config.sample_rate)
            .with_timeout(Duration::from_secs(config.wyoming_timeout_secs))
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn format(&self) -> AudioFormat {
        AudioFormat {
            rate: self.sample_rate,
            width: 2,
            channels: 1,
        }
    }

    /// Send audio to the Wyoming server and return its transcript.
    /// An empty string means the server closed without a transcript.
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String, RecognitionError> {
        let stream = TcpStream::connect((&*self.host, self.port))
            .await
            .map_err(|e| {
                RecognitionError::Service(format!(
                    "cannot reach Wyoming server {}:{}: {}",
                    self.host, self.port, e
                ))
            })?;

        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        // Handshake
        send_event(&mut writer, &WyomingEvent::Describe).await?;
        let mut line = String::new();
        reader.read_line(&mut line).await?;
        debug!("Wyoming handshake: {}", line.trim());

        let format = self.format();
        send_event(&mut writer, &WyomingEvent::AudioStart(format)).await?;
        send_event(
            &mut writer,
            &WyomingEvent::AudioChunk(AudioChunkData {
                rate: format.rate,
                width: format.width,
                channels: format.channels,
                audio: audio.to_vec(),
                timestamp: 0,
            }),
        )
        .await?;
        send_event(&mut writer, &WyomingEvent::AudioStop).await?;

        debug!("Sent audio ({} bytes), waiting for transcript...", audio.len());

        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await? == 0 {
                return Ok(String::new());
            }

            match serde_json::from_str::<WyomingEvent>(&line) {
                Ok(WyomingEvent::Transcript(data)) => {
                    info!("📝 Wyoming transcript: '{}'", data.text);
                    return Ok(data.text);
                }
                Ok(other) => debug!("Ignoring Wyoming event: {:?}", other),
                Err(e) => debug!("Unparseable Wyoming line ({}): {}", e, line.trim()),
            }
        }
    }
}

async fn send_event<W>(writer: &mut W, event: &WyomingEvent) -> Result<(), RecognitionError>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(event)
        .map_err(|e| RecognitionError::Service(format!("cannot encode event: {}", e)))?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[async_trait]
impl SpeechRecognizer for WyomingRecognizer {
    fn name(&self) -> &str {
        "wyoming"
    }

    async fn listen(&self, mut stop: StopSignal) -> Result<String, RecognitionError> {
        if stop.is_stopped() {
            return Err(RecognitionError::Aborted);
        }

        let audio = tokio::fs::read(&self.capture_path).await?;
        if audio.is_empty() {
            return Err(RecognitionError::NoSpeech);
        }

        tokio::select! {
            _ = stop.stopped() => {
                info!("🛑 Wyoming session aborted");
                Err(RecognitionError::Aborted)
            }
            result = tokio::time::timeout(self.timeout, self.transcribe(&audio)) => match result {
                Ok(transcript) => transcript,
                Err(_) => Err(RecognitionError::Service(
                    "timeout waiting for transcript".to_string(),
                )),
            }
        }
    }
}
