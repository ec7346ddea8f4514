use crate::error::{VoiceError, VoiceResult};
use crate::matcher::MatchOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Speech
    pub speech_engine: String,
    pub wyoming_host: String,
    pub wyoming_port: u16,
    pub wyoming_timeout_secs: u64,
    pub sample_rate: u32,
    /// Raw 16-bit mono PCM utterance sent to the Wyoming engine
    pub capture_file: String,

    // Parsing
    pub spoken_numbers: bool,
    pub product_aliases: HashMap<String, String>,

    // Matching
    pub min_partial_match_len: usize,
    pub suggestion_limit: usize,
    pub suggestion_cutoff: f64,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech_engine: "none".to_string(),
            wyoming_host: "localhost".to_string(),
            wyoming_port: 10300,
            wyoming_timeout_secs: 30,
            sample_rate: 16000,
            capture_file: String::new(),
            spoken_numbers: true,
            product_aliases: HashMap::new(),
            min_partial_match_len: 0,
            suggestion_limit: 3,
            suggestion_cutoff: 0.6,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or use defaults
    pub fn load() -> VoiceResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a file; a missing file yields defaults and a
    /// corrupt one is moved aside
    pub fn load_from(path: &Path) -> VoiceResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                // Keep the corrupt file around for debugging
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> VoiceResult<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> VoiceResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that parse but cannot work
    pub fn validate(&self) -> VoiceResult<()> {
        if !(0.0..=1.0).contains(&self.suggestion_cutoff) {
            return Err(VoiceError::Config(format!(
                "suggestion_cutoff must be between 0 and 1, got {}",
                self.suggestion_cutoff
            )));
        }
        if self.sample_rate == 0 {
            return Err(VoiceError::Config("sample_rate must be positive".to_string()));
        }
        if self.speech_engine == "wyoming" && self.wyoming_port == 0 {
            return Err(VoiceError::Config("wyoming_port must be set".to_string()));
        }
        Ok(())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            min_partial_len: self.min_partial_match_len,
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voicecart")
        .join("config.json")
}
