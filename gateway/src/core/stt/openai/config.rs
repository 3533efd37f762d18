//! Configuration types for OpenAI STT (Whisper) API.
//!
//! - Model selection (whisper-1, gpt-4o-transcribe, gpt-4o-mini-transcribe)
//! - Recording container detection for the multipart upload
//! - Provider configuration built from [`ServerConfig`]

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::super::base::TranscriptionError;
use crate::config::ServerConfig;

/// OpenAI rejects uploads above 25MB
pub const MAX_FILE_SIZE_BYTES: usize = 25 * 1024 * 1024;

// =============================================================================
// OpenAI STT Models
// =============================================================================

/// Supported OpenAI STT models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenAISTTModel {
    /// Original Whisper model
    #[default]
    #[serde(rename = "whisper-1")]
    Whisper1,
    #[serde(rename = "gpt-4o-transcribe")]
    Gpt4oTranscribe,
    #[serde(rename = "gpt-4o-mini-transcribe")]
    Gpt4oMiniTranscribe,
}

impl OpenAISTTModel {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whisper1 => "whisper-1",
            Self::Gpt4oTranscribe => "gpt-4o-transcribe",
            Self::Gpt4oMiniTranscribe => "gpt-4o-mini-transcribe",
        }
    }

    /// Parse from string, with fallback to default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "gpt-4o-transcribe" | "gpt4o-transcribe" => Self::Gpt4oTranscribe,
            "gpt-4o-mini-transcribe" | "gpt4o-mini-transcribe" => Self::Gpt4oMiniTranscribe,
            _ => Self::Whisper1,
        }
    }
}

impl std::fmt::Display for OpenAISTTModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Recording Formats
// =============================================================================

/// Containers the gateway may hand us, as accepted by the transcription API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioInputFormat {
    /// Gateway recordings are mp3 unless told otherwise
    #[default]
    Mp3,
    Wav,
    Ogg,
    Webm,
    M4a,
    Mp4,
    Flac,
}

impl AudioInputFormat {
    #[inline]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
            Self::M4a => "audio/m4a",
            Self::Mp4 => "audio/mp4",
            Self::Flac => "audio/flac",
        }
    }

    #[inline]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::M4a => "m4a",
            Self::Mp4 => "mp4",
            Self::Flac => "flac",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" | "mpeg" | "mpga" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "ogg" | "oga" => Some(Self::Ogg),
            "webm" => Some(Self::Webm),
            "m4a" => Some(Self::M4a),
            "mp4" => Some(Self::Mp4),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// Match a `Content-Type` header value, ignoring parameters
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/ogg" => Some(Self::Ogg),
            "audio/webm" => Some(Self::Webm),
            "audio/m4a" | "audio/x-m4a" => Some(Self::M4a),
            "audio/mp4" => Some(Self::Mp4),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// Header first, then the URL's file extension, then the default.
    pub fn detect(content_type: Option<&str>, url: &url::Url) -> Self {
        content_type
            .and_then(Self::from_mime)
            .or_else(|| {
                url.path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .and_then(|name| name.rsplit_once('.'))
                    .and_then(|(_, ext)| Self::from_extension(ext))
            })
            .unwrap_or_default()
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct OpenAISTTConfig {
    pub api_key: String,
    /// API root, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub model: OpenAISTTModel,
    /// ISO-639-1 hint; `None` lets the model detect the language
    pub language: Option<String>,
    pub max_file_size_bytes: usize,
    pub request_timeout: Duration,
    /// Skip SSRF checks on the recording URL (development only)
    pub allow_private_hosts: bool,
}

impl OpenAISTTConfig {
    pub fn from_server_config(config: &ServerConfig) -> Result<Self, TranscriptionError> {
        let api_key = config
            .get_api_key("openai")
            .map_err(TranscriptionError::ConfigurationError)?;

        let stt_config = Self {
            api_key,
            base_url: config.openai_base_url.clone(),
            model: OpenAISTTModel::from_str_or_default(&config.openai_models.stt_model),
            language: None,
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            request_timeout: config.adapter_timeout(),
            allow_private_hosts: config.recording_allow_private_hosts,
        };
        stt_config
            .validate()
            .map_err(TranscriptionError::ConfigurationError)?;
        Ok(stt_config)
    }

    pub fn api_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("API key is required".to_string());
        }
        if self.max_file_size_bytes == 0 || self.max_file_size_bytes > MAX_FILE_SIZE_BYTES {
            return Err(format!(
                "max_file_size_bytes must be between 1 and {MAX_FILE_SIZE_BYTES}"
            ));
        }
        Ok(())
    }
}
