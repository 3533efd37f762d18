//! Configuration types for OpenAI TTS API.
//!
//! - Model selection (tts-1, tts-1-hd, gpt-4o-mini-tts)
//! - Voice selection
//! - Output format (mp3 for gateway playback)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::super::base::SynthesisError;
use crate::config::ServerConfig;

// =============================================================================
// OpenAI TTS Models
// =============================================================================

/// Supported OpenAI TTS models.
///
/// - `tts-1`: Standard quality, lower latency
/// - `tts-1-hd`: High definition quality, higher latency
/// - `gpt-4o-mini-tts`: Latest model with improved quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenAITTSModel {
    #[default]
    #[serde(rename = "tts-1")]
    Tts1,
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
    #[serde(rename = "gpt-4o-mini-tts")]
    Gpt4oMiniTts,
}

impl OpenAITTSModel {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tts1 => "tts-1",
            Self::Tts1Hd => "tts-1-hd",
            Self::Gpt4oMiniTts => "gpt-4o-mini-tts",
        }
    }

    /// Parse from string, with fallback to default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "tts-1-hd" | "tts1-hd" | "tts1hd" => Self::Tts1Hd,
            "gpt-4o-mini-tts" | "gpt4o-mini-tts" => Self::Gpt4oMiniTts,
            _ => Self::Tts1,
        }
    }
}

// =============================================================================
// OpenAI TTS Voices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIVoice {
    #[default]
    Alloy,
    Ash,
    Coral,
    Echo,
    Fable,
    Onyx,
    Nova,
    Sage,
    Shimmer,
}

impl OpenAIVoice {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Sage => "sage",
            Self::Shimmer => "shimmer",
        }
    }

    /// Parse from string, with fallback to default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ash" => Self::Ash,
            "coral" => Self::Coral,
            "echo" => Self::Echo,
            "fable" => Self::Fable,
            "onyx" => Self::Onyx,
            "nova" => Self::Nova,
            "sage" => Self::Sage,
            "shimmer" => Self::Shimmer,
            _ => Self::Alloy,
        }
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// Container requested from the speech endpoint. The gateway plays MP3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioOutputFormat {
    #[default]
    Mp3,
}

impl AudioOutputFormat {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }

    #[inline]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct OpenAITTSConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: OpenAITTSModel,
    pub voice: OpenAIVoice,
    pub response_format: AudioOutputFormat,
    pub request_timeout: Duration,
}

impl OpenAITTSConfig {
    pub fn from_server_config(config: &ServerConfig) -> Result<Self, SynthesisError> {
        let api_key = config
            .get_api_key("openai")
            .map_err(SynthesisError::ConfigurationError)?;
        Ok(Self {
            api_key,
            base_url: config.openai_base_url.clone(),
            model: OpenAITTSModel::from_str_or_default(&config.openai_models.tts_model),
            voice: OpenAIVoice::from_str_or_default(&config.openai_models.tts_voice),
            response_format: AudioOutputFormat::Mp3,
            request_timeout: config.adapter_timeout(),
        })
    }

    pub fn api_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            super::OPENAI_TTS_PATH
        )
    }
}
