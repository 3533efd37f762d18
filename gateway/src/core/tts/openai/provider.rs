//! OpenAI TTS provider implementation.
//!
//! # API Reference
//!
//! - Endpoint: `POST {base}/audio/speech`
//! - Models: tts-1, tts-1-hd, gpt-4o-mini-tts
//! - Output: the complete audio file in the response body

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use super::config::OpenAITTSConfig;
use crate::core::providers::build_http_client;
use crate::core::providers::openai::{describe_error, is_auth_failure};
use crate::core::tts::base::{AudioArtifact, SpeechSynthesizer, SynthesisError};

/// Longest input the speech endpoint accepts
pub const MAX_INPUT_CHARS: usize = 4096;

pub struct OpenAITTS {
    config: OpenAITTSConfig,
    http_client: Client,
}

impl OpenAITTS {
    pub fn new(config: OpenAITTSConfig) -> Result<Self, SynthesisError> {
        if config.api_key.is_empty() {
            return Err(SynthesisError::ConfigurationError(
                "API key is required".to_string(),
            ));
        }
        let http_client = build_http_client(config.request_timeout).map_err(|e| {
            SynthesisError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &OpenAITTSConfig {
        &self.config
    }

    fn request_body(&self, text: &str) -> serde_json::Value {
        json!({
            "model": self.config.model.as_str(),
            "input": text,
            "voice": self.config.voice.as_str(),
            "response_format": self.config.response_format.as_str(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAITTS {
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact, SynthesisError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::InvalidText("text is empty".to_string()));
        }
        if text.chars().count() > MAX_INPUT_CHARS {
            return Err(SynthesisError::InvalidText(format!(
                "text exceeds {MAX_INPUT_CHARS} characters"
            )));
        }

        let response = self
            .http_client
            .post(self.config.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| SynthesisError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error_msg = describe_error(status, &body);
            warn!(%status, "Speech synthesis request failed");
            return Err(if is_auth_failure(status) {
                SynthesisError::AuthenticationFailed(error_msg)
            } else {
                SynthesisError::ProviderError(error_msg)
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::NetworkError(format!("Failed to read audio: {e}")))?;
        if bytes.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        debug!(
            bytes = bytes.len(),
            voice = self.config.voice.as_str(),
            "Synthesized speech"
        );

        let format = self.config.response_format;
        Ok(AudioArtifact {
            bytes,
            mime_type: format.mime_type(),
            extension: format.as_str(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
