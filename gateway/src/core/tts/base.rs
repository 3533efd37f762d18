use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Synthesized speech, held in memory until the gateway fetches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub bytes: Bytes,
    pub mime_type: &'static str,
    /// File extension without the dot, used in the served URL
    pub extension: &'static str,
}

impl AudioArtifact {
    pub fn mp3(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: "audio/mpeg",
            extension: "mp3",
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid text: {0}")]
    InvalidText(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider returned no audio")]
    EmptyAudio,
}

/// Text-to-speech producing a complete audio file.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact, SynthesisError>;

    fn provider_name(&self) -> &'static str;
}
