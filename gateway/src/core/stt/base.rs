use async_trait::async_trait;
use thiserror::Error;

use crate::utils::UrlValidationError;

/// URL of a caller recording, valid only for the webhook exchange that
/// supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingReference {
    url: String,
}

impl RecordingReference {
    /// `None` for a missing or blank URL
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            url: trimmed.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Rejected recording URL: {0}")]
    InvalidRecordingUrl(#[from] UrlValidationError),

    #[error("Recording download failed: {0}")]
    DownloadFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Transcript was empty")]
    EmptyTranscript,
}

/// Speech-to-text for a caller recording.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Fetch the recording and return its transcript.
    async fn transcribe(&self, recording: &RecordingReference)
    -> Result<String, TranscriptionError>;

    fn provider_name(&self) -> &'static str;
}
