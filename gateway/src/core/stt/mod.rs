//! Speech-to-text adapters
//!
//! A [`Transcriber`] turns a caller [`RecordingReference`] into text. The
//! production implementation downloads the recording and uploads it to the
//! OpenAI audio transcription API.

mod base;
pub mod openai;

use std::sync::Arc;

pub use base::{RecordingReference, TranscriptionError, Transcriber};
pub use openai::{OpenAISTTConfig, OpenAITranscriber};

use crate::config::ServerConfig;

/// Names accepted by [`create_transcriber`]
pub fn get_supported_transcribers() -> Vec<&'static str> {
    vec!["openai"]
}

/// Factory function to create a transcriber by provider name
///
/// # Examples
/// ```rust,no_run
/// use hotline_gateway::config::ServerConfig;
/// use hotline_gateway::core::stt::create_transcriber;
///
/// let config = ServerConfig::from_env().unwrap();
/// let transcriber = create_transcriber("openai", &config).unwrap();
/// assert_eq!(transcriber.provider_name(), "openai");
/// ```
pub fn create_transcriber(
    provider: &str,
    config: &ServerConfig,
) -> Result<Arc<dyn Transcriber>, TranscriptionError> {
    match provider.to_lowercase().as_str() {
        "openai" | "whisper" => {
            let stt_config = OpenAISTTConfig::from_server_config(config)?;
            Ok(Arc::new(OpenAITranscriber::new(stt_config)?))
        }
        _ => Err(TranscriptionError::ConfigurationError(format!(
            "Unsupported STT provider: {provider}. Supported providers: {}",
            get_supported_transcribers().join(", ")
        ))),
    }
}
