//! Text-to-speech adapters
//!
//! A [`SpeechSynthesizer`] turns reply text into an [`AudioArtifact`]. The
//! dialog engine stores the artifact and plays it back by URL.

mod base;
pub mod openai;

use std::sync::Arc;

pub use base::{AudioArtifact, SpeechSynthesizer, SynthesisError};
pub use openai::{
    AudioOutputFormat, OpenAITTS, OpenAITTSConfig, OpenAITTSModel, OpenAIVoice, OPENAI_TTS_PATH,
};

use crate::config::ServerConfig;

pub fn get_supported_speech_synthesizers() -> Vec<&'static str> {
    vec!["openai"]
}

/// Factory function to create a speech synthesizer by provider name
pub fn create_speech_synthesizer(
    provider: &str,
    config: &ServerConfig,
) -> Result<Arc<dyn SpeechSynthesizer>, SynthesisError> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let tts_config = OpenAITTSConfig::from_server_config(config)?;
            Ok(Arc::new(OpenAITTS::new(tts_config)?))
        }
        _ => Err(SynthesisError::ConfigurationError(format!(
            "Unsupported TTS provider: {provider}. Supported providers: {}",
            get_supported_speech_synthesizers().join(", ")
        ))),
    }
}
