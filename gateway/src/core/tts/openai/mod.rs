//! OpenAI text-to-speech adapter.

mod config;
mod provider;

pub use config::{AudioOutputFormat, OpenAITTSConfig, OpenAITTSModel, OpenAIVoice};
pub use provider::{MAX_INPUT_CHARS, OpenAITTS};

/// Speech endpoint, relative to the API root
pub const OPENAI_TTS_PATH: &str = "/audio/speech";
