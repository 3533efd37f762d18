//! OpenAI Speech-to-Text (Whisper) API integration.
//!
//! - [`config`]: model selection, recording formats and provider settings
//! - [`messages`]: response types for the transcription API
//! - [`client`]: the [`OpenAITranscriber`] adapter

mod client;
mod config;
mod messages;

pub use client::OpenAITranscriber;
pub use config::{AudioInputFormat, MAX_FILE_SIZE_BYTES, OpenAISTTConfig, OpenAISTTModel};
pub use messages::TranscriptionResponse;

#[cfg(test)]
mod tests;
