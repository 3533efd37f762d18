//! OpenAI chat completions adapter.

mod client;
mod config;
mod messages;

pub use client::OpenAIGenerator;
pub use config::{DEFAULT_MAX_TOKENS, OpenAILLMConfig};
pub use messages::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
