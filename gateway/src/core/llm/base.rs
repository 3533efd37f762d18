use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

/// Prompt-in, text-out completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a trimmed, non-empty reply for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    fn provider_name(&self) -> &'static str;
}
