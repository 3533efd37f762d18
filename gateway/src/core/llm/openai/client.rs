use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use super::super::base::{GenerationError, TextGenerator};
use super::config::OpenAILLMConfig;
use super::messages::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::core::providers::build_http_client;
use crate::core::providers::openai::{describe_error, is_auth_failure};

/// OpenAI chat completions, one user message per prompt.
pub struct OpenAIGenerator {
    config: OpenAILLMConfig,
    http_client: Client,
}

impl OpenAIGenerator {
    pub fn new(config: OpenAILLMConfig) -> Result<Self, GenerationError> {
        config
            .validate()
            .map_err(GenerationError::ConfigurationError)?;
        let http_client = build_http_client(config.request_timeout).map_err(|e| {
            GenerationError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .http_client
            .post(self.config.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| GenerationError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let error_msg = describe_error(status, &response_text);
            warn!(%status, "Chat completion request failed");
            return Err(if is_auth_failure(status) {
                GenerationError::AuthenticationFailed(error_msg)
            } else {
                GenerationError::ProviderError(error_msg)
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| GenerationError::ProviderError(format!("Failed to parse response: {e}")))?;

        let text = parsed.first_text().ok_or(GenerationError::EmptyResponse)?;
        info!(
            characters = text.len(),
            model = %self.config.model,
            "Generated disaster briefing"
        );
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
