use std::time::Duration;

use super::super::base::GenerationError;
use crate::config::ServerConfig;

/// Cap on completion length; briefings are read aloud
pub const DEFAULT_MAX_TOKENS: u32 = 200;

#[derive(Debug, Clone)]
pub struct OpenAILLMConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl OpenAILLMConfig {
    pub fn from_server_config(config: &ServerConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .get_api_key("openai")
            .map_err(GenerationError::ConfigurationError)?;
        let llm_config = Self {
            api_key,
            base_url: config.openai_base_url.clone(),
            model: config.openai_models.text_model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: config.adapter_timeout(),
        };
        llm_config
            .validate()
            .map_err(GenerationError::ConfigurationError)?;
        Ok(llm_config)
    }

    pub fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("API key is required".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("Model name is required".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}
