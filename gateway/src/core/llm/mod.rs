//! Text generation adapters
//!
//! A [`TextGenerator`] answers a single prompt. The production implementation
//! calls OpenAI chat completions.

mod base;
pub mod openai;
mod prompt;

use std::sync::Arc;

pub use base::{GenerationError, TextGenerator};
pub use openai::{OpenAIGenerator, OpenAILLMConfig};
pub use prompt::{CURRENT_DISASTERS_QUERY, disaster_info_prompt};

use crate::config::ServerConfig;

pub fn get_supported_text_generators() -> Vec<&'static str> {
    vec!["openai"]
}

/// Factory function to create a text generator by provider name
pub fn create_text_generator(
    provider: &str,
    config: &ServerConfig,
) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let llm_config = OpenAILLMConfig::from_server_config(config)?;
            Ok(Arc::new(OpenAIGenerator::new(llm_config)?))
        }
        _ => Err(GenerationError::ConfigurationError(format!(
            "Unsupported text provider: {provider}. Supported providers: {}",
            get_supported_text_generators().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory() {
        let mut config = ServerConfig::default();
        assert!(create_text_generator("openai", &config).is_err());

        config.openai_api_key = Some("sk-test".to_string());
        let generator = create_text_generator("openai", &config).unwrap();
        assert_eq!(generator.provider_name(), "openai");

        assert!(matches!(
            create_text_generator("anthropic", &config),
            Err(GenerationError::ConfigurationError(_))
        ));
    }
}
