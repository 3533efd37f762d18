//! Outbound SMS adapters
//!
//! Delivery is best-effort: callers log a [`SmsDeliveryError`] and move on.

pub mod africastalking;
mod base;

use std::sync::Arc;

pub use africastalking::{AfricasTalkingConfig, AfricasTalkingSms};
pub use base::{DeliveryStatus, SmsDeliveryError, SmsSender};

use crate::config::ServerConfig;

pub fn get_supported_sms_senders() -> Vec<&'static str> {
    vec!["africastalking"]
}

/// Factory function to create an SMS sender by provider name
pub fn create_sms_sender(
    provider: &str,
    config: &ServerConfig,
) -> Result<Arc<dyn SmsSender>, SmsDeliveryError> {
    match provider.to_lowercase().as_str() {
        "africastalking" | "africas-talking" | "at" => Ok(Arc::new(AfricasTalkingSms::new(
            AfricasTalkingConfig::from_server_config(config)?,
        )?)),
        _ => Err(SmsDeliveryError::ConfigurationError(format!(
            "Unsupported SMS provider: {provider}. Supported providers: {}",
            get_supported_sms_senders().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_requires_credentials() {
        let mut config = ServerConfig::default();
        assert!(matches!(
            create_sms_sender("africastalking", &config),
            Err(SmsDeliveryError::ConfigurationError(_))
        ));

        config.at_username = Some("sandbox".to_string());
        config.at_api_key = Some("at-key".to_string());
        let sender = create_sms_sender("AT", &config).unwrap();
        assert_eq!(sender.provider_name(), "africastalking");

        assert!(create_sms_sender("twilio", &config).is_err());
    }
}
