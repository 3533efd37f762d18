use std::time::Duration;

use crate::config::ServerConfig;
use crate::core::sms::SmsDeliveryError;

/// Africa's Talking bulk messaging endpoint, relative to the API root
pub const MESSAGING_PATH: &str = "/version1/messaging";

#[derive(Debug, Clone)]
pub struct AfricasTalkingConfig {
    /// Application username (`sandbox` for the sandbox environment)
    pub username: String,
    pub api_key: String,
    /// Registered short code or alphanumeric sender id
    pub sender_id: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl AfricasTalkingConfig {
    pub fn from_server_config(config: &ServerConfig) -> Result<Self, SmsDeliveryError> {
        let (username, api_key) = config
            .get_africastalking_credentials()
            .map_err(SmsDeliveryError::ConfigurationError)?;
        Ok(Self {
            username,
            api_key,
            sender_id: config.at_sender_id.clone(),
            base_url: config.at_base_url.clone(),
            request_timeout: config.adapter_timeout(),
        })
    }

    pub fn messaging_url(&self) -> String {
        format!("{}{MESSAGING_PATH}", self.base_url.trim_end_matches('/'))
    }
}
