use async_trait::async_trait;
use thiserror::Error;

use crate::utils::PhoneNumberError;

/// Provider acknowledgement for one accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub recipient: String,
    pub status: String,
    pub message_id: Option<String>,
    pub cost: Option<String>,
}

#[derive(Debug, Error)]
pub enum SmsDeliveryError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(#[from] PhoneNumberError),

    #[error("Message body is empty")]
    EmptyMessage,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Message to {recipient} was not accepted: {status}")]
    Rejected { recipient: String, status: String },
}

/// Outbound SMS dispatch.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<DeliveryStatus, SmsDeliveryError>;

    fn provider_name(&self) -> &'static str;
}
