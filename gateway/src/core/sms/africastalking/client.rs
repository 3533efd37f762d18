use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use tracing::{info, warn};

use super::config::AfricasTalkingConfig;
use super::messages::SendMessageResponse;
use crate::core::providers::build_http_client;
use crate::core::sms::{DeliveryStatus, SmsDeliveryError, SmsSender};
use crate::utils::validate_phone_number;

/// Africa's Talking messaging API client.
pub struct AfricasTalkingSms {
    config: AfricasTalkingConfig,
    http_client: Client,
}

impl AfricasTalkingSms {
    pub fn new(config: AfricasTalkingConfig) -> Result<Self, SmsDeliveryError> {
        if config.username.is_empty() || config.api_key.is_empty() {
            return Err(SmsDeliveryError::ConfigurationError(
                "Africa's Talking username and API key are required".to_string(),
            ));
        }
        let http_client = build_http_client(config.request_timeout).map_err(|e| {
            SmsDeliveryError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn form<'a>(&'a self, to: &'a str, body: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut form = vec![
            ("username", self.config.username.as_str()),
            ("to", to),
            ("message", body),
        ];
        if let Some(sender_id) = &self.config.sender_id {
            form.push(("from", sender_id.as_str()));
        }
        form
    }
}

#[async_trait]
impl SmsSender for AfricasTalkingSms {
    async fn send(&self, to: &str, body: &str) -> Result<DeliveryStatus, SmsDeliveryError> {
        let recipient = validate_phone_number(to)?;
        if body.trim().is_empty() {
            return Err(SmsDeliveryError::EmptyMessage);
        }

        let response = self
            .http_client
            .post(self.config.messaging_url())
            .header("apiKey", &self.config.api_key)
            .header(ACCEPT, "application/json")
            .form(&self.form(&recipient, body))
            .send()
            .await
            .map_err(|e| SmsDeliveryError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| SmsDeliveryError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let error_msg = format!("Africa's Talking error ({status}): {response_text}");
            warn!(%status, "SMS request failed");
            return Err(if status == StatusCode::UNAUTHORIZED {
                SmsDeliveryError::AuthenticationFailed(error_msg)
            } else {
                SmsDeliveryError::ProviderError(error_msg)
            });
        }

        let parsed: SendMessageResponse = serde_json::from_str(&response_text).map_err(|e| {
            SmsDeliveryError::ProviderError(format!("Failed to parse response: {e}"))
        })?;

        let Some(result) = parsed.sms_message_data.recipients.into_iter().next() else {
            return Err(SmsDeliveryError::Rejected {
                recipient,
                status: parsed.sms_message_data.message,
            });
        };

        if !result.is_success() {
            return Err(SmsDeliveryError::Rejected {
                recipient: result.number,
                status: result.status,
            });
        }

        info!(
            recipient = %result.number,
            message_id = result.message_id.as_deref().unwrap_or("-"),
            "SMS accepted"
        );

        Ok(DeliveryStatus {
            recipient: result.number,
            status: result.status,
            message_id: result.message_id,
            cost: result.cost,
        })
    }

    fn provider_name(&self) -> &'static str {
        "africastalking"
    }
}
