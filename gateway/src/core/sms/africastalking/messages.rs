//! Response types for the Africa's Talking messaging API.
//!
//! API Reference: https://developers.africastalking.com/docs/sms/sending/bulk

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    #[serde(rename = "SMSMessageData")]
    pub sms_message_data: SmsMessageData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmsMessageData {
    /// Summary line, e.g. "Sent to 1/1 Total Cost: KES 0.8000"
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "Recipients", default)]
    pub recipients: Vec<Recipient>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(default)]
    pub status_code: Option<u16>,
    pub number: String,
    pub status: String,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

impl Recipient {
    pub fn is_success(&self) -> bool {
        self.status == "Success"
    }
}
