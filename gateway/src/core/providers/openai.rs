//! OpenAI REST error envelope, shared by the speech and text adapters
//!
//! API Reference: https://platform.openai.com/docs/guides/error-codes

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Error envelope returned by every OpenAI endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAIErrorResponse {
    pub error: OpenAIError,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAIError {
    /// Human-readable error message.
    pub message: String,

    /// Error type identifier.
    #[serde(rename = "type", default)]
    pub error_type: String,

    #[serde(default)]
    pub param: Option<String>,

    #[serde(default)]
    pub code: Option<String>,
}

impl std::fmt::Display for OpenAIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.error_type)
    }
}

/// Operator-facing description of a failed OpenAI call.
pub fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<OpenAIErrorResponse>(body) {
        Ok(response) => format!("OpenAI API error: {}", response.error),
        Err(_) => format!("OpenAI API error ({status}): {body}"),
    }
}

/// 401 and 403 mean the key is wrong, everything else is a provider fault
pub fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}
