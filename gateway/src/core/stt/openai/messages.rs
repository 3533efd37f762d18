//! Response types for the OpenAI Audio Transcription API.
//!
//! API Reference: https://platform.openai.com/docs/api-reference/audio/createTranscription

use serde::{Deserialize, Serialize};

/// `response_format=json` body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcription_response_ignores_extra_fields() {
        let json = r#"{"text": "Is there flooding near Kisumu?", "usage": {"seconds": 4}}"#;
        let response: TranscriptionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text, "Is there flooding near Kisumu?");
    }
}
