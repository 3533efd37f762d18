//! OpenAI STT (Whisper) client implementation.
//!
//! One transcription is two HTTP exchanges:
//!
//! 1. GET the caller recording from the URL the gateway supplied
//!    (after SSRF validation)
//! 2. POST it as multipart form data to `/audio/transcriptions`
//!
//! Both HTTP clients are built once and reused (connection pooling). The
//! download client never follows redirects and stops reading once the
//! recording passes the size cap.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use super::super::base::{RecordingReference, TranscriptionError, Transcriber};
use super::config::{AudioInputFormat, OpenAISTTConfig};
use super::messages::TranscriptionResponse;
use crate::core::providers::{build_download_client, build_http_client};
use crate::core::providers::openai::{describe_error, is_auth_failure};
use crate::utils::validate_recording_url;

/// A recording fetched from the gateway, ready for upload.
#[derive(Debug)]
pub(crate) struct DownloadedRecording {
    pub bytes: Bytes,
    pub format: AudioInputFormat,
}

pub struct OpenAITranscriber {
    config: OpenAISTTConfig,
    http_client: Client,
    download_client: Client,
}

impl OpenAITranscriber {
    pub fn new(config: OpenAISTTConfig) -> Result<Self, TranscriptionError> {
        config
            .validate()
            .map_err(TranscriptionError::ConfigurationError)?;

        let http_client = build_http_client(config.request_timeout).map_err(|e| {
            TranscriptionError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;
        let download_client = build_download_client(config.request_timeout).map_err(|e| {
            TranscriptionError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            config,
            http_client,
            download_client,
        })
    }

    pub fn config(&self) -> &OpenAISTTConfig {
        &self.config
    }

    pub(crate) async fn download(
        &self,
        recording: &RecordingReference,
    ) -> Result<DownloadedRecording, TranscriptionError> {
        let url = validate_recording_url(recording.url(), self.config.allow_private_hosts).await?;

        let mut response = self
            .download_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TranscriptionError::DownloadFailed(format!("Request failed: {e}")))?;

        let status = response.status();
        if status.is_redirection() {
            return Err(TranscriptionError::DownloadFailed(format!(
                "Recording server redirected ({status}); redirects are not followed"
            )));
        }
        if !status.is_success() {
            return Err(TranscriptionError::DownloadFailed(format!(
                "Recording server returned {status}"
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(length) = response.content_length()
            && length as usize > self.config.max_file_size_bytes
        {
            return Err(TranscriptionError::DownloadFailed(format!(
                "Recording ({length} bytes) exceeds maximum file size ({} bytes)",
                self.config.max_file_size_bytes
            )));
        }

        let limit = self.config.max_file_size_bytes;
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| TranscriptionError::DownloadFailed(format!("Failed to read body: {e}")))?
        {
            if body.len() + chunk.len() > limit {
                return Err(TranscriptionError::DownloadFailed(format!(
                    "Recording exceeds maximum file size ({limit} bytes)"
                )));
            }
            body.extend_from_slice(&chunk);
        }
        let bytes = body.freeze();

        if bytes.is_empty() {
            return Err(TranscriptionError::DownloadFailed(
                "Recording is empty".to_string(),
            ));
        }

        let format = AudioInputFormat::detect(content_type.as_deref(), &url);
        debug!(
            bytes = bytes.len(),
            format = format.extension(),
            "Downloaded caller recording"
        );

        Ok(DownloadedRecording { bytes, format })
    }

    pub(crate) async fn upload(
        &self,
        recording: DownloadedRecording,
    ) -> Result<String, TranscriptionError> {
        let file_part = Part::bytes(recording.bytes.to_vec())
            .file_name(format!("recording.{}", recording.format.extension()))
            .mime_str(recording.format.mime_type())
            .map_err(|e| TranscriptionError::ConfigurationError(format!("Invalid MIME type: {e}")))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("model", self.config.model.as_str().to_string())
            .text("response_format", "json".to_string());

        if let Some(language) = &self.config.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .http_client
            .post(self.config.api_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| TranscriptionError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let error_msg = describe_error(status, &response_text);
            warn!(%status, "Transcription request failed");
            return Err(if is_auth_failure(status) {
                TranscriptionError::AuthenticationFailed(error_msg)
            } else {
                TranscriptionError::ProviderError(error_msg)
            });
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&response_text).map_err(|e| {
            TranscriptionError::ProviderError(format!("Failed to parse response: {e}"))
        })?;

        let text = parsed.text.trim().to_string();
        if text.is_empty() {
            return Err(TranscriptionError::EmptyTranscript);
        }
        Ok(text)
    }
}

#[async_trait]
impl Transcriber for OpenAITranscriber {
    async fn transcribe(
        &self,
        recording: &RecordingReference,
    ) -> Result<String, TranscriptionError> {
        let downloaded = self.download(recording).await?;
        let transcript = self.upload(downloaded).await?;
        info!(
            characters = transcript.len(),
            model = %self.config.model,
            "Transcription complete"
        );
        Ok(transcript)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
