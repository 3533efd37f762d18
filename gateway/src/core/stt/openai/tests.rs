//! Tests for the OpenAI transcription adapter: configuration, format
//! detection and the download/upload exchange against mock servers.

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::config::ServerConfig;
use crate::core::stt::{RecordingReference, Transcriber, TranscriptionError};

fn test_config(base_url: &str) -> OpenAISTTConfig {
    OpenAISTTConfig {
        api_key: "sk-test".to_string(),
        base_url: base_url.to_string(),
        model: OpenAISTTModel::Whisper1,
        language: None,
        max_file_size_bytes: MAX_FILE_SIZE_BYTES,
        request_timeout: Duration::from_secs(5),
        allow_private_hosts: true,
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_model_parsing() {
        assert_eq!(
            OpenAISTTModel::from_str_or_default("whisper-1"),
            OpenAISTTModel::Whisper1
        );
        assert_eq!(
            OpenAISTTModel::from_str_or_default("GPT-4o-mini-transcribe"),
            OpenAISTTModel::Gpt4oMiniTranscribe
        );
        assert_eq!(
            OpenAISTTModel::from_str_or_default("unknown"),
            OpenAISTTModel::Whisper1
        );
    }

    #[test]
    fn test_from_server_config() {
        let mut server = ServerConfig::default();
        server.openai_api_key = Some("sk-abc".to_string());
        server.openai_base_url = "http://127.0.0.1:9999/v1".to_string();
        server.adapter_timeout_seconds = 3;

        let config = OpenAISTTConfig::from_server_config(&server).unwrap();
        assert_eq!(config.api_key, "sk-abc");
        assert_eq!(
            config.api_url(),
            "http://127.0.0.1:9999/v1/audio/transcriptions"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(!config.allow_private_hosts);
    }

    #[test]
    fn test_validate_rejects_oversized_limit() {
        let mut config = test_config("http://localhost");
        config.max_file_size_bytes = MAX_FILE_SIZE_BYTES + 1;
        assert!(config.validate().is_err());
        config.api_key.clear();
        config.max_file_size_bytes = 1;
        assert_eq!(config.validate().unwrap_err(), "API key is required");
    }

    #[test]
    fn test_format_detection() {
        let url = url::Url::parse("https://media.example.org/rec/42.WAV?sig=1").unwrap();
        assert_eq!(AudioInputFormat::detect(None, &url), AudioInputFormat::Wav);
        assert_eq!(
            AudioInputFormat::detect(Some("audio/ogg; codecs=opus"), &url),
            AudioInputFormat::Ogg
        );

        let bare = url::Url::parse("https://media.example.org/rec/42").unwrap();
        assert_eq!(
            AudioInputFormat::detect(Some("application/octet-stream"), &bare),
            AudioInputFormat::Mp3
        );
    }
}

mod client_tests {
    use super::*;

    async fn mount_recording(server: &MockServer, body: &'static [u8], content_type: &str) {
        Mock::given(method("GET"))
            .and(path("/recordings/call-1.wav"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", content_type)
                    .set_body_bytes(body),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_transcribe_downloads_then_uploads() {
        let server = MockServer::start().await;
        mount_recording(&server, b"RIFF....WAVEfmt ", "audio/wav").await;

        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_string_contains("whisper-1"))
            .and(body_string_contains("recording.wav"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"text": "  Where is the nearest shelter?  "})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transcriber =
            OpenAITranscriber::new(test_config(&format!("{}/v1", server.uri()))).unwrap();
        let recording =
            RecordingReference::new(format!("{}/recordings/call-1.wav", server.uri())).unwrap();

        let transcript = transcriber.transcribe(&recording).await.unwrap();
        assert_eq!(transcript, "Where is the nearest shelter?");
    }

    #[tokio::test]
    async fn test_download_failure_skips_upload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "x"})))
            .expect(0)
            .mount(&server)
            .await;

        let transcriber =
            OpenAITranscriber::new(test_config(&format!("{}/v1", server.uri()))).unwrap();
        let recording =
            RecordingReference::new(format!("{}/recordings/missing.mp3", server.uri())).unwrap();

        let err = transcriber.transcribe(&recording).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::DownloadFailed(_)));
    }

    #[tokio::test]
    async fn test_auth_failure_is_classified() {
        let server = MockServer::start().await;
        mount_recording(&server, b"audio", "audio/wav").await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let transcriber =
            OpenAITranscriber::new(test_config(&format!("{}/v1", server.uri()))).unwrap();
        let recording =
            RecordingReference::new(format!("{}/recordings/call-1.wav", server.uri())).unwrap();

        match transcriber.transcribe(&recording).await {
            Err(TranscriptionError::AuthenticationFailed(msg)) => {
                assert!(msg.contains("Incorrect API key provided"));
            }
            other => panic!("expected authentication failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_transcript() {
        let server = MockServer::start().await;
        mount_recording(&server, b"audio", "audio/wav").await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "   "})))
            .mount(&server)
            .await;

        let transcriber =
            OpenAITranscriber::new(test_config(&format!("{}/v1", server.uri()))).unwrap();
        let recording =
            RecordingReference::new(format!("{}/recordings/call-1.wav", server.uri())).unwrap();

        assert!(matches!(
            transcriber.transcribe(&recording).await,
            Err(TranscriptionError::EmptyTranscript)
        ));
    }

    #[tokio::test]
    async fn test_private_recording_host_rejected_in_production() {
        let mut config = test_config("https://api.openai.com/v1");
        config.allow_private_hosts = false;
        let transcriber = OpenAITranscriber::new(config).unwrap();
        let recording = RecordingReference::new("https://192.168.1.20/rec.mp3").unwrap();

        assert!(matches!(
            transcriber.transcribe(&recording).await,
            Err(TranscriptionError::InvalidRecordingUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_oversized_recording_rejected() {
        let server = MockServer::start().await;
        mount_recording(&server, b"0123456789", "audio/wav").await;

        let mut config = test_config(&format!("{}/v1", server.uri()));
        config.max_file_size_bytes = 4;
        let transcriber = OpenAITranscriber::new(config).unwrap();
        let recording =
            RecordingReference::new(format!("{}/recordings/call-1.wav", server.uri())).unwrap();

        assert!(matches!(
            transcriber.transcribe(&recording).await,
            Err(TranscriptionError::DownloadFailed(msg)) if msg.contains("exceeds maximum file size")
        ));
    }

    #[tokio::test]
    async fn test_redirect_is_not_followed() {
        let server = MockServer::start().await;
        let internal = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recordings/call-1.wav"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/latest/meta-data", internal.uri())),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"secret".to_vec()))
            .expect(0)
            .mount(&internal)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "secret"})))
            .expect(0)
            .mount(&server)
            .await;

        let transcriber =
            OpenAITranscriber::new(test_config(&format!("{}/v1", server.uri()))).unwrap();
        let recording =
            RecordingReference::new(format!("{}/recordings/call-1.wav", server.uri())).unwrap();

        assert!(matches!(
            transcriber.transcribe(&recording).await,
            Err(TranscriptionError::DownloadFailed(msg)) if msg.contains("302")
        ));
    }

    /// Serves one chunked response with no Content-Length that never ends on
    /// its own; writing stops once the client hangs up.
    async fn endless_chunked_recording() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let head = "HTTP/1.1 200 OK\r\ncontent-type: audio/wav\r\ntransfer-encoding: chunked\r\n\r\n";
            if socket.write_all(head.as_bytes()).await.is_err() {
                return;
            }
            let mut chunk = b"400\r\n".to_vec();
            chunk.extend_from_slice(&[0u8; 1024]);
            chunk.extend_from_slice(b"\r\n");
            while socket.write_all(&chunk).await.is_ok() {}
        });

        format!("http://{addr}/recordings/call-1.wav")
    }

    #[tokio::test]
    async fn test_chunked_recording_stops_at_size_cap() {
        let api = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "x"})))
            .expect(0)
            .mount(&api)
            .await;

        let mut config = test_config(&format!("{}/v1", api.uri()));
        config.max_file_size_bytes = 8 * 1024;
        config.request_timeout = Duration::from_secs(30);
        let transcriber = OpenAITranscriber::new(config).unwrap();
        let recording = RecordingReference::new(endless_chunked_recording().await).unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            transcriber.transcribe(&recording),
        )
        .await
        .expect("download should stop at the size cap");

        assert!(matches!(
            result,
            Err(TranscriptionError::DownloadFailed(msg)) if msg.contains("exceeds maximum file size")
        ));
    }
}
