//! Test Fixtures Module
//!
//! In-memory adapters and request helpers shared by the router tests.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};

use hotline_gateway::core::{
    Adapters, AudioArtifact, DeliveryStatus, GenerationError, GeocodeError, RecordingReference,
    ReverseGeocoder, SmsDeliveryError, SmsSender, SpeechSynthesizer, SynthesisError,
    TextGenerator, Transcriber, TranscriptionError,
};
use hotline_gateway::{ServerConfig, routes, state::AppState};

pub const TRANSCRIPT: &str = "Where is the nearest shelter?";
pub const GENERATED: &str = "Flooding reported near the river; move to higher ground.";
pub const ADDRESS: &str = "Kenyatta Avenue, Nairobi, Kenya";

/// Records every call and answers with fixed values
#[derive(Default)]
pub struct RecordingAdapters {
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    pub coordinates: Mutex<Vec<(f64, f64)>>,
    pub sent_sms: Mutex<Vec<(String, String)>>,
    /// Address returned by the geocoder, `ADDRESS` when unset
    pub address: Option<String>,
    pub fail_generation: bool,
}

impl RecordingAdapters {
    pub fn adapters(self: &Arc<Self>) -> Adapters {
        Adapters {
            transcriber: self.clone(),
            generator: self.clone(),
            synthesizer: self.clone(),
            geocoder: self.clone(),
            sms: self.clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent_sms(&self) -> Vec<(String, String)> {
        self.sent_sms.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for RecordingAdapters {
    async fn transcribe(
        &self,
        _recording: &RecordingReference,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TRANSCRIPT.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "fixture"
    }
}

#[async_trait]
impl TextGenerator for RecordingAdapters {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail_generation {
            return Err(GenerationError::ProviderError("quota exceeded".to_string()));
        }
        Ok(GENERATED.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "fixture"
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingAdapters {
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AudioArtifact::mp3(format!("MP3:{text}").into_bytes()))
    }

    fn provider_name(&self) -> &'static str {
        "fixture"
    }
}

#[async_trait]
impl ReverseGeocoder for RecordingAdapters {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.coordinates.lock().unwrap().push((latitude, longitude));
        Ok(self.address.clone().unwrap_or_else(|| ADDRESS.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "fixture"
    }
}

#[async_trait]
impl SmsSender for RecordingAdapters {
    async fn send(&self, to: &str, body: &str) -> Result<DeliveryStatus, SmsDeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent_sms
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(DeliveryStatus {
            recipient: to.to_string(),
            status: "Success".to_string(),
            message_id: None,
            cost: None,
        })
    }

    fn provider_name(&self) -> &'static str {
        "fixture"
    }
}

/// Full application router around the given adapters
pub fn app(config: ServerConfig, fixture: &Arc<RecordingAdapters>) -> Router {
    let state = AppState::with_adapters(config, fixture.adapters());
    routes::api::create_api_router()
        .merge(routes::webhooks::create_webhook_router())
        .with_state(state)
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("host", "hotline.test")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", "hotline.test")
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Extract the `url` attribute of the single `<Play>` in a document
pub fn play_url(document: &str) -> String {
    let start = document.find("<Play url=\"").expect("no Play directive") + "<Play url=\"".len();
    let end = document[start..].find('"').unwrap() + start;
    document[start..end].to_string()
}
