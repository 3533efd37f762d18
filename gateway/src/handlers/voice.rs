//! Voice call webhooks
//!
//! The gateway posts form-encoded fields and executes whatever markup comes
//! back. Adapter failures and unreadable form posts never surface as HTTP
//! errors: the caller always hears something.

use std::sync::Arc;

use axum::extract::{State, rejection::FormRejection};
use axum::{Form, http::HeaderMap, response::Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{markup_response, request_base_url};
use crate::dialog::messages::APOLOGY;
use crate::dialog::{CallSession, DialogResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct VoiceForm {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<String>,
    #[serde(rename = "dtmfDigits")]
    pub dtmf_digits: Option<String>,
    #[serde(rename = "callerNumber")]
    pub caller_number: Option<String>,
}

impl VoiceForm {
    pub fn call_session(&self) -> CallSession {
        CallSession {
            session_id: self.session_id.clone(),
            is_active: is_active_flag(self.is_active.as_deref()),
            caller_number: self.caller_number.clone(),
        }
    }
}

/// The gateway reports a live call as `"1"`; anything else, or nothing,
/// means the call has ended.
fn is_active_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuForm {
    #[serde(rename = "dtmfDigits")]
    pub dtmf_digits: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordingForm {
    #[serde(rename = "recordingUrl")]
    pub recording_url: Option<String>,
    #[serde(rename = "callerNumber")]
    pub caller_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationForm {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Unwrap the form, or answer with the spoken apology when the body could
/// not be read (wrong content type, undecodable fields).
fn webhook_form<T>(
    route: &'static str,
    form: Result<Form<T>, FormRejection>,
) -> Result<T, Response> {
    form.map(|Form(form)| form).map_err(|rejection| {
        warn!(
            route,
            status = %rejection.status(),
            error = %rejection.body_text(),
            "Unreadable webhook form"
        );
        markup_response(&DialogResponse::say_and_end(APOLOGY))
    })
}

/// Run side effects, then hand the markup back to the gateway
async fn respond(state: &AppState, route: &'static str, response: DialogResponse) -> Response {
    if !response.side_effects.is_empty() {
        let delivered = state
            .engine
            .perform_side_effects(&response.side_effects)
            .await;
        debug!(
            route,
            requested = response.side_effects.len(),
            delivered,
            "Side effects completed"
        );
    }
    info!(route, state = %response.state, "Webhook answered");
    markup_response(&response)
}

/// `POST /voice`
pub async fn voice_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<VoiceForm>, FormRejection>,
) -> Result<Response, Response> {
    let form = webhook_form("voice", form)?;
    debug!(
        session_id = ?form.session_id,
        is_active = ?form.is_active,
        dtmf_digits = ?form.dtmf_digits,
        caller_number = ?form.caller_number,
        "Voice webhook"
    );

    let base_url = request_base_url(&state, &headers);
    let call = form.call_session();
    let response = state
        .engine
        .voice(&call, form.dtmf_digits.as_deref(), &base_url)
        .await;
    Ok(respond(&state, "voice", response).await)
}

/// `POST /handle_menu`
pub async fn handle_menu_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<MenuForm>, FormRejection>,
) -> Result<Response, Response> {
    let form = webhook_form("handle_menu", form)?;
    debug!(dtmf_digits = ?form.dtmf_digits, "Menu webhook");

    let response = state.engine.handle_menu(form.dtmf_digits.as_deref()).await;
    Ok(respond(&state, "handle_menu", response).await)
}

/// `POST /recording`
pub async fn recording_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<RecordingForm>, FormRejection>,
) -> Result<Response, Response> {
    let form = webhook_form("recording", form)?;
    info!(
        recording_url = ?form.recording_url,
        caller_number = ?form.caller_number,
        "Recording webhook"
    );

    let base_url = request_base_url(&state, &headers);
    let response = state
        .engine
        .recording(form.recording_url.as_deref(), &base_url)
        .await;
    Ok(respond(&state, "recording", response).await)
}

/// `POST /location`
pub async fn location_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LocationForm>, FormRejection>,
) -> Result<Response, Response> {
    let form = webhook_form("location", form)?;
    debug!(latitude = ?form.latitude, longitude = ?form.longitude, "Location webhook");

    let response = state
        .engine
        .location(form.latitude.as_deref(), form.longitude.as_deref())
        .await;
    Ok(respond(&state, "location", response).await)
}
