//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `voice` - Voice call webhooks (`/voice`, `/handle_menu`, `/recording`, `/location`)
//! - `sms` - Inbound SMS webhook
//! - `static_files` - Generated and fixed audio files

pub mod api;
pub mod sms;
pub mod static_files;
pub mod voice;

use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};

use crate::dialog::DialogResponse;
use crate::markup;
use crate::state::AppState;

/// Content type of every call-control document
pub const MARKUP_CONTENT_TYPE: &str = "text/xml";

/// Base URL the gateway should fetch generated audio from.
///
/// The configured public URL wins; otherwise it is rebuilt from the
/// `Host` and `X-Forwarded-Proto` headers of the webhook request.
pub fn request_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(url) = state.public_base_url() {
        return url.to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| matches!(*s, "http" | "https"))
        .unwrap_or("http");

    format!("{scheme}://{host}")
}

/// Render the directives of an evaluation as a `text/xml` response
pub fn markup_response(response: &DialogResponse) -> Response {
    (
        [(header::CONTENT_TYPE, MARKUP_CONTENT_TYPE)],
        markup::render(&response.directives),
    )
        .into_response()
}
