//! Telephony gateway webhook routes
//!
//! # Endpoints
//!
//! - `POST /voice` - call start and facility selection
//! - `POST /handle_menu` - top-level menu digit
//! - `POST /recording` - recorded caller query
//! - `POST /location` - location shared during a call
//! - `POST /incoming_sms` - inbound text message, answered by SMS
//! - `GET /static/{filename}` - generated and fixed audio
//!
//! The gateway calls these unauthenticated; rate limiting is applied in
//! `main.rs` together with the other global layers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{sms, static_files, voice};
use crate::state::AppState;
use std::sync::Arc;

pub fn create_webhook_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voice", post(voice::voice_handler))
        .route("/handle_menu", post(voice::handle_menu_handler))
        .route("/recording", post(voice::recording_handler))
        .route("/location", post(voice::location_handler))
        .route("/incoming_sms", post(sms::incoming_sms_handler))
        .route("/static/{filename}", get(static_files::serve_static))
        .layer(TraceLayer::new_for_http())
}
