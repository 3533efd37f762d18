use std::sync::Arc;

use axum::Form;
use axum::extract::{State, rejection::FormRejection};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IncomingSmsForm {
    pub text: Option<String>,
    pub from: Option<String>,
}

/// `POST /incoming_sms`
///
/// Replies go out through the SMS provider; the gateway only ever sees `OK`.
/// An unreadable body has no sender to reply to and is acknowledged as is.
pub async fn incoming_sms_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<IncomingSmsForm>, FormRejection>,
) -> &'static str {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Unreadable inbound SMS form, not replying"
            );
            return "OK";
        }
    };
    debug!(from = ?form.from, text = ?form.text, "Inbound SMS");

    let response = state
        .engine
        .incoming_sms(form.text.as_deref(), form.from.as_deref())
        .await;
    let delivered = state
        .engine
        .perform_side_effects(&response.side_effects)
        .await;
    info!(state = %response.state, delivered, "Inbound SMS answered");

    "OK"
}
