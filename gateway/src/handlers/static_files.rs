use std::io::ErrorKind;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::json;
use tracing::{debug, error, info};

use crate::state::AppState;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

fn is_valid_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.contains("..")
        && !file_name.contains('/')
        && !file_name.contains('\\')
}

/// MIME type by file extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

fn audio_response(content_type: &str, body: Bytes) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    (StatusCode::OK, headers, body).into_response()
}

/// `GET /static/{filename}`
///
/// Generated audio is looked up in the artifact store first; anything else
/// is read from the configured static directory.
pub async fn serve_static(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
) -> Response {
    if !is_valid_file_name(&file_name) {
        error!(%file_name, "Rejected static file name");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid file name"})),
        )
            .into_response();
    }

    if let Some(artifact) = state.audio_store().get_by_file_name(&file_name).await {
        debug!(%file_name, bytes = artifact.len(), "Serving generated audio");
        return audio_response(artifact.mime_type, artifact.bytes.clone());
    }

    let path = state.static_dir.join(&file_name);
    match tokio::fs::read(&path).await {
        Ok(contents) => {
            debug!(path = %path.display(), "Serving static file");
            audio_response(content_type_for(&file_name), Bytes::from(contents))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(%file_name, "Static file not found");
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": format!("File not found: {file_name}")})),
            )
                .into_response()
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read static file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to read file"})),
            )
                .into_response()
        }
    }
}
