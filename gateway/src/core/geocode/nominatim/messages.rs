//! Nominatim `/reverse` response (`format=jsonv2`).
//!
//! API Reference: https://nominatim.org/release-docs/develop/api/Reverse/

use serde::Deserialize;

/// Nominatim answers 200 with `{"error": "..."}` when nothing is nearby.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
