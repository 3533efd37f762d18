use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, warn};

use super::messages::ReverseResponse;
use crate::config::ServerConfig;
use crate::core::geocode::{GeocodeError, ReverseGeocoder};
use crate::core::providers::build_http_client;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl NominatimConfig {
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            base_url: config.geocoder_url.clone(),
            user_agent: config.geocoder_user_agent.clone(),
            request_timeout: config.adapter_timeout(),
        }
    }

    pub fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url.trim_end_matches('/'))
    }
}

pub struct NominatimGeocoder {
    config: NominatimConfig,
    http_client: Client,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        if config.user_agent.trim().is_empty() {
            return Err(GeocodeError::ConfigurationError(
                "Geocoder user agent must not be empty".to_string(),
            ));
        }
        let http_client = build_http_client(config.request_timeout).map_err(|e| {
            GeocodeError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeocodeError::InvalidCoordinates(format!(
                "{latitude},{longitude}"
            )));
        }

        let response = self
            .http_client
            .get(self.config.reverse_url())
            .header(USER_AGENT, &self.config.user_agent)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Reverse geocoding request failed");
            return Err(GeocodeError::ProviderError(format!(
                "Nominatim error ({status}): {body}"
            )));
        }

        let parsed: ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::ProviderError(format!("Failed to parse response: {e}")))?;

        match parsed.display_name.filter(|name| !name.trim().is_empty()) {
            Some(address) => {
                debug!(%address, "Reverse geocoded location");
                Ok(address)
            }
            None => {
                if let Some(error) = parsed.error {
                    debug!(%error, "Nominatim returned no address");
                }
                Err(GeocodeError::NoResult {
                    latitude,
                    longitude,
                })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "nominatim"
    }
}
