use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("No address found for {latitude},{longitude}")]
    NoResult { latitude: f64, longitude: f64 },
}

/// Coordinates to human-readable address.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError>;

    fn provider_name(&self) -> &'static str;
}
