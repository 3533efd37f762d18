//! Reverse geocoding adapters

mod base;
pub mod nominatim;

use std::sync::Arc;

pub use base::{GeocodeError, ReverseGeocoder};
pub use nominatim::{NominatimConfig, NominatimGeocoder};

use crate::config::ServerConfig;

pub fn get_supported_geocoders() -> Vec<&'static str> {
    vec!["nominatim"]
}

/// Factory function to create a reverse geocoder by provider name
pub fn create_reverse_geocoder(
    provider: &str,
    config: &ServerConfig,
) -> Result<Arc<dyn ReverseGeocoder>, GeocodeError> {
    match provider.to_lowercase().as_str() {
        "nominatim" | "osm" => Ok(Arc::new(NominatimGeocoder::new(
            NominatimConfig::from_server_config(config),
        )?)),
        _ => Err(GeocodeError::ConfigurationError(format!(
            "Unsupported geocoder: {provider}. Supported providers: {}",
            get_supported_geocoders().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_needs_no_credentials() {
        let geocoder = create_reverse_geocoder("nominatim", &ServerConfig::default()).unwrap();
        assert_eq!(geocoder.provider_name(), "nominatim");
        assert!(create_reverse_geocoder("google", &ServerConfig::default()).is_err());
    }
}
