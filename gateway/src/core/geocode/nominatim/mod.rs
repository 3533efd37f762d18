//! OpenStreetMap Nominatim reverse geocoding.

mod client;
mod messages;

pub use client::{NominatimConfig, NominatimGeocoder};
pub use messages::ReverseResponse;
