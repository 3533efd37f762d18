//! Coordinate parsing for the voice location webhook and `LOCATION` texts

use crate::errors::DialogError;

/// Prefix that opens a location text message, single space included
pub const LOCATION_PREFIX: &str = "LOCATION ";

/// Decimal-degree position, finite and within range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

fn parse_degrees(
    name: &'static str,
    raw: Option<&str>,
    limit: f64,
) -> Result<f64, DialogError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DialogError::malformed(format!("{name} is missing")))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| DialogError::malformed(format!("{name} '{raw}' is not a number")))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(DialogError::malformed(format!(
            "{name} {raw} is outside [-{limit}, {limit}]"
        )));
    }
    Ok(value)
}

impl Coordinates {
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self, DialogError> {
        Ok(Self {
            latitude: parse_degrees("latitude", latitude, 90.0)?,
            longitude: parse_degrees("longitude", longitude, 180.0)?,
        })
    }

    /// `"lat,long"` with optional spaces around either value
    pub fn parse_pair(pair: &str) -> Result<Self, DialogError> {
        let (latitude, longitude) = pair
            .split_once(',')
            .ok_or_else(|| DialogError::malformed(format!("'{pair}' is not 'lat,long'")))?;
        if longitude.contains(',') {
            return Err(DialogError::malformed(format!(
                "'{pair}' has more than two values"
            )));
        }
        Self::parse(Some(latitude), Some(longitude))
    }
}

/// What an inbound text asks for
#[derive(Debug, Clone, PartialEq)]
pub enum SmsCommand {
    Location(Coordinates),
    /// Starts with the keyword but the coordinates do not parse
    MalformedLocation(String),
    Unrecognized,
}

impl SmsCommand {
    /// The text must start with exactly `LOCATION ` (case, position and the
    /// single space all matter). Whitespace around the coordinates is ignored.
    pub fn parse(text: &str) -> Self {
        let Some(rest) = text.strip_prefix(LOCATION_PREFIX) else {
            return Self::Unrecognized;
        };
        let rest = rest.trim();
        if rest.is_empty() {
            return Self::MalformedLocation("coordinates are missing".to_string());
        }
        match Coordinates::parse_pair(rest) {
            Ok(coordinates) => Self::Location(coordinates),
            Err(err) => Self::MalformedLocation(err.to_string()),
        }
    }
}
