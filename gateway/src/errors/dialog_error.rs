//! Errors raised while evaluating a dialog step
//!
//! None of these reach the caller verbatim: voice paths turn every
//! [`DialogError`] into the fixed apology directive and SMS paths into the
//! matching apology or format-instruction text. The `Display` output is for
//! operator logs.

use std::time::Duration;

use thiserror::Error;

use crate::core::{GeocodeError, GenerationError, SynthesisError, TranscriptionError};

/// Failure of one external collaborator
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("reverse geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("{adapter} did not respond within {after:?}")]
    Timeout {
        adapter: &'static str,
        after: Duration,
    },
}

impl AdapterError {
    /// Short adapter name for structured log fields
    pub fn adapter(&self) -> &'static str {
        match self {
            Self::Transcription(_) => "transcriber",
            Self::Generation(_) => "generator",
            Self::Synthesis(_) => "synthesizer",
            Self::Geocode(_) => "geocoder",
            Self::Timeout { adapter, .. } => adapter,
        }
    }
}

#[derive(Debug, Error)]
pub enum DialogError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Unparseable coordinates, missing required field
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl DialogError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}

macro_rules! impl_from_adapter_error {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for DialogError {
                fn from(err: $source) -> Self {
                    Self::Adapter(AdapterError::from(err))
                }
            }
        )*
    };
}

impl_from_adapter_error!(TranscriptionError, GenerationError, SynthesisError, GeocodeError);

pub type DialogResult<T> = Result<T, DialogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_errors_convert_into_dialog_errors() {
        let err: DialogError = GeocodeError::NetworkError("connection reset".to_string()).into();
        match err {
            DialogError::Adapter(adapter) => {
                assert_eq!(adapter.adapter(), "geocoder");
                assert!(adapter.to_string().contains("connection reset"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_timeout_display() {
        let err = AdapterError::Timeout {
            adapter: "synthesizer",
            after: Duration::from_secs(20),
        };
        assert_eq!(err.adapter(), "synthesizer");
        assert_eq!(err.to_string(), "synthesizer did not respond within 20s");
    }

    #[test]
    fn test_malformed_display() {
        assert_eq!(
            DialogError::malformed("latitude is missing").to_string(),
            "malformed input: latitude is missing"
        );
    }
}
