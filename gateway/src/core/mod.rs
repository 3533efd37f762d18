pub mod audio_store;
pub mod facility;
pub mod geocode;
pub mod llm;
pub mod providers;
pub mod sms;
pub mod stt;
pub mod tts;

use std::sync::Arc;

pub use audio_store::{ArtifactRef, AudioStore};
pub use facility::{FacilityDirectory, FacilityLookup, INVALID_SELECTION};
pub use geocode::{GeocodeError, ReverseGeocoder, create_reverse_geocoder};
pub use llm::{GenerationError, TextGenerator, create_text_generator};
pub use sms::{DeliveryStatus, SmsDeliveryError, SmsSender, create_sms_sender};
pub use stt::{RecordingReference, Transcriber, TranscriptionError, create_transcriber};
pub use tts::{AudioArtifact, SpeechSynthesizer, SynthesisError, create_speech_synthesizer};

use crate::config::ServerConfig;

/// Provider names used when building adapters from configuration
pub const DEFAULT_TRANSCRIBER: &str = "openai";
pub const DEFAULT_TEXT_GENERATOR: &str = "openai";
pub const DEFAULT_SPEECH_SYNTHESIZER: &str = "openai";
pub const DEFAULT_GEOCODER: &str = "nominatim";
pub const DEFAULT_SMS_SENDER: &str = "africastalking";

/// The external collaborators the dialog engine calls out to.
#[derive(Clone)]
pub struct Adapters {
    pub transcriber: Arc<dyn Transcriber>,
    pub generator: Arc<dyn TextGenerator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub sms: Arc<dyn SmsSender>,
}

impl Adapters {
    /// Build the production adapters, failing on the first one that is
    /// misconfigured (e.g. a missing API key).
    pub fn from_config(config: &ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            transcriber: create_transcriber(DEFAULT_TRANSCRIBER, config)?,
            generator: create_text_generator(DEFAULT_TEXT_GENERATOR, config)?,
            synthesizer: create_speech_synthesizer(DEFAULT_SPEECH_SYNTHESIZER, config)?,
            geocoder: create_reverse_geocoder(DEFAULT_GEOCODER, config)?,
            sms: create_sms_sender(DEFAULT_SMS_SENDER, config)?,
        })
    }
}

impl std::fmt::Debug for Adapters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapters")
            .field("transcriber", &self.transcriber.provider_name())
            .field("generator", &self.generator.provider_name())
            .field("synthesizer", &self.synthesizer.provider_name())
            .field("geocoder", &self.geocoder.provider_name())
            .field("sms", &self.sms.provider_name())
            .finish()
    }
}
