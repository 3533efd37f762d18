use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::location::{Coordinates, SmsCommand};
use super::messages::{
    APOLOGY, FAREWELL, GREETING, INVALID_OPTION, LOCATION_INSTRUCTIONS, MENU_ACTION, MENU_DIGITS,
    MISSING_RECORDING_URL, RECORD_FINISH_KEY, RECORD_MAX_LENGTH_SECS, RECORD_PROMPT,
    SMS_FORMAT_INSTRUCTIONS, location_briefing,
};
use super::types::{CallSession, DialogResponse, DialogState, DtmfInput, MenuDepth, SideEffect};
use crate::core::llm::{CURRENT_DISASTERS_QUERY, disaster_info_prompt};
use crate::core::{Adapters, AudioStore, FacilityDirectory, FacilityLookup, RecordingReference};
use crate::errors::{AdapterError, DialogError, DialogResult};
use crate::markup::Directive;

/// Evaluates one webhook at a time against the hotline call flow.
///
/// Holds no per-call state: everything needed for the next step arrives in
/// the webhook fields. Every adapter call is bounded by `adapter_timeout`.
pub struct DialogEngine {
    adapters: Adapters,
    facilities: FacilityDirectory,
    audio_store: AudioStore,
    adapter_timeout: Duration,
}

impl DialogEngine {
    pub fn new(
        adapters: Adapters,
        facilities: FacilityDirectory,
        audio_store: AudioStore,
        adapter_timeout: Duration,
    ) -> Self {
        Self {
            adapters,
            facilities,
            audio_store,
            adapter_timeout,
        }
    }

    pub fn facilities(&self) -> &FacilityDirectory {
        &self.facilities
    }

    pub fn audio_store(&self) -> &AudioStore {
        &self.audio_store
    }

    /// Entry point for `/voice`.
    ///
    /// Digits arriving here are facility codes; the top-level menu is
    /// answered by [`handle_menu`](Self::handle_menu).
    pub async fn voice(
        &self,
        call: &CallSession,
        digits: Option<&str>,
        base_url: &str,
    ) -> DialogResponse {
        if !call.is_active {
            return DialogResponse::say_and_end(FAREWELL);
        }

        match DtmfInput::new(digits, MenuDepth::FacilitySelection) {
            None => DialogResponse::new(
                DialogState::Greeting,
                vec![
                    Directive::say(GREETING),
                    Directive::gather(MENU_DIGITS, MENU_ACTION),
                ],
            ),
            Some(input) => self.handle_dtmf(call, &input, base_url).await,
        }
    }

    /// Entry point for `/handle_menu`
    pub async fn handle_menu(&self, digits: Option<&str>) -> DialogResponse {
        match DtmfInput::new(digits, MenuDepth::TopLevel) {
            Some(input) => self.top_menu(&input.digits).await,
            None => DialogResponse::say_and_end(INVALID_OPTION),
        }
    }

    /// Interpret digits according to their menu depth
    pub async fn handle_dtmf(
        &self,
        call: &CallSession,
        input: &DtmfInput,
        base_url: &str,
    ) -> DialogResponse {
        match input.depth {
            MenuDepth::TopLevel => self.top_menu(&input.digits).await,
            MenuDepth::FacilitySelection => {
                self.select_facility(call, &input.digits, base_url).await
            }
        }
    }

    async fn top_menu(&self, digits: &str) -> DialogResponse {
        match digits {
            "1" => match self.disaster_info(None).await {
                Ok(info) => DialogResponse::new(DialogState::TopMenu, vec![Directive::say(info)]),
                Err(err) => self.recover("handle_menu", err),
            },
            "2" => DialogResponse::new(
                DialogState::TopMenu,
                vec![Directive::say(LOCATION_INSTRUCTIONS)],
            ),
            "3" => DialogResponse::new(
                DialogState::AwaitingRecording,
                vec![
                    Directive::say(RECORD_PROMPT),
                    Directive::record(RECORD_MAX_LENGTH_SECS, RECORD_FINISH_KEY),
                ],
            ),
            other => {
                debug!(digits = %other, "Unrecognized top menu option");
                DialogResponse::say_and_end(INVALID_OPTION)
            }
        }
    }

    async fn select_facility(
        &self,
        call: &CallSession,
        code: &str,
        base_url: &str,
    ) -> DialogResponse {
        let text = match self.facilities.lookup(code) {
            FacilityLookup::Found(text) => text,
            FacilityLookup::NotFound => {
                debug!(code = %code, "Unknown facility code");
                return DialogResponse::say_and_end(FacilityLookup::NotFound.text());
            }
        };

        let play = match self.speak(text, base_url).await {
            Ok(directive) => directive,
            Err(err) => return self.recover("voice", err),
        };

        let response = DialogResponse::new(DialogState::FacilitySelected, vec![play]);
        match call.caller_number.as_deref().map(str::trim) {
            Some(caller) if !caller.is_empty() => response.with_sms(caller, text),
            _ => {
                warn!(
                    session_id = call.session_id.as_deref().unwrap_or("-"),
                    "No caller number, facility details not texted"
                );
                response
            }
        }
    }

    /// Entry point for `/recording`: transcribe, answer, and play the answer
    /// back as synthesized audio.
    pub async fn recording(&self, recording_url: Option<&str>, base_url: &str) -> DialogResponse {
        let Some(recording) = recording_url.and_then(RecordingReference::new) else {
            error!("No recording URL received");
            return DialogResponse::say_and_end(MISSING_RECORDING_URL);
        };

        match self.answer_recording(&recording, base_url).await {
            Ok(play) => DialogResponse::new(DialogState::RecordingReceived, vec![play]),
            Err(err) => self.recover("recording", err),
        }
    }

    async fn answer_recording(
        &self,
        recording: &RecordingReference,
        base_url: &str,
    ) -> DialogResult<Directive> {
        let transcript = self
            .bounded("transcriber", self.adapters.transcriber.transcribe(recording))
            .await?;
        info!(characters = transcript.len(), "Caller query transcribed");

        let answer = self
            .bounded("generator", self.adapters.generator.generate(&transcript))
            .await?;

        self.speak(&answer, base_url).await
    }

    /// Entry point for the voice `/location` webhook
    pub async fn location(&self, latitude: Option<&str>, longitude: Option<&str>) -> DialogResponse {
        let result = match Coordinates::parse(latitude, longitude) {
            Ok(coordinates) => self.locate_and_brief(coordinates).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(message) => {
                DialogResponse::new(DialogState::LocationShared, vec![Directive::say(message)])
            }
            Err(err) => self.recover("location", err),
        }
    }

    /// Entry point for `/incoming_sms`. Replies go out as side effects only.
    pub async fn incoming_sms(&self, text: Option<&str>, from: Option<&str>) -> DialogResponse {
        let Some(sender) = from.map(str::trim).filter(|s| !s.is_empty()) else {
            warn!("Inbound SMS without sender, not replying");
            return DialogResponse::new(DialogState::Terminated, Vec::new());
        };

        match SmsCommand::parse(text.unwrap_or_default()) {
            SmsCommand::Location(coordinates) => match self.locate_and_brief(coordinates).await {
                Ok(message) => {
                    DialogResponse::sms_reply(DialogState::LocationShared, sender, message)
                }
                Err(err) => {
                    log_failure("incoming_sms", &err);
                    DialogResponse::sms_reply(DialogState::Terminated, sender, APOLOGY)
                }
            },
            SmsCommand::MalformedLocation(reason) => {
                debug!(%reason, "Malformed LOCATION message");
                DialogResponse::sms_reply(DialogState::Terminated, sender, SMS_FORMAT_INSTRUCTIONS)
            }
            SmsCommand::Unrecognized => {
                DialogResponse::sms_reply(DialogState::Terminated, sender, SMS_FORMAT_INSTRUCTIONS)
            }
        }
    }

    /// Reverse-geocode a position and brief the caller on disasters there.
    /// Shared by the voice and SMS location paths.
    pub async fn locate_and_brief(&self, coordinates: Coordinates) -> DialogResult<String> {
        let address = self
            .bounded(
                "geocoder",
                self.adapters
                    .geocoder
                    .reverse(coordinates.latitude, coordinates.longitude),
            )
            .await?;
        let info = self.disaster_info(Some(&address)).await?;
        Ok(location_briefing(&address, &info))
    }

    pub async fn disaster_info(&self, location: Option<&str>) -> DialogResult<String> {
        let prompt = disaster_info_prompt(CURRENT_DISASTERS_QUERY, location);
        self.bounded("generator", self.adapters.generator.generate(&prompt))
            .await
    }

    /// Synthesize `text`, store it and return the `<Play>` for it
    async fn speak(&self, text: &str, base_url: &str) -> DialogResult<Directive> {
        let artifact = self
            .bounded("synthesizer", self.adapters.synthesizer.synthesize(text))
            .await?;
        let reference = self.audio_store.insert(artifact).await;
        Ok(Directive::play(reference.url(base_url)))
    }

    /// Run requested side effects. Delivery failures are logged and
    /// swallowed; returns how many were delivered.
    pub async fn perform_side_effects(&self, effects: &[SideEffect]) -> usize {
        let mut delivered = 0;
        for effect in effects {
            match effect {
                SideEffect::SendSms { to, body } => {
                    let sent =
                        tokio::time::timeout(self.adapter_timeout, self.adapters.sms.send(to, body))
                            .await;
                    match sent {
                        Ok(Ok(status)) => {
                            debug!(recipient = %status.recipient, "SMS delivered");
                            delivered += 1;
                        }
                        Ok(Err(err)) => error!(error = %err, "Failed to send SMS"),
                        Err(_) => error!(
                            after = ?self.adapter_timeout,
                            "SMS provider did not respond in time"
                        ),
                    }
                }
            }
        }
        delivered
    }

    async fn bounded<T, E>(
        &self,
        adapter: &'static str,
        call: impl Future<Output = Result<T, E>>,
    ) -> DialogResult<T>
    where
        AdapterError: From<E>,
    {
        match tokio::time::timeout(self.adapter_timeout, call).await {
            Ok(result) => result.map_err(|e| DialogError::Adapter(AdapterError::from(e))),
            Err(_) => Err(DialogError::Adapter(AdapterError::Timeout {
                adapter,
                after: self.adapter_timeout,
            })),
        }
    }

    fn recover(&self, route: &'static str, err: DialogError) -> DialogResponse {
        log_failure(route, &err);
        DialogResponse::say_and_end(APOLOGY)
    }
}

fn log_failure(route: &'static str, err: &DialogError) {
    match err {
        DialogError::Adapter(adapter_err) => error!(
            route,
            adapter = adapter_err.adapter(),
            error = %adapter_err,
            "Adapter call failed"
        ),
        DialogError::MalformedInput(reason) => {
            warn!(route, %reason, "Rejected malformed webhook input")
        }
    }
}
