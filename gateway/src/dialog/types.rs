use crate::markup::Directive;

/// Conceptual call-flow position reached by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogState {
    /// Greeting played, waiting for the top-menu digit
    Greeting,
    /// A top-menu option was answered directly
    TopMenu,
    /// Facility description played and texted to the caller
    FacilitySelected,
    /// Caller is being recorded
    AwaitingRecording,
    /// Recorded query answered with synthesized audio
    RecordingReceived,
    /// Location reply delivered by voice or SMS
    LocationShared,
    /// Nothing further will be prompted on this call
    Terminated,
}

impl DialogState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::TopMenu => "top_menu",
            Self::FacilitySelected => "facility_selected",
            Self::AwaitingRecording => "awaiting_recording",
            Self::RecordingReceived => "recording_received",
            Self::LocationShared => "location_shared",
            Self::Terminated => "terminated",
        }
    }
}

impl std::fmt::Display for DialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which menu a DTMF digit answers. Assigned from the webhook route, never
/// inferred from which fields happen to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuDepth {
    /// `/handle_menu`: 1 = disaster info, 2 = location instructions, 3 = record
    TopLevel,
    /// `/voice`: digit is a facility code
    FacilitySelection,
}

/// Per-webhook call fields; nothing is kept between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSession {
    pub session_id: Option<String>,
    pub is_active: bool,
    pub caller_number: Option<String>,
}

impl CallSession {
    pub fn active(caller_number: Option<String>) -> Self {
        Self {
            session_id: None,
            is_active: true,
            caller_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtmfInput {
    pub digits: String,
    pub depth: MenuDepth,
}

impl DtmfInput {
    /// `None` when the gateway sent no digits
    pub fn new(digits: Option<&str>, depth: MenuDepth) -> Option<Self> {
        let digits = digits?.trim();
        if digits.is_empty() {
            return None;
        }
        Some(Self {
            digits: digits.to_string(),
            depth,
        })
    }
}

/// Requested out-of-band action, run after the markup is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    SendSms { to: String, body: String },
}

/// Outcome of one dialog evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogResponse {
    pub state: DialogState,
    pub directives: Vec<Directive>,
    pub side_effects: Vec<SideEffect>,
}

impl DialogResponse {
    pub fn new(state: DialogState, directives: Vec<Directive>) -> Self {
        Self {
            state,
            directives,
            side_effects: Vec::new(),
        }
    }

    /// A single `<Say>` that ends the call
    pub fn say_and_end(text: impl Into<String>) -> Self {
        Self::new(DialogState::Terminated, vec![Directive::say(text)])
    }

    pub fn with_sms(mut self, to: impl Into<String>, body: impl Into<String>) -> Self {
        self.side_effects.push(SideEffect::SendSms {
            to: to.into(),
            body: body.into(),
        });
        self
    }

    /// Response for the SMS channel: no markup, one reply message
    pub fn sms_reply(state: DialogState, to: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(state, Vec::new()).with_sms(to, body)
    }
}
