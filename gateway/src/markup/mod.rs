//! Gateway call-control markup
//!
//! The voice gateway drives a live call from an XML document returned by each
//! webhook:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?><Response>
//!   <Say>text</Say>
//!   <Play url="..."/>
//!   <Gather numDigits="N" action="path" method="POST"/>
//!   <Record maxLength="N" finishOnKey="K" playBeep="true"/>
//! </Response>
//! ```
//!
//! (shown indented; the rendered document has no whitespace between elements).
//!
//! - [`render`] serializes an ordered directive list, escaping `& < >` in
//!   text nodes and quotes as well in attribute values.
//! - [`parse`] reads the same grammar back into directives.

mod parse;
mod render;

pub use parse::{MarkupError, parse};
pub use render::{XML_DECLARATION, escape_text, escape_xml, render};

/// One instruction for the gateway to execute during a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Speak text with the gateway's built-in voice
    Say { text: String },
    /// Fetch and play an audio file
    Play { url: String },
    /// Collect DTMF digits and POST them to `action`
    Gather {
        num_digits: u32,
        action: String,
        method: String,
    },
    /// Record the caller after an optional beep
    Record {
        max_length: u32,
        finish_on_key: String,
        play_beep: bool,
    },
}

impl Directive {
    pub fn say(text: impl Into<String>) -> Self {
        Self::Say { text: text.into() }
    }

    pub fn play(url: impl Into<String>) -> Self {
        Self::Play { url: url.into() }
    }

    /// Single POST-back gather, the only form the hotline menus use
    pub fn gather(num_digits: u32, action: impl Into<String>) -> Self {
        Self::Gather {
            num_digits,
            action: action.into(),
            method: "POST".to_string(),
        }
    }

    pub fn record(max_length: u32, finish_on_key: impl Into<String>) -> Self {
        Self::Record {
            max_length,
            finish_on_key: finish_on_key.into(),
            play_beep: true,
        }
    }
}
