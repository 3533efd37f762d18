//! Hotline call flow
//!
//! The gateway drives each call through a handful of webhooks. Each one is
//! evaluated in isolation by [`DialogEngine`], which returns the directives to
//! render and any side effects (outbound SMS) to run afterwards.
//!
//! ```text
//! /voice (no digits)  -> greeting + Gather -> /handle_menu
//! /handle_menu 1      -> disaster briefing
//! /handle_menu 2      -> "text LOCATION lat,long"  -> /incoming_sms
//! /handle_menu 3      -> Record                    -> /recording
//! /voice (digits)     -> facility audio + SMS
//! /location           -> location briefing
//! ```

mod engine;
pub mod location;
pub mod messages;
mod types;

pub use engine::DialogEngine;
pub use location::{Coordinates, SmsCommand};
pub use types::{CallSession, DialogResponse, DialogState, DtmfInput, MenuDepth, SideEffect};
