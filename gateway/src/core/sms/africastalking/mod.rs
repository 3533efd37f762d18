//! Africa's Talking SMS integration.

mod client;
mod config;
mod messages;

pub use client::AfricasTalkingSms;
pub use config::{AfricasTalkingConfig, MESSAGING_PATH};
pub use messages::{Recipient, SendMessageResponse, SmsMessageData};
