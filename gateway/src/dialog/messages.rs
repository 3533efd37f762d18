//! Fixed caller-facing text

pub const GREETING: &str = "Welcome to the emergency information system. For disaster information, press 1. To share your location, press 2. To speak your query, press 3.";
pub const LOCATION_INSTRUCTIONS: &str = "Please text your location to this number in the format: LOCATION latitude,longitude";
pub const RECORD_PROMPT: &str = "Please speak your query after the beep.";
pub const INVALID_OPTION: &str = "Invalid option. Goodbye.";
pub const FAREWELL: &str = "Thank you for calling. Goodbye!";
pub const MISSING_RECORDING_URL: &str =
    "Sorry, we couldn't process your request due to missing recording URL.";
pub const APOLOGY: &str =
    "An error occurred while processing your request. Please try again later.";
pub const SMS_FORMAT_INSTRUCTIONS: &str =
    "Invalid message format. To share your location, please send: LOCATION latitude,longitude";

/// Action the top-menu `<Gather>` posts to
pub const MENU_ACTION: &str = "/handle_menu";
pub const MENU_DIGITS: u32 = 1;
pub const RECORD_MAX_LENGTH_SECS: u32 = 30;
pub const RECORD_FINISH_KEY: &str = "#";

/// Reply text for a location query, voice and SMS alike
pub fn location_briefing(address: &str, info: &str) -> String {
    format!(
        "Based on your location at {address}, here's the current disaster information: {info}"
    )
}
