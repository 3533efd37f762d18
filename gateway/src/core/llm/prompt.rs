/// Query used when the caller asks for general disaster information
pub const CURRENT_DISASTERS_QUERY: &str = "Current disasters";

/// Prompt sent to the text generator for a disaster briefing.
///
/// ```
/// use hotline_gateway::core::llm::disaster_info_prompt;
///
/// assert_eq!(
///     disaster_info_prompt("Current disasters", Some("Nairobi, Kenya")),
///     "Provide disaster information for the following query: Current disasters in the area of Nairobi, Kenya"
/// );
/// ```
pub fn disaster_info_prompt(query: &str, location: Option<&str>) -> String {
    let mut prompt = format!("Provide disaster information for the following query: {query}");
    if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
        prompt.push_str(" in the area of ");
        prompt.push_str(location);
    }
    prompt
}
