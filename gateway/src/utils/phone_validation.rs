use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("phone number is empty")]
    Empty,

    #[error("invalid phone number '{0}': expected E.164-like digits (for example +254711000000)")]
    Invalid(String),
}

/// Normalize a webhook-supplied phone number for SMS delivery.
///
/// Spaces, dashes and parentheses are dropped; the remainder must be an
/// optional `+` followed by 7 to 15 digits.
pub fn validate_phone_number(raw: &str) -> Result<String, PhoneNumberError> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if compact.is_empty() {
        return Err(PhoneNumberError::Empty);
    }

    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    if !(7..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PhoneNumberError::Invalid(raw.to_string()));
    }

    Ok(compact)
}
