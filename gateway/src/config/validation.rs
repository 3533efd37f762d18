//! Configuration validation logic

use std::collections::BTreeMap;

use url::Url;

use super::TlsConfig;

pub(super) fn validate_port(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    if port == 0 {
        return Err("Server port must be non-zero".into());
    }
    Ok(())
}

pub(super) fn validate_tls(tls: &Option<TlsConfig>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(tls) = tls
        && (tls.cert_path.as_os_str().is_empty() || tls.key_path.as_os_str().is_empty())
    {
        return Err("TLS is enabled but certificate or key path is empty".into());
    }
    Ok(())
}

/// The public base URL ends up inside `<Play url=...>`, so it must be an
/// absolute http(s) URL the gateway can fetch.
pub(super) fn validate_public_base_url(
    url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(url) = url else {
        return Ok(());
    };

    let parsed = Url::parse(url).map_err(|e| format!("Invalid PUBLIC_BASE_URL '{url}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(format!("PUBLIC_BASE_URL must use http or https, got: {other}").into());
        }
    }
    if parsed.host_str().is_none() {
        return Err(format!("PUBLIC_BASE_URL '{url}' has no host").into());
    }
    Ok(())
}

pub(super) fn validate_adapter_timeout(seconds: u64) -> Result<(), Box<dyn std::error::Error>> {
    if seconds == 0 {
        return Err("Adapter timeout must be at least one second".into());
    }
    Ok(())
}

/// Facility codes are entered on a phone keypad
pub(super) fn validate_facilities(
    facilities: Option<&BTreeMap<String, String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(facilities) = facilities else {
        return Ok(());
    };

    for (code, text) in facilities {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Facility code '{code}' must be one or more keypad digits").into());
        }
        if text.trim().is_empty() {
            return Err(format!("Facility code '{code}' has an empty description").into());
        }
    }
    Ok(())
}
