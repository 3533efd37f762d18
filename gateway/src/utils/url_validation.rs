//! Recording URL validation
//!
//! The gateway hands us a recording URL which we then fetch server-side, so
//! the URL is checked before any request is made:
//! - scheme must be HTTPS (HTTP only when private hosts are allowed)
//! - a host must be present
//! - neither a literal IP nor any resolved address may be private/internal

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use thiserror::Error;
use tracing::warn;
use url::{Host, Url};

#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL resolves to private/internal IP address: {0}")]
    PrivateIpDetected(IpAddr),

    #[error("Failed to resolve hostname: {0}")]
    DnsResolutionFailed(String),
}

/// Loopback, RFC 1918, link-local, broadcast, unspecified, documentation,
/// CGNAT (100.64.0.0/10) and benchmarking (198.18.0.0/15) ranges.
pub fn is_private_ipv4(ip: &Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_unspecified()
        || ip.is_documentation()
        || (a == 100 && (b & 0xC0) == 64)
        || (a == 198 && (b == 18 || b == 19))
}

/// Loopback, unspecified, link-local (fe80::/10), unique local (fc00::/7),
/// documentation (2001:db8::/32) and IPv4-mapped private addresses.
pub fn is_private_ipv6(ip: &Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }
    let segments = ip.segments();
    if segments[0] & 0xFFC0 == 0xFE80
        || segments[0] & 0xFE00 == 0xFC00
        || (segments[0] == 0x2001 && segments[1] == 0x0DB8)
    {
        return true;
    }
    ip.to_ipv4_mapped().is_some_and(|v4| is_private_ipv4(&v4))
}

pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_ipv4(v4),
        IpAddr::V6(v6) => is_private_ipv6(v6),
    }
}

fn reject_private(host: &str, ip: IpAddr) -> Result<(), UrlValidationError> {
    if is_private_ip(&ip) {
        warn!(
            host = %host,
            resolved_ip = %ip,
            "Recording URL points at private IP address (SSRF protection)"
        );
        return Err(UrlValidationError::PrivateIpDetected(ip));
    }
    Ok(())
}

/// Validate a caller recording URL before downloading it.
///
/// With `allow_private_hosts` set (local development and tests), HTTP is
/// accepted and no address checks are made.
///
/// # Example
/// ```rust,ignore
/// use hotline_gateway::utils::url_validation::validate_recording_url;
///
/// validate_recording_url("https://media.example.org/rec/42.mp3", false).await?;
/// assert!(validate_recording_url("https://10.0.0.5/rec.mp3", false).await.is_err());
/// ```
pub async fn validate_recording_url(
    url: &str,
    allow_private_hosts: bool,
) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url)?;

    match parsed.scheme() {
        "https" => {}
        "http" if allow_private_hosts => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    let host = parsed
        .host_str()
        .ok_or(UrlValidationError::MissingHost)?
        .to_string();

    if allow_private_hosts {
        return Ok(parsed);
    }

    match parsed.host() {
        Some(Host::Ipv4(ip)) => reject_private(&host, IpAddr::V4(ip))?,
        Some(Host::Ipv6(ip)) => reject_private(&host, IpAddr::V6(ip))?,
        Some(Host::Domain(domain)) => {
            let port = parsed.port_or_known_default().unwrap_or(443);
            let addrs: Vec<_> = tokio::net::lookup_host((domain, port))
                .await
                .map_err(|e| UrlValidationError::DnsResolutionFailed(format!("{host}: {e}")))?
                .collect();

            if addrs.is_empty() {
                return Err(UrlValidationError::DnsResolutionFailed(format!(
                    "No addresses found for {host}"
                )));
            }
            for addr in addrs {
                reject_private(&host, addr.ip())?;
            }
        }
        None => return Err(UrlValidationError::MissingHost),
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_ipv4_ranges() {
        for ip in [
            Ipv4Addr::new(127, 0, 0, 1),
            Ipv4Addr::new(10, 1, 2, 3),
            Ipv4Addr::new(172, 16, 0, 1),
            Ipv4Addr::new(172, 31, 255, 255),
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(169, 254, 0, 1),
            Ipv4Addr::new(255, 255, 255, 255),
            Ipv4Addr::new(0, 0, 0, 0),
            Ipv4Addr::new(192, 0, 2, 1),
            Ipv4Addr::new(100, 64, 0, 1),
            Ipv4Addr::new(198, 18, 0, 1),
        ] {
            assert!(is_private_ipv4(&ip), "{ip} should be private");
        }
    }

    #[test]
    fn test_public_ipv4() {
        assert!(!is_private_ipv4(&Ipv4Addr::new(8, 8, 8, 8)));
        assert!(!is_private_ipv4(&Ipv4Addr::new(172, 32, 0, 1)));
        assert!(!is_private_ipv4(&Ipv4Addr::new(100, 128, 0, 1)));
    }

    #[test]
    fn test_private_ipv6_ranges() {
        assert!(is_private_ipv6(&Ipv6Addr::LOCALHOST));
        assert!(is_private_ipv6(&Ipv6Addr::UNSPECIFIED));
        assert!(is_private_ipv6(&Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)));
        assert!(is_private_ipv6(&Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1)));
        assert!(is_private_ipv6(&Ipv6Addr::new(0x2001, 0x0db8, 0, 0, 0, 0, 0, 1)));
        assert!(is_private_ipv6(&Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped()));
        assert!(!is_private_ipv6(&Ipv6Addr::new(
            0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888
        )));
    }

    #[tokio::test]
    async fn test_invalid_format() {
        assert!(matches!(
            validate_recording_url("not-a-url", false).await,
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_scheme_rules() {
        assert!(matches!(
            validate_recording_url("http://media.example.org/a.mp3", false).await,
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_recording_url("ftp://media.example.org/a.mp3", true).await,
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[tokio::test]
    async fn test_private_literal_rejected() {
        assert!(matches!(
            validate_recording_url("https://10.0.0.5/rec.mp3", false).await,
            Err(UrlValidationError::PrivateIpDetected(_))
        ));
        assert!(matches!(
            validate_recording_url("https://[::1]/rec.mp3", false).await,
            Err(UrlValidationError::PrivateIpDetected(_))
        ));
    }

    #[tokio::test]
    async fn test_public_literal_allowed() {
        let url = validate_recording_url("https://8.8.8.8/rec.mp3", false)
            .await
            .unwrap();
        assert_eq!(url.path(), "/rec.mp3");
    }

    #[tokio::test]
    async fn test_localhost_rejected_in_production() {
        let result = validate_recording_url("https://localhost/rec.mp3", false).await;
        assert!(result.is_err(), "Expected rejection, got {result:?}");
    }

    #[tokio::test]
    async fn test_private_hosts_allowed_in_development() {
        assert!(
            validate_recording_url("http://127.0.0.1:8080/rec.mp3", true)
                .await
                .is_ok()
        );
        assert!(
            validate_recording_url("http://localhost/rec.wav", true)
                .await
                .is_ok()
        );
    }
}
