use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// This structure represents the full configuration that can be loaded from a YAML file.
/// All fields are optional to allow partial configuration. YAML values take precedence
/// over environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 5000
///   public_base_url: "https://hotline.example.org"
///   static_dir: "static"
///
/// providers:
///   openai_api_key: "sk-..."
///   text_model: "gpt-4o-mini"
///   tts_voice: "alloy"
///
/// sms:
///   username: "sandbox"
///   api_key: "at-key"
///   sender_id: "HOTLINE"
///
/// geocoder:
///   url: "https://nominatim.openstreetmap.org"
///   user_agent: "emergency_app"
///
/// dialog:
///   adapter_timeout_seconds: 20
///
/// audio:
///   cache_ttl_seconds: 600
///   cache_max_entries: 1000
///
/// facilities:
///   "1": "Facility 1: Safe House at 123 Main St."
///   "2": "Facility 2: Community Center at 456 Elm St."
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub providers: Option<ProvidersYaml>,
    pub sms: Option<SmsYaml>,
    pub geocoder: Option<GeocoderYaml>,
    pub recording: Option<RecordingYaml>,
    pub dialog: Option<DialogYaml>,
    pub audio: Option<AudioYaml>,
    pub security: Option<SecurityYaml>,
    pub facilities: Option<BTreeMap<String, String>>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
    pub public_base_url: Option<String>,
    pub static_dir: Option<String>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// OpenAI credentials and model selection from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub stt_model: Option<String>,
    pub text_model: Option<String>,
    pub tts_model: Option<String>,
    pub tts_voice: Option<String>,
}

/// Africa's Talking SMS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SmsYaml {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub sender_id: Option<String>,
    pub base_url: Option<String>,
}

/// Reverse geocoder configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeocoderYaml {
    pub url: Option<String>,
    pub user_agent: Option<String>,
}

/// Recording download configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RecordingYaml {
    pub allow_private_hosts: Option<bool>,
}

/// Dialog configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DialogYaml {
    pub adapter_timeout_seconds: Option<u64>,
}

/// Generated audio cache configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AudioYaml {
    pub cache_ttl_seconds: Option<u64>,
    pub cache_max_entries: Option<u64>,
}

/// Security configuration from YAML
///
/// # Example YAML structure
/// ```yaml
/// security:
///   cors_allowed_origins: "https://example.com,https://app.example.com"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: Option<u32>,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Required fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
