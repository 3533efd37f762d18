//! Configuration module for the hotline gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//! The configuration is split into logical submodules for maintainability.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use hotline_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

/// Default OpenAI REST API root
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default Africa's Talking API root
pub const DEFAULT_AT_BASE_URL: &str = "https://api.africastalking.com";
/// Default reverse geocoding service (Nominatim)
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
/// Nominatim requires an identifying user agent
pub const DEFAULT_GEOCODER_USER_AGENT: &str = "emergency_app";

/// TLS configuration for HTTPS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// OpenAI models used by the speech and text adapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAIModels {
    pub stt_model: String,
    pub text_model: String,
    pub tts_model: String,
    pub tts_voice: String,
}

impl Default for OpenAIModels {
    fn default() -> Self {
        Self {
            stt_model: "whisper-1".to_string(),
            text_model: "gpt-4o-mini".to_string(),
            tts_model: "tts-1".to_string(),
            tts_voice: "alloy".to_string(),
        }
    }
}

/// Server configuration
///
/// Contains all configuration needed to run the hotline gateway, including:
/// - Server settings (host, port, TLS, public URL used in `<Play>` directives)
/// - Provider credentials (OpenAI, Africa's Talking)
/// - Geocoder endpoint
/// - Dialog settings (adapter timeout, facility table)
/// - Audio artifact cache settings
/// - Security settings (CORS, rate limiting)
///
/// Built once at process start and shared read-only by every adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    /// Externally reachable URL of this server, used to build audio URLs.
    /// When unset, the URL is derived from the request's Host header.
    pub public_base_url: Option<String>,
    /// Directory holding fixed audio files served under `/static/`
    pub static_dir: PathBuf,

    // OpenAI (speech-to-text, text generation, text-to-speech)
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_models: OpenAIModels,

    // Africa's Talking (SMS)
    pub at_username: Option<String>,
    pub at_api_key: Option<String>,
    /// Optional short code or alphanumeric sender id
    pub at_sender_id: Option<String>,
    pub at_base_url: String,

    // Reverse geocoding
    pub geocoder_url: String,
    pub geocoder_user_agent: String,

    /// Allow recording downloads from loopback/private hosts (development only)
    pub recording_allow_private_hosts: bool,

    // Dialog settings
    /// Upper bound for any single external adapter call
    pub adapter_timeout_seconds: u64,
    /// Facility code to description table; `None` uses the built-in table
    pub facilities: Option<BTreeMap<String, String>>,

    // Generated audio cache
    pub audio_cache_ttl_seconds: u64,
    pub audio_cache_max_entries: u64,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    // Rate limiting configuration
    /// Maximum requests per second per IP address
    /// Default: 60
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    /// Default: 10
    pub rate_limit_burst_size: u32,
}

/// Zeroize every provider secret when the configuration is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.openai_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.at_api_key {
            key.zeroize();
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            tls: None,
            public_base_url: None,
            static_dir: PathBuf::from("static"),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_models: OpenAIModels::default(),
            at_username: None,
            at_api_key: None,
            at_sender_id: None,
            at_base_url: DEFAULT_AT_BASE_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            geocoder_user_agent: DEFAULT_GEOCODER_USER_AGENT.to_string(),
            recording_allow_private_hosts: false,
            adapter_timeout_seconds: 20,
            facilities: None,
            audio_cache_ttl_seconds: 600,
            audio_cache_max_entries: 1000,
            cors_allowed_origins: None,
            rate_limit_requests_per_second: 60,
            rate_limit_burst_size: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables only
    ///
    /// Missing variables fall back to defaults. The result is validated.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // Note: .env file is loaded in main.rs at application startup
        let yaml_config = yaml::YamlConfig::from_file(path)?;

        let config = merge::merge_config(Some(yaml_config))?;
        Self::validate(&config)?;

        Ok(config)
    }

    fn validate(config: &Self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_port(config.port)?;
        validation::validate_tls(&config.tls)?;
        validation::validate_public_base_url(config.public_base_url.as_deref())?;
        validation::validate_adapter_timeout(config.adapter_timeout_seconds)?;
        validation::validate_facilities(config.facilities.as_ref())?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Per-call bound applied to every external adapter request
    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.adapter_timeout_seconds)
    }

    /// Get API key for a specific provider
    ///
    /// # Arguments
    /// * `provider` - The name of the provider (e.g., "openai", "africastalking")
    ///
    /// # Returns
    /// * `Result<String, String>` - The API key on success, or an error message on failure
    pub fn get_api_key(&self, provider: &str) -> Result<String, String> {
        match provider.to_lowercase().as_str() {
            "openai" => self.openai_api_key.as_ref().cloned().ok_or_else(|| {
                "OpenAI API key not configured in server environment".to_string()
            }),
            "africastalking" | "africas-talking" | "at" => {
                self.at_api_key.as_ref().cloned().ok_or_else(|| {
                    "Africa's Talking API key not configured in server environment".to_string()
                })
            }
            _ => Err(format!("Unsupported provider: {provider}")),
        }
    }

    /// Get Africa's Talking credentials (username and API key)
    ///
    /// The messaging API authenticates with the `apiKey` header and needs the
    /// application username in the form body.
    pub fn get_africastalking_credentials(&self) -> Result<(String, String), String> {
        let username = self
            .at_username
            .as_ref()
            .cloned()
            .ok_or_else(|| "Africa's Talking username not configured".to_string())?;
        let api_key = self.get_api_key("africastalking")?;
        Ok((username, api_key))
    }
}
