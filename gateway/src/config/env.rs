//! Environment variable loading
//!
//! Every field of [`ServerConfig`] has an environment variable; anything unset
//! keeps the default from `ServerConfig::default()`.

use std::path::PathBuf;

use super::utils::{env_bool, env_parse, env_string, normalize_base_url};
use super::{ServerConfig, TlsConfig};

pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = ServerConfig::default();

    if let Some(host) = env_string("HOST") {
        config.host = host;
    }
    if let Some(port) = env_parse::<u16>("PORT")? {
        config.port = port;
    }

    if env_bool("TLS_ENABLED")?.unwrap_or(false) {
        let cert_path = env_string("TLS_CERT_PATH")
            .ok_or("TLS_ENABLED is set but TLS_CERT_PATH is missing")?;
        let key_path = env_string("TLS_KEY_PATH")
            .ok_or("TLS_ENABLED is set but TLS_KEY_PATH is missing")?;
        config.tls = Some(TlsConfig {
            cert_path: PathBuf::from(cert_path),
            key_path: PathBuf::from(key_path),
        });
    }

    config.public_base_url = env_string("PUBLIC_BASE_URL").map(|u| normalize_base_url(&u));
    if let Some(dir) = env_string("STATIC_DIR") {
        config.static_dir = PathBuf::from(dir);
    }

    // OpenAI
    config.openai_api_key = env_string("OPENAI_API_KEY");
    if let Some(url) = env_string("OPENAI_BASE_URL") {
        config.openai_base_url = normalize_base_url(&url);
    }
    if let Some(model) = env_string("OPENAI_STT_MODEL") {
        config.openai_models.stt_model = model;
    }
    if let Some(model) = env_string("OPENAI_TEXT_MODEL") {
        config.openai_models.text_model = model;
    }
    if let Some(model) = env_string("OPENAI_TTS_MODEL") {
        config.openai_models.tts_model = model;
    }
    if let Some(voice) = env_string("OPENAI_TTS_VOICE") {
        config.openai_models.tts_voice = voice;
    }

    // Africa's Talking
    config.at_username = env_string("AT_USERNAME");
    config.at_api_key = env_string("AT_API_KEY");
    config.at_sender_id = env_string("AT_SENDER_ID");
    if let Some(url) = env_string("AT_BASE_URL") {
        config.at_base_url = normalize_base_url(&url);
    }

    // Geocoder
    if let Some(url) = env_string("GEOCODER_URL") {
        config.geocoder_url = normalize_base_url(&url);
    }
    if let Some(agent) = env_string("GEOCODER_USER_AGENT") {
        config.geocoder_user_agent = agent;
    }

    if let Some(allow) = env_bool("RECORDING_ALLOW_PRIVATE_HOSTS")? {
        config.recording_allow_private_hosts = allow;
    }

    if let Some(timeout) = env_parse::<u64>("ADAPTER_TIMEOUT_SECONDS")? {
        config.adapter_timeout_seconds = timeout;
    }

    if let Some(ttl) = env_parse::<u64>("AUDIO_CACHE_TTL_SECONDS")? {
        config.audio_cache_ttl_seconds = ttl;
    }
    if let Some(max) = env_parse::<u64>("AUDIO_CACHE_MAX_ENTRIES")? {
        config.audio_cache_max_entries = max;
    }

    // Security
    config.cors_allowed_origins = env_string("CORS_ALLOWED_ORIGINS");
    if let Some(rps) = env_parse::<u32>("RATE_LIMIT_REQUESTS_PER_SECOND")? {
        config.rate_limit_requests_per_second = rps;
    }
    if let Some(burst) = env_parse::<u32>("RATE_LIMIT_BURST_SIZE")? {
        config.rate_limit_burst_size = burst;
    }

    Ok(config)
}
