//! Merging YAML overrides on top of the environment configuration

use std::path::PathBuf;

use super::utils::normalize_base_url;
use super::yaml::YamlConfig;
use super::{ServerConfig, TlsConfig, env};

/// Build the final configuration: environment (with defaults) as the base,
/// YAML values applied on top when a file was given.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = env::load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(tls) = server.tls {
            match tls.enabled {
                Some(true) => {
                    let cert_path = tls
                        .cert_path
                        .ok_or("server.tls.enabled is true but cert_path is missing")?;
                    let key_path = tls
                        .key_path
                        .ok_or("server.tls.enabled is true but key_path is missing")?;
                    config.tls = Some(TlsConfig {
                        cert_path: PathBuf::from(cert_path),
                        key_path: PathBuf::from(key_path),
                    });
                }
                Some(false) => config.tls = None,
                None => {}
            }
        }
        if let Some(url) = server.public_base_url {
            config.public_base_url = Some(normalize_base_url(&url));
        }
        if let Some(dir) = server.static_dir {
            config.static_dir = PathBuf::from(dir);
        }
    }

    if let Some(providers) = yaml.providers {
        if providers.openai_api_key.is_some() {
            config.openai_api_key = providers.openai_api_key;
        }
        if let Some(url) = providers.openai_base_url {
            config.openai_base_url = normalize_base_url(&url);
        }
        if let Some(model) = providers.stt_model {
            config.openai_models.stt_model = model;
        }
        if let Some(model) = providers.text_model {
            config.openai_models.text_model = model;
        }
        if let Some(model) = providers.tts_model {
            config.openai_models.tts_model = model;
        }
        if let Some(voice) = providers.tts_voice {
            config.openai_models.tts_voice = voice;
        }
    }

    if let Some(sms) = yaml.sms {
        if sms.username.is_some() {
            config.at_username = sms.username;
        }
        if sms.api_key.is_some() {
            config.at_api_key = sms.api_key;
        }
        if sms.sender_id.is_some() {
            config.at_sender_id = sms.sender_id;
        }
        if let Some(url) = sms.base_url {
            config.at_base_url = normalize_base_url(&url);
        }
    }

    if let Some(geocoder) = yaml.geocoder {
        if let Some(url) = geocoder.url {
            config.geocoder_url = normalize_base_url(&url);
        }
        if let Some(agent) = geocoder.user_agent {
            config.geocoder_user_agent = agent;
        }
    }

    if let Some(allow) = yaml.recording.and_then(|r| r.allow_private_hosts) {
        config.recording_allow_private_hosts = allow;
    }

    if let Some(timeout) = yaml.dialog.and_then(|d| d.adapter_timeout_seconds) {
        config.adapter_timeout_seconds = timeout;
    }

    if let Some(audio) = yaml.audio {
        if let Some(ttl) = audio.cache_ttl_seconds {
            config.audio_cache_ttl_seconds = ttl;
        }
        if let Some(max) = audio.cache_max_entries {
            config.audio_cache_max_entries = max;
        }
    }

    if let Some(security) = yaml.security {
        if security.cors_allowed_origins.is_some() {
            config.cors_allowed_origins = security.cors_allowed_origins;
        }
        if let Some(rps) = security.rate_limit_requests_per_second {
            config.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = security.rate_limit_burst_size {
            config.rate_limit_burst_size = burst;
        }
    }

    if yaml.facilities.is_some() {
        config.facilities = yaml.facilities;
    }

    Ok(config)
}
