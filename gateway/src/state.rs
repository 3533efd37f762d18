use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::{Adapters, AudioStore, FacilityDirectory};
use crate::dialog::DialogEngine;

/// Shared state behind every webhook handler.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: DialogEngine,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Build state with the production adapters.
    pub async fn new(config: ServerConfig) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let adapters = Adapters::from_config(&config)?;
        Ok(Self::with_adapters(config, adapters))
    }

    /// Build state around caller-supplied adapters.
    pub fn with_adapters(config: ServerConfig, adapters: Adapters) -> Arc<Self> {
        let facilities = FacilityDirectory::from_config(config.facilities.as_ref());
        let audio_store = AudioStore::new(
            Duration::from_secs(config.audio_cache_ttl_seconds),
            config.audio_cache_max_entries,
        );
        info!(
            facilities = facilities.len(),
            adapters = ?adapters,
            timeout = ?config.adapter_timeout(),
            "Hotline dialog engine ready"
        );

        let engine = DialogEngine::new(adapters, facilities, audio_store, config.adapter_timeout());
        let static_dir = config.static_dir.clone();

        Arc::new(Self {
            config,
            engine,
            static_dir,
        })
    }

    pub fn audio_store(&self) -> &AudioStore {
        self.engine.audio_store()
    }

    /// Configured public base URL without a trailing slash
    pub fn public_base_url(&self) -> Option<&str> {
        self.config
            .public_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}
