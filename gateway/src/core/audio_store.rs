//! Generated audio store
//!
//! Every synthesized reply is stored under a fresh UUID so concurrent calls
//! never share an output slot. Entries expire after the configured TTL; the
//! gateway fetches them through `GET /static/{key}.{ext}` shortly after the
//! webhook response.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;
use uuid::Uuid;

use crate::core::tts::AudioArtifact;

/// Handle to a stored artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub key: String,
    /// `{key}.{extension}`, the last path segment of the served URL
    pub file_name: String,
}

impl ArtifactRef {
    /// Absolute URL the gateway should `<Play>`
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/static/{}",
            base_url.trim_end_matches('/'),
            self.file_name
        )
    }
}

#[derive(Clone)]
pub struct AudioStore {
    cache: Cache<String, Arc<AudioArtifact>>,
}

impl AudioStore {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub async fn insert(&self, artifact: AudioArtifact) -> ArtifactRef {
        let key = Uuid::new_v4().simple().to_string();
        let file_name = format!("{key}.{}", artifact.extension);
        debug!(%key, bytes = artifact.len(), "Stored generated audio");
        self.cache.insert(key.clone(), Arc::new(artifact)).await;
        ArtifactRef { key, file_name }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<AudioArtifact>> {
        self.cache.get(key).await
    }

    /// Look up by served file name, e.g. `3f2a...9c.mp3`
    pub async fn get_by_file_name(&self, file_name: &str) -> Option<Arc<AudioArtifact>> {
        let (stem, extension) = file_name.rsplit_once('.')?;
        let artifact = self.get(stem).await?;
        artifact
            .extension
            .eq_ignore_ascii_case(extension)
            .then_some(artifact)
    }
}

impl std::fmt::Debug for AudioStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioStore")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AudioStore {
        AudioStore::new(Duration::from_secs(60), 100)
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = store();
        let artifact = AudioArtifact::mp3(vec![1, 2, 3]);
        let reference = store.insert(artifact.clone()).await;

        assert_eq!(reference.file_name, format!("{}.mp3", reference.key));
        let stored = store.get(&reference.key).await.unwrap();
        assert_eq!(*stored, artifact);
    }

    #[tokio::test]
    async fn test_keys_are_unique_per_insert() {
        let store = store();
        let first = store.insert(AudioArtifact::mp3(vec![1])).await;
        let second = store.insert(AudioArtifact::mp3(vec![2])).await;
        assert_ne!(first.key, second.key);
        assert_eq!(store.get(&first.key).await.unwrap().bytes.as_ref(), &[1]);
        assert_eq!(store.get(&second.key).await.unwrap().bytes.as_ref(), &[2]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_do_not_collide() {
        let store = store();
        let handles: Vec<_> = (0..16u8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { (i, store.insert(AudioArtifact::mp3(vec![i])).await) })
            })
            .collect();

        for handle in handles {
            let (i, reference) = handle.await.unwrap();
            let stored = store.get(&reference.key).await.unwrap();
            assert_eq!(stored.bytes.as_ref(), &[i]);
        }
    }

    #[tokio::test]
    async fn test_get_by_file_name() {
        let store = store();
        let reference = store.insert(AudioArtifact::mp3(vec![9])).await;

        assert!(store.get_by_file_name(&reference.file_name).await.is_some());
        assert!(
            store
                .get_by_file_name(&format!("{}.wav", reference.key))
                .await
                .is_none()
        );
        assert!(store.get_by_file_name(&reference.key).await.is_none());
        assert!(store.get_by_file_name("missing.mp3").await.is_none());
    }

    #[test]
    fn test_artifact_url() {
        let reference = ArtifactRef {
            key: "abc".to_string(),
            file_name: "abc.mp3".to_string(),
        };
        assert_eq!(
            reference.url("https://hotline.example.org/"),
            "https://hotline.example.org/static/abc.mp3"
        );
    }
}
