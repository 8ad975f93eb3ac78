//! Cached settings repository: the in-memory single source of truth for the
//! currently active settings.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::settings::{PropertyUpdate, Settings};

/// The single authoritative, memory-resident copy of resolved settings,
/// decoupled from storage latency.
///
/// Infallible by contract: the cache is populated with defaults at
/// construction and replaced wholesale by the reload flow. The async
/// signatures exist for uniformity with storage-backed reads; no method
/// performs I/O. Callers receive clones, never a handle onto cache state.
#[async_trait]
pub trait CachedSettingsRepository: Send + Sync {
    /// The current cached settings.
    async fn get(&self) -> Settings;

    /// Mutate exactly one key of the `properties` mapping on the live cached
    /// value, leaving every other field untouched. Visible to the next
    /// `get`. Value validation is the caller's responsibility.
    async fn set_property(&self, update: PropertyUpdate);

    /// Atomically replace the entire cached value. Called by the reload flow
    /// to install a freshly resolved settings value.
    async fn update(&self, value: Settings);
}

/// The standard in-process implementation.
pub struct InMemoryCachedSettingsRepository {
    current: RwLock<Settings>,
}

impl InMemoryCachedSettingsRepository {
    /// A cache initialized to the default settings.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Settings::with_defaults()),
        }
    }
}

impl Default for InMemoryCachedSettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachedSettingsRepository for InMemoryCachedSettingsRepository {
    async fn get(&self) -> Settings {
        self.current.read().await.clone()
    }

    async fn set_property(&self, update: PropertyUpdate) {
        self.current.write().await.properties.apply(update);
    }

    async fn update(&self, value: Settings) {
        *self.current.write().await = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_with_defaults() {
        let cache = InMemoryCachedSettingsRepository::new();
        assert_eq!(cache.get().await, Settings::with_defaults());
    }

    #[tokio::test]
    async fn test_update_replaces_wholesale() {
        let cache = InMemoryCachedSettingsRepository::new();
        let mut settings = Settings::with_defaults();
        settings.properties.hintchars = "abcd1234".to_string();

        cache.update(settings.clone()).await;
        assert_eq!(cache.get().await, settings);
    }

    #[tokio::test]
    async fn test_set_property_touches_only_named_property() {
        let cache = InMemoryCachedSettingsRepository::new();
        let before = cache.get().await;

        cache
            .set_property(PropertyUpdate::Hintchars("abcd1234".to_string()))
            .await;

        let after = cache.get().await;
        assert_eq!(after.properties.hintchars, "abcd1234");
        assert_eq!(after.keymaps, before.keymaps);
        assert_eq!(after.search, before.search);
        assert_eq!(after.blacklist, before.blacklist);
        assert_eq!(after.properties.smoothscroll, before.properties.smoothscroll);
        assert_eq!(after.properties.complete, before.properties.complete);
    }

    #[tokio::test]
    async fn test_get_is_idempotent() {
        let cache = InMemoryCachedSettingsRepository::new();
        let first = cache.get().await;
        assert_eq!(cache.get().await, first);
        assert_eq!(cache.get().await, first);
    }

    #[tokio::test]
    async fn test_get_returns_a_copy() {
        let cache = InMemoryCachedSettingsRepository::new();
        let mut copy = cache.get().await;
        copy.properties.hintchars = "mutated".to_string();
        assert_eq!(cache.get().await, Settings::with_defaults());
    }
}
