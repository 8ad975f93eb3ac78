//! Settings service - resolves settings from storage and publishes them to
//! the cache.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::ports::{
    CachedSettingsRepository, CoreError, Notifier, OnClick, RepositoryError, SettingsRepository,
};
use crate::settings::{SETTINGS_VERSION, Settings};

/// Outcome of consulting a single storage backend.
enum Resolution {
    /// The backend was never written; fall through to the next tier.
    Absent,
    /// The backend holds data that does not materialize into valid settings.
    Invalid,
    /// Usable settings, with the stored schema version when it differs from
    /// the current one.
    Loaded(Settings, Option<String>),
}

/// Orchestrates settings resolution: synchronized storage wins over the
/// device-local store, defaults are the last resort, and the result is
/// installed into the cache for synchronous-latency reads.
///
/// Synchronized settings represent the user's cross-device intent, which is
/// why they take precedence over a possibly-stale local copy. The local
/// store is consulted only when the sync store was never written; malformed
/// sync data resolves to defaults rather than silently falling through to
/// local.
pub struct SettingsService {
    local: Arc<dyn SettingsRepository>,
    sync: Arc<dyn SettingsRepository>,
    cache: Arc<dyn CachedSettingsRepository>,
    notifier: Arc<dyn Notifier>,
    on_notification_click: OnClick,
    // Serializes overlapping reloads so a slow load can't overwrite a newer
    // resolution.
    reload_gate: Mutex<()>,
}

impl SettingsService {
    /// Create a new settings service over the given backends.
    pub fn new(
        local: Arc<dyn SettingsRepository>,
        sync: Arc<dyn SettingsRepository>,
        cache: Arc<dyn CachedSettingsRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            local,
            sync,
            cache,
            notifier,
            on_notification_click: Arc::new(|| {}),
            reload_gate: Mutex::new(()),
        }
    }

    /// Set the click-through action attached to notifications, e.g. opening
    /// the settings editor.
    #[must_use]
    pub fn with_notification_click(mut self, on_click: OnClick) -> Self {
        self.on_notification_click = on_click;
        self
    }

    /// Re-resolve settings from the storage backends and install the result
    /// into the cache.
    ///
    /// Invoked at startup and whenever a backend reports a change. Invalid
    /// stored data never fails the reload: the cache receives defaults and
    /// the user is notified. Only backend I/O failure propagates as an
    /// error, with retry policy left to the caller.
    pub async fn reload(&self) -> Result<Settings, CoreError> {
        let _gate = self.reload_gate.lock().await;

        let resolution = match self.resolve(&self.sync).await? {
            Resolution::Absent => self.resolve(&self.local).await?,
            resolution => resolution,
        };

        // The cache is updated before any notification is raised, so the
        // extension keeps functioning even while the user ignores it.
        match resolution {
            Resolution::Loaded(settings, None) => {
                self.cache.update(settings.clone()).await;
                Ok(settings)
            }
            Resolution::Loaded(settings, Some(stored)) => {
                self.cache.update(settings.clone()).await;
                tracing::info!(
                    stored = %stored,
                    current = SETTINGS_VERSION,
                    "settings version changed"
                );
                self.notifier
                    .notify_updated(SETTINGS_VERSION, self.on_notification_click.clone())
                    .await;
                Ok(settings)
            }
            Resolution::Invalid => {
                let settings = Settings::with_defaults();
                self.cache.update(settings.clone()).await;
                self.notifier
                    .notify_invalid_settings(self.on_notification_click.clone())
                    .await;
                Ok(settings)
            }
            Resolution::Absent => {
                let settings = Settings::with_defaults();
                self.cache.update(settings.clone()).await;
                Ok(settings)
            }
        }
    }

    /// The currently cached settings. No storage access, no notifications.
    pub async fn get_cached(&self) -> Settings {
        self.cache.get().await
    }

    async fn resolve(&self, repo: &Arc<dyn SettingsRepository>) -> Result<Resolution, CoreError> {
        let data = match repo.load().await {
            Ok(Some(data)) => data,
            Ok(None) => return Ok(Resolution::Absent),
            Err(RepositoryError::Serialization(err)) => {
                // Bad stored bytes are recovered the same way as a failed
                // materialize, not treated as backend failure.
                tracing::warn!(error = %err, "stored settings payload is unreadable");
                return Ok(Resolution::Invalid);
            }
            Err(err) => return Err(err.into()),
        };

        match data.materialize() {
            Ok(settings) => {
                let mismatch = data.version_mismatch().map(ToString::to_string);
                Ok(Resolution::Loaded(settings, mismatch))
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored settings failed to materialize");
                Ok(Resolution::Invalid)
            }
        }
    }
}
