//! Composition utilities for wiring a `SettingsService` with file backends.
//!
//! This module is focused purely on construction and should not contain any
//! domain logic.

use std::path::Path;
use std::sync::Arc;

use hintly_core::{
    ChangeSubscription, InMemoryCachedSettingsRepository, Notifier, SettingsRepository,
    SettingsService,
};

use crate::repositories::{FileSettingsRepository, StorageArea};

/// Factory for creating settings repositories and composed services.
pub struct SettingsFactory;

impl SettingsFactory {
    /// Build the (local, sync) file repositories under an explicit directory.
    pub fn file_repositories(
        dir: &Path,
    ) -> (Arc<FileSettingsRepository>, Arc<FileSettingsRepository>) {
        (
            Arc::new(FileSettingsRepository::new(
                dir.join(StorageArea::Local.file_name()),
            )),
            Arc::new(FileSettingsRepository::new(
                dir.join(StorageArea::Sync.file_name()),
            )),
        )
    }

    /// Build the (local, sync) file repositories under the platform config
    /// directory.
    pub fn default_repositories()
    -> anyhow::Result<(Arc<FileSettingsRepository>, Arc<FileSettingsRepository>)> {
        Ok((
            Arc::new(FileSettingsRepository::for_area(StorageArea::Local)?),
            Arc::new(FileSettingsRepository::for_area(StorageArea::Sync)?),
        ))
    }

    /// Compose a `SettingsService` over the given backends with a fresh
    /// in-memory cache.
    pub fn build_service(
        local: Arc<dyn SettingsRepository>,
        sync: Arc<dyn SettingsRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<SettingsService> {
        let cache = Arc::new(InMemoryCachedSettingsRepository::new());
        Arc::new(SettingsService::new(local, sync, cache, notifier))
    }

    /// Wire a repository's change events to a spawned `reload` on the
    /// current tokio runtime. Reload failures are logged, not propagated;
    /// the next change event will try again.
    ///
    /// Must be called from within a runtime. The returned handle must be
    /// kept alive for the wiring to stay active.
    pub fn spawn_reload_on_change(
        service: &Arc<SettingsService>,
        repo: &dyn SettingsRepository,
    ) -> ChangeSubscription {
        let handle = tokio::runtime::Handle::current();
        let service = service.clone();
        repo.on_change(Arc::new(move || {
            let service = service.clone();
            handle.spawn(async move {
                if let Err(err) = service.reload().await {
                    tracing::warn!(error = %err, "settings reload after storage change failed");
                }
            });
        }))
    }
}
