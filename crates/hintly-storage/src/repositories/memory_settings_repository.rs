//! In-memory implementation of the `SettingsRepository` trait.
//!
//! Holds a single optional payload and fires change listeners on mutation.
//! Useful for tests and for embedders that manage persistence themselves.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use hintly_core::{
    ChangeListener, ChangeSubscription, RepositoryError, SettingData, SettingsRepository,
};

use super::ListenerRegistry;

/// `SettingsRepository` over a value held in memory.
#[derive(Default)]
pub struct MemorySettingsRepository {
    data: RwLock<Option<SettingData>>,
    listeners: Arc<ListenerRegistry>,
}

impl MemorySettingsRepository {
    /// An empty repository: `load` returns `Ok(None)` until written.
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-populated with a payload.
    pub fn with_data(data: SettingData) -> Self {
        Self {
            data: RwLock::new(Some(data)),
            listeners: Arc::new(ListenerRegistry::new()),
        }
    }

    /// Store a payload and fire change listeners.
    pub fn put(&self, data: SettingData) {
        *self.data.write().expect("settings store poisoned") = Some(data);
        self.listeners.notify_all();
    }

    /// Remove the stored payload and fire change listeners.
    pub fn clear(&self) {
        *self.data.write().expect("settings store poisoned") = None;
        self.listeners.notify_all();
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn load(&self) -> Result<Option<SettingData>, RepositoryError> {
        Ok(self.data.read().expect("settings store poisoned").clone())
    }

    fn on_change(&self, listener: ChangeListener) -> ChangeSubscription {
        let id = self.listeners.subscribe(listener);
        let listeners = self.listeners.clone();
        ChangeSubscription::new(move || listeners.remove(id))
    }
}
