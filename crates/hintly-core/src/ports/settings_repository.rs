//! Settings repository trait definition.
//!
//! This port defines the interface for a persisted settings backend. Two
//! instances exist at runtime, one over the device-local store and one over
//! the cross-device synchronized store; they are distinguished only by
//! construction, never by runtime type inspection.

use std::sync::Arc;

use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::SettingData;

/// Callback fired when a backend's underlying store is mutated by any actor,
/// including other windows or processes of the same extension.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Repository over one persisted settings backend.
///
/// # Design rules
///
/// - No storage-medium types in signatures
/// - `load` distinguishes "never written" (`Ok(None)`) from bad data
///   (`Err(Serialization)`) and from backend failure (`Err(Storage)`)
/// - Implementations handle envelope (de)serialization internally
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Read this backend's stored settings payload.
    ///
    /// Returns `Ok(None)` if the backend has never been written.
    async fn load(&self) -> Result<Option<SettingData>, RepositoryError>;

    /// Register a listener for external mutation of the backing store.
    ///
    /// The returned handle must be kept alive for the subscription to stay
    /// active; releasing (or dropping) it deregisters the listener.
    fn on_change(&self, listener: ChangeListener) -> ChangeSubscription;
}

/// Handle for an active change subscription.
///
/// Deregisters the listener on [`release`](Self::release) or on drop, so a
/// forgotten handle cannot leak a listener for the process lifetime.
pub struct ChangeSubscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ChangeSubscription {
    /// Create a subscription whose cancellation runs the given closure once.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel, for backends that never emit
    /// change events.
    pub const fn noop() -> Self {
        Self { cancel: None }
    }

    /// Explicitly deregister the listener.
    pub fn release(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for ChangeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSubscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
