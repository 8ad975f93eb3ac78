//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the settings core expects from its
//! surroundings: the two storage backends, the in-memory cache, and the UI
//! notification surface. They contain no implementation details and use only
//! domain types in their signatures.

pub mod cached_settings_repository;
pub mod notifier;
pub mod settings_repository;

use thiserror::Error;

pub use cached_settings_repository::{CachedSettingsRepository, InMemoryCachedSettingsRepository};
pub use notifier::{LogNotifier, NoopNotifier, Notifier, OnClick};
pub use settings_repository::{ChangeListener, ChangeSubscription, SettingsRepository};

/// Domain-facing errors for storage backend operations.
///
/// Abstracts away the backend medium (files, extension storage, databases)
/// so the resolution flow can distinguish recoverable bad data from fatal
/// I/O failure without knowing what the backend is.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend medium itself failed unexpectedly. Fatal to the current
    /// reload; the caller owns retry policy.
    #[error("storage error: {0}")]
    Storage(String),

    /// The backend holds bytes that do not parse as a settings payload.
    /// Recoverable: the resolution flow falls back to defaults and tells
    /// the user.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Canonical error type leaving the settings core.
///
/// Adapters map this to their own surface (exit codes, notification toasts,
/// serialized errors).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A storage backend failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Unexpected internal condition.
    #[error("internal error: {0}")]
    Internal(String),
}
