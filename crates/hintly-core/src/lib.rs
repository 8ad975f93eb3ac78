//! Settings domain types, port definitions, and services for hintly.
//!
//! This crate is the storage-agnostic core of the settings engine: the
//! [`Settings`] value objects, the ports the engine expects from its
//! surroundings ([`SettingsRepository`], [`CachedSettingsRepository`],
//! [`Notifier`]), and the [`SettingsService`] that resolves settings with
//! sync-over-local precedence and publishes them to the cache. Concrete
//! storage adapters live in `hintly-storage`.

#![deny(unused_crate_dependencies)]

pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use ports::{
    CachedSettingsRepository, ChangeListener, ChangeSubscription, CoreError,
    InMemoryCachedSettingsRepository, LogNotifier, NoopNotifier, Notifier, OnClick,
    RepositoryError, SettingsRepository,
};
pub use services::SettingsService;
pub use settings::{
    Blacklist, DEFAULT_SETTINGS, Keymaps, Operation, Properties, PropertyUpdate,
    SETTINGS_VERSION, Search, SettingData, SettingDataError, SettingSource, Settings,
    SettingsError, validate_settings,
};

// Silence unused dev-dependency warnings until we add mock-based tests
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
