//! File-backed settings repository implementations for hintly.
//!
//! Provides the concrete storage adapters behind `hintly-core`'s
//! `SettingsRepository` port: a JSON-file repository with change watching
//! (one instance for the device-local store, one for the synchronized
//! store), an in-memory repository for tests and embedders, and a factory
//! for composing a fully wired `SettingsService`.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;

// Re-export factory for convenient access
pub use factory::SettingsFactory;

// Re-export repository implementations
pub use repositories::{FileSettingsRepository, MemorySettingsRepository, StorageArea, WatchError};
