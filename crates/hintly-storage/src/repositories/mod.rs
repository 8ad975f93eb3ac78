//! Concrete `SettingsRepository` implementations.

mod file_settings_repository;
mod listeners;
mod memory_settings_repository;

pub use file_settings_repository::{FileSettingsRepository, StorageArea, WatchError};
pub use memory_settings_repository::MemorySettingsRepository;

pub(crate) use listeners::ListenerRegistry;
