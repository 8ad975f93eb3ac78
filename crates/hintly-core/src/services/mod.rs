//! Core services - the settings engine's business logic layer.
//!
//! Services here are pure orchestrators over ports; they don't know about
//! concrete storage backends or notification surfaces.

mod settings_service;

pub use settings_service::SettingsService;
