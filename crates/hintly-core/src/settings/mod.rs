//! Settings domain types and validation.
//!
//! Pure domain values with no infrastructure dependencies. `Settings` is
//! always structurally complete: every construction path (including
//! deserialization of partial JSON) fills omitted fields from defaults, so a
//! partial settings value is not representable.

mod blacklist;
mod data;
mod keymaps;
mod properties;
mod search;

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

pub use blacklist::Blacklist;
pub use data::{SettingData, SettingDataError, SettingSource};
pub use keymaps::{Keymaps, Operation};
pub use properties::{Properties, PropertyUpdate};
pub use search::Search;

/// Current schema version of the settings format. Stored payloads carrying a
/// different version still resolve, but the user is told to review them.
pub const SETTINGS_VERSION: &str = "2.1";

/// The process-wide default settings. Only ever read; callers needing a
/// mutable starting point clone it via [`Settings::with_defaults`].
pub static DEFAULT_SETTINGS: LazyLock<Settings> = LazyLock::new(|| Settings {
    keymaps: Keymaps::with_defaults(),
    search: Search::default(),
    blacklist: Blacklist::default(),
    properties: Properties::default(),
});

/// The complete in-memory configuration value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub keymaps: Keymaps,
    pub search: Search,
    pub blacklist: Blacklist,
    pub properties: Properties,
}

impl Settings {
    /// A fresh copy of [`DEFAULT_SETTINGS`].
    pub fn with_defaults() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("hint characters need at least 2 characters, got {0:?}")]
    TooFewHintchars(String),

    #[error("default search engine {0:?} is not defined")]
    UnknownDefaultEngine(String),

    #[error("search engine {0:?} is missing the {{}} query placeholder")]
    MissingQueryPlaceholder(String),

    #[error("blacklist patterns cannot be empty")]
    EmptyBlacklistPattern,

    #[error("keymap for {0:?} has an empty operation type")]
    EmptyKeymapOperation(String),
}

/// Validate settings values against the schema rules.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.properties.hintchars.chars().count() < 2 {
        return Err(SettingsError::TooFewHintchars(
            settings.properties.hintchars.clone(),
        ));
    }

    if !settings
        .search
        .engines
        .contains_key(&settings.search.default_engine)
    {
        return Err(SettingsError::UnknownDefaultEngine(
            settings.search.default_engine.clone(),
        ));
    }
    for (name, template) in &settings.search.engines {
        if !template.contains("{}") {
            return Err(SettingsError::MissingQueryPlaceholder(name.clone()));
        }
    }

    if settings.blacklist.patterns().iter().any(String::is_empty) {
        return Err(SettingsError::EmptyBlacklistPattern);
    }

    for (keys, op) in settings.keymaps.iter() {
        if op.kind.is_empty() {
            return Err(SettingsError::EmptyKeymapOperation(keys.to_string()));
        }
    }

    Ok(())
}
