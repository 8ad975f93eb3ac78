//! Free-form scalar properties and their typed update variants.

use serde::{Deserialize, Serialize};

fn default_hintchars() -> String {
    "abcdefghijklmnopqrstuvwxyz".to_string()
}

fn default_complete() -> String {
    "sbh".to_string()
}

/// Scalar-keyed sub-settings that the UI can toggle live without a full
/// settings round-trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Properties {
    /// Characters used to label link hints, in labeling order.
    #[serde(default = "default_hintchars")]
    pub hintchars: String,

    /// Whether scrolling operations animate instead of jumping.
    #[serde(default)]
    pub smoothscroll: bool,

    /// Completion groups shown in the command line, one character per group
    /// (s: search engines, b: bookmarks, h: history).
    #[serde(default = "default_complete")]
    pub complete: String,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            hintchars: default_hintchars(),
            smoothscroll: false,
            complete: default_complete(),
        }
    }
}

impl Properties {
    /// Apply a single-property update in place. Untouched fields keep their
    /// current values.
    pub fn apply(&mut self, update: PropertyUpdate) {
        match update {
            PropertyUpdate::Hintchars(value) => self.hintchars = value,
            PropertyUpdate::SmoothScroll(value) => self.smoothscroll = value,
            PropertyUpdate::Complete(value) => self.complete = value,
        }
    }
}

/// A single-property edit, enumerating the settable keys with the value type
/// each of them accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyUpdate {
    Hintchars(String),
    SmoothScroll(bool),
    Complete(String),
}

impl PropertyUpdate {
    /// The property key this update targets, as it appears in stored JSON.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hintchars(_) => "hintchars",
            Self::SmoothScroll(_) => "smoothscroll",
            Self::Complete(_) => "complete",
        }
    }
}
