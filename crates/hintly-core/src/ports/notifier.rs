//! Notification trait for surfacing settings problems to the user.
//!
//! The core only decides *when* to notify; the surrounding UI layer owns how
//! a notification renders (toast, badge, native notification).

use std::sync::Arc;

use async_trait::async_trait;

/// Click-through action attached to a notification, e.g. opening the
/// settings editor.
pub type OnClick = Arc<dyn Fn() + Send + Sync>;

/// UI-facing notification sink. Fire-and-forget from the caller's
/// perspective; a notification that fails to display is not an error the
/// resolution flow can act on.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell the user the currently stored settings failed to parse or
    /// validate, with a click-through to correct them.
    async fn notify_invalid_settings(&self, on_click: OnClick);

    /// Tell the user the settings schema version has changed. `version` is
    /// an opaque identifier, not interpreted here.
    async fn notify_updated(&self, version: &str, on_click: OnClick);
}

/// A no-op notifier for tests and headless contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify_invalid_settings(&self, _on_click: OnClick) {
        // Intentionally do nothing
    }

    async fn notify_updated(&self, _version: &str, _on_click: OnClick) {
        // Intentionally do nothing
    }
}

/// Notifier that surfaces through the log stream, for CLI and daemon
/// contexts without a notification UI.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_invalid_settings(&self, _on_click: OnClick) {
        tracing::warn!("stored settings are invalid, falling back to defaults");
    }

    async fn notify_updated(&self, version: &str, _on_click: OnClick) {
        tracing::info!(version, "settings schema updated, review your settings");
    }
}
