//! JSON-file implementation of the `SettingsRepository` trait.
//!
//! One instance wraps the device-local store, another the synchronized
//! store (a file inside a folder the platform sync agent replicates). The
//! two are distinguished only at construction, via [`StorageArea`] or an
//! explicit path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hintly_core::{
    ChangeListener, ChangeSubscription, RepositoryError, SettingData, SettingsRepository,
};

use super::ListenerRegistry;

/// Quiet period grouping rapid successive writes into one change event.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Which persisted store a repository instance wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// Device-local store.
    Local,
    /// Cross-device synchronized store.
    Sync,
}

impl StorageArea {
    /// Default file name for this area under the config directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Local => "settings.local.json",
            Self::Sync => "settings.sync.json",
        }
    }
}

/// Errors setting up the change watcher.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to create file watcher: {0}")]
    WatcherInit(#[from] notify::Error),

    #[error("settings path has no parent directory")]
    NoParentDir,
}

/// On-disk envelope around a settings payload.
#[derive(Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    data: SettingData,
}

/// `SettingsRepository` over a single JSON file.
pub struct FileSettingsRepository {
    path: PathBuf,
    listeners: Arc<ListenerRegistry>,
    // The watcher is created lazily on the first subscription and kept alive
    // here; dropping the repository stops the watch thread.
    watch: Mutex<Option<RecommendedWatcher>>,
}

impl FileSettingsRepository {
    /// Create a repository over an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listeners: Arc::new(ListenerRegistry::new()),
            watch: Mutex::new(None),
        }
    }

    /// Create a repository over the given storage area's default path under
    /// the platform config directory.
    pub fn for_area(area: StorageArea) -> anyhow::Result<Self> {
        let dir = dirs::config_dir().context("no platform config directory")?;
        Ok(Self::new(dir.join("hintly").join(area.file_name())))
    }

    /// The file this repository reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a settings payload, stamping the write time. The change
    /// watcher (of this and any other process watching the file) will fire.
    pub async fn save(&self, data: &SettingData) -> Result<(), RepositoryError> {
        let stored = StoredSettings {
            updated_at: Some(Utc::now()),
            data: data.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }

        // Write-then-rename so a reader never observes a half-written file.
        let mut tmp = self.path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    /// Start the directory watcher feeding the listener registry.
    fn start_watch(&self) -> Result<RecommendedWatcher, WatchError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(WatchError::NoParentDir)?
            .to_path_buf();
        let file_name: OsString = self
            .path
            .file_name()
            .ok_or(WatchError::NoParentDir)?
            .to_os_string();

        let (tx, rx) = mpsc::channel::<Event>();
        let listeners = self.listeners.clone();

        // Debounce thread: group rapid events, then fire listeners. Exits
        // when the watcher (and with it the sender) is dropped.
        thread::spawn(move || {
            let mut pending = false;
            loop {
                match rx.recv_timeout(DEBOUNCE) {
                    Ok(_) => pending = true,
                    Err(RecvTimeoutError::Timeout) => {
                        if pending {
                            pending = false;
                            listeners.notify_all();
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else { return };
                let relevant = matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) && event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()));
                if relevant {
                    let _ = tx.send(event);
                }
            },
            notify::Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn load(&self) -> Result<Option<SettingData>, RepositoryError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };

        let stored: StoredSettings = serde_json::from_str(&text)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Some(stored.data))
    }

    fn on_change(&self, listener: ChangeListener) -> ChangeSubscription {
        let id = self.listeners.subscribe(listener);

        let mut watch = self.watch.lock().expect("watch state poisoned");
        if watch.is_none() {
            match self.start_watch() {
                Ok(watcher) => *watch = Some(watcher),
                Err(err) => {
                    // The subscription stays registered but will never fire.
                    tracing::warn!(
                        error = %err,
                        path = %self.path.display(),
                        "failed to watch settings file"
                    );
                }
            }
        }
        drop(watch);

        let listeners = self.listeners.clone();
        ChangeSubscription::new(move || listeners.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use hintly_core::{SettingSource, Settings};

    use super::*;

    fn repo_in(dir: &Path) -> FileSettingsRepository {
        FileSettingsRepository::new(dir.join(StorageArea::Local.file_name()))
    }

    #[tokio::test]
    async fn test_load_returns_none_when_never_written() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(dir.path());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(dir.path());

        let mut settings = Settings::with_defaults();
        settings.properties.hintchars = "abcd1234".to_string();
        let data = SettingData::from_settings(&settings).unwrap();

        repo.save(&data).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();

        assert_eq!(loaded, data);
        assert_eq!(loaded.materialize().unwrap(), settings);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSettingsRepository::new(dir.path().join("nested/areas/settings.sync.json"));

        let data = SettingData {
            version: None,
            source: SettingSource::Json {
                json: "{}".to_string(),
            },
        };
        repo.save(&data).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(data));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(dir.path());
        std::fs::write(repo.path(), "{not json").unwrap();

        assert!(matches!(
            repo.load().await,
            Err(RepositoryError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_envelope_stamps_updated_at() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(dir.path());

        let data = SettingData {
            version: None,
            source: SettingSource::Json {
                json: "{}".to_string(),
            },
        };
        repo.save(&data).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert!(raw.get("updated_at").is_some());
        assert_eq!(raw["source"], "json");
    }
}
