//! End-to-end settings resolution through real file-backed repositories.

use std::sync::Arc;
use std::time::Duration;

use hintly_core::{NoopNotifier, SettingData, Settings};
use hintly_storage::{MemorySettingsRepository, SettingsFactory};

fn data_with_hintchars(hintchars: &str) -> (Settings, SettingData) {
    let mut settings = Settings::with_defaults();
    settings.properties.hintchars = hintchars.to_string();
    let data = SettingData::from_settings(&settings).unwrap();
    (settings, data)
}

#[tokio::test]
async fn reload_uses_local_file_when_sync_never_written() {
    let dir = tempfile::tempdir().unwrap();
    let (local, sync) = SettingsFactory::file_repositories(dir.path());

    let (_, data) = data_with_hintchars("abcd1234");
    local.save(&data).await.unwrap();

    let service = SettingsFactory::build_service(local, sync, Arc::new(NoopNotifier::new()));
    service.reload().await.unwrap();

    assert_eq!(service.get_cached().await.properties.hintchars, "abcd1234");
}

#[tokio::test]
async fn reload_prefers_sync_file_over_local() {
    let dir = tempfile::tempdir().unwrap();
    let (local, sync) = SettingsFactory::file_repositories(dir.path());

    let (_, local_data) = data_with_hintchars("abcd1234");
    let (_, sync_data) = data_with_hintchars("aaaa1111");
    local.save(&local_data).await.unwrap();
    sync.save(&sync_data).await.unwrap();

    let service = SettingsFactory::build_service(local, sync, Arc::new(NoopNotifier::new()));
    service.reload().await.unwrap();

    assert_eq!(service.get_cached().await.properties.hintchars, "aaaa1111");
}

#[tokio::test]
async fn reload_falls_back_to_defaults_when_no_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let (local, sync) = SettingsFactory::file_repositories(dir.path());

    let service = SettingsFactory::build_service(local, sync, Arc::new(NoopNotifier::new()));
    service.reload().await.unwrap();

    assert_eq!(service.get_cached().await, Settings::with_defaults());
}

#[tokio::test]
async fn corrupt_sync_file_resolves_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (local, sync) = SettingsFactory::file_repositories(dir.path());

    let (_, local_data) = data_with_hintchars("abcd1234");
    local.save(&local_data).await.unwrap();
    std::fs::write(sync.path(), "{not json").unwrap();

    let service = SettingsFactory::build_service(local, sync, Arc::new(NoopNotifier::new()));
    service.reload().await.unwrap();

    // Corrupt sync data masks local rather than silently falling through.
    assert_eq!(service.get_cached().await, Settings::with_defaults());
}

#[tokio::test]
async fn storage_change_triggers_reload() {
    let local = Arc::new(MemorySettingsRepository::new());
    let sync = Arc::new(MemorySettingsRepository::new());
    let service = SettingsFactory::build_service(
        local.clone(),
        sync.clone(),
        Arc::new(NoopNotifier::new()),
    );
    service.reload().await.unwrap();

    let subscription = SettingsFactory::spawn_reload_on_change(&service, sync.as_ref());

    let (_, data) = data_with_hintchars("abcd1234");
    sync.put(data);

    let mut reloaded = false;
    for _ in 0..100 {
        if service.get_cached().await.properties.hintchars == "abcd1234" {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(reloaded, "change event did not trigger a reload");

    // After release, further mutations no longer reload the cache.
    subscription.release();
    let (_, stale) = data_with_hintchars("zzzz9999");
    sync.put(stale);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(service.get_cached().await.properties.hintchars, "abcd1234");
}
