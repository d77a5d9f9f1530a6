use backend_url::{
    BackendConfig, KeyValueStore, MemoryStore, RELOAD_DELAY,
    SAVE_FAILED_MESSAGE, STORAGE_KEY, StoreError, UPDATED_MESSAGE,
    set_backend_url,
};
use std::time::Duration;
use test_helpers::fakes::{RecordingNotifier, RecordingReloader};

fn same_origin_config(store: &MemoryStore) -> BackendConfig<&MemoryStore> {
    BackendConfig::load("http://localhost:5000", None, store)
}

#[test]
fn trailing_slash_is_stripped_before_saving() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let config = same_origin_config(&store);
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    let url = set_backend_url(
        &config,
        "https://api.example.com/",
        &notifier,
        &reloader,
    )?;

    assert_eq!(url.as_str(), "https://api.example.com");
    assert_eq!(config.url(), url);
    assert_eq!(
        store.get(STORAGE_KEY)?,
        Some("https://api.example.com".to_string())
    );
    Ok(())
}

#[test]
fn clean_url_is_saved_unchanged() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let config = same_origin_config(&store);
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    set_backend_url(&config, "https://api.example.com", &notifier, &reloader)?;

    assert_eq!(config.url().as_str(), "https://api.example.com");
    assert_eq!(
        store.get(STORAGE_KEY)?,
        Some("https://api.example.com".to_string())
    );
    Ok(())
}

#[test]
fn reload_is_scheduled_once_after_delay() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let config = same_origin_config(&store);
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    set_backend_url(&config, "https://api.example.com", &notifier, &reloader)?;

    assert_eq!(reloader.delays(), vec![Duration::from_millis(1500)]);
    assert_eq!(RELOAD_DELAY, Duration::from_millis(1500));
    Ok(())
}

#[test]
fn user_is_told_about_the_reload() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let config = same_origin_config(&store);
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    set_backend_url(&config, "https://api.example.com", &notifier, &reloader)?;

    assert_eq!(notifier.messages(), vec![UPDATED_MESSAGE.to_string()]);
    Ok(())
}

#[test]
fn saved_value_is_picked_up_after_reload() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    {
        let config = BackendConfig::load("https://x.vercel.app", None, &store);
        set_backend_url(&config, "http://10.0.0.2:5000/", &notifier, &reloader)?;
    }

    let reloaded = BackendConfig::load("https://x.vercel.app", None, &store);
    assert_eq!(reloaded.url().as_str(), "http://10.0.0.2:5000");
    Ok(())
}

#[test]
fn malformed_input_is_kept_as_given() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let config = same_origin_config(&store);
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    let url = set_backend_url(&config, "not a url", &notifier, &reloader)?;

    assert_eq!(url.as_str(), "not a url");
    Ok(())
}

#[test]
fn failed_save_changes_nothing() {
    let store = MemoryStore::read_only();
    let config = BackendConfig::load("https://x.vercel.app", None, &store);
    let before = config.url();
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    let result =
        set_backend_url(&config, "https://api.example.com", &notifier, &reloader);

    assert!(matches!(result, Err(StoreError::Js(_))));
    assert_eq!(config.url(), before);
    assert!(notifier.messages().is_empty());
    assert!(reloader.delays().is_empty());
}

#[test]
fn failed_save_shows_reason() {
    let store = MemoryStore::read_only();
    let config = BackendConfig::load("http://localhost:5000", None, &store);
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    let result = set_backend_url(
        &config,
        "https://api.example.com/",
        &notifier,
        &reloader,
    );

    assert!(result.is_err());

    assert_eq!(
        notifier.errors(),
        vec!["后端地址保存失败: Storage error: QuotaExceededError".to_string()]
    );
    assert!(notifier.errors()[0].starts_with(SAVE_FAILED_MESSAGE));
}

#[test]
fn successful_save_reports_no_error() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let config = same_origin_config(&store);
    let notifier = RecordingNotifier::default();
    let reloader = RecordingReloader::default();

    set_backend_url(&config, "https://api.example.com", &notifier, &reloader)?;

    assert!(notifier.errors().is_empty());
    Ok(())
}
