use backend_url::{
    BackendConfig, KeyValueStore, MemoryStore, PLACEHOLDER_BACKEND_URL,
    STORAGE_KEY, resolve,
};
use test_helpers::init_test_logging;

#[test]
fn hosted_origin_without_saved_value_uses_placeholder() {
    init_test_logging();
    let store = MemoryStore::new();

    let url = resolve("https://my-chart.vercel.app", None, &store);

    assert_eq!(url.as_str(), PLACEHOLDER_BACKEND_URL);
}

#[test]
fn other_origin_without_saved_value_is_same_origin() {
    let store = MemoryStore::new();

    let url = resolve("http://127.0.0.1:5000", None, &store);

    assert_eq!(url.as_str(), "");
    assert!(url.is_same_origin());
}

#[test]
fn saved_value_wins_regardless_of_origin() {
    let store = MemoryStore::with_item(STORAGE_KEY, "https://api.example.com");

    for origin in ["https://my-chart.vercel.app", "http://localhost:5000"] {
        let url = resolve(origin, None, &store);
        assert_eq!(url.as_str(), "https://api.example.com");
    }
}

#[test]
fn saved_value_is_used_verbatim() {
    let store =
        MemoryStore::with_item(STORAGE_KEY, "https://api.example.com/");

    let url = resolve("http://localhost:5000", None, &store);

    assert_eq!(url.as_str(), "https://api.example.com/");
}

#[test]
fn empty_saved_value_falls_back() {
    let store = MemoryStore::with_item(STORAGE_KEY, "");

    let url = resolve("https://my-chart.vercel.app", None, &store);

    assert_eq!(url.as_str(), PLACEHOLDER_BACKEND_URL);
}

#[test]
fn build_default_does_not_override_saved_value() {
    let store = MemoryStore::with_item(STORAGE_KEY, "https://saved.example");

    let url = resolve(
        "http://localhost:5000",
        Some("https://build.example"),
        &store,
    );

    assert_eq!(url.as_str(), "https://saved.example");
}

#[test]
fn build_default_replaces_origin_fallback() {
    let store = MemoryStore::new();

    let url = resolve(
        "http://localhost:5000",
        Some("https://build.example"),
        &store,
    );

    assert_eq!(url.as_str(), "https://build.example");
}

#[test]
fn loading_does_not_write_to_storage() {
    let store = MemoryStore::new();

    let config = BackendConfig::load("https://x.vercel.app", None, &store);

    assert_eq!(config.url().as_str(), PLACEHOLDER_BACKEND_URL);
    assert_eq!(store.get(STORAGE_KEY), Ok(None));
}
