use crate::{
    BackendUrl, HOSTED_ORIGIN_MARKER, KeyValueStore, PLACEHOLDER_BACKEND_URL,
    STORAGE_KEY,
};

/// The backend to use when nothing has been saved.
///
/// A non-empty `build_default` (baked in at compile time) takes precedence.
/// Otherwise static deployments get the placeholder and everything else
/// talks to its own origin.
pub fn default_backend_url(
    origin: &str,
    build_default: Option<&str>,
) -> BackendUrl {
    if let Some(url) = build_default.filter(|url| !url.is_empty()) {
        return BackendUrl::normalize(url);
    }
    if origin.contains(HOSTED_ORIGIN_MARKER) {
        BackendUrl::verbatim(PLACEHOLDER_BACKEND_URL)
    } else {
        BackendUrl::same_origin()
    }
}

/// Determine the effective backend URL at page load.
///
/// A saved, non-empty value is used as-is. Read failures are logged and
/// treated as if nothing was saved.
pub fn resolve(
    origin: &str,
    build_default: Option<&str>,
    store: &impl KeyValueStore,
) -> BackendUrl {
    let stored = match store.get(STORAGE_KEY) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Could not read {STORAGE_KEY}: {e}");
            None
        }
    };

    let url = match stored {
        Some(url) if !url.is_empty() => BackendUrl::verbatim(url),
        _ => default_backend_url(origin, build_default),
    };

    tracing::info!("Current Backend API URL: {url}");
    url
}
