use backend_url::{KeyValueStore, StoreError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::window;

/// The page's `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(js_error)?
            .ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }
}

/// Exceptions such as `QuotaExceededError` are reported by name.
fn js_error(e: JsValue) -> StoreError {
    let message = match e.dyn_ref::<js_sys::Error>() {
        Some(error) => format!("{}: {}", error.name(), error.message()),
        None => e.as_string().unwrap_or_else(|| format!("{e:?}")),
    };
    StoreError::Js(message)
}
