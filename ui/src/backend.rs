//! The page's backend URL, resolved once and shared with the rest of the
//! frontend.

use backend_url::{
    APIClient, BackendConfig, BackendUrl, Reloader, StoreError, Subscription,
};
use gloo_timers::callback::Timeout;
use std::time::Duration;
use wasm_bindgen::JsValue;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::contexts::toast::ToastNotifier;
use crate::storage::LocalStorage;
use crate::stores::dispatch;

/// Name of the `window` property mirroring the effective URL for plain
/// scripts on the page.
pub const WINDOW_PROPERTY: &str = "API_BASE_URL";

/// Mirrors the effective backend URL for components.
#[derive(Default, Clone, PartialEq, Store)]
pub struct BackendState {
    pub url: BackendUrl,
}

struct Backend {
    config: BackendConfig<LocalStorage>,
    _sync: Subscription,
}

impl Backend {
    fn load() -> Self {
        let config = BackendConfig::load(
            &page_origin(),
            option_env!("BACKEND_URL"),
            LocalStorage,
        );
        publish(&config.url());

        let sync = config.subscribe(publish);
        Self {
            config,
            _sync: sync,
        }
    }
}

thread_local! {
    static BACKEND: Backend = Backend::load();
}

fn publish(url: &BackendUrl) {
    let url = url.clone();
    expose_on_window(&url);
    dispatch::<BackendState>().set(BackendState { url });
}

fn expose_on_window(url: &BackendUrl) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = js_sys::Reflect::set(
        &window,
        &JsValue::from_str(WINDOW_PROPERTY),
        &JsValue::from_str(url.as_str()),
    ) {
        tracing::warn!("Could not set window.{WINDOW_PROPERTY}: {e:?}");
    }
}

/// Origin of the current page, or empty outside a browser.
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// The effective backend URL. The first call resolves it from local
/// storage.
pub fn current_url() -> BackendUrl {
    BACKEND.with(|backend| backend.config.url())
}

/// Save a new backend URL and reload the page shortly after.
///
/// A failed save is shown as an error toast and nothing else happens.
pub fn set_backend_url(url: &str) -> Result<BackendUrl, StoreError> {
    BACKEND.with(|backend| {
        backend_url::set_backend_url(
            &backend.config,
            url,
            &ToastNotifier,
            &PageReloader,
        )
    })
}

/// Client for the effective backend.
pub fn api_client() -> APIClient {
    APIClient::new(&current_url(), &page_origin())
}

/// Reloads the page with `location.reload()` once the delay has passed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageReloader;

impl Reloader for PageReloader {
    fn schedule_reload(&self, delay: Duration) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, || {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().reload() {
                tracing::error!("Page reload failed: {e:?}");
            }
        })
        .forget();
    }
}

/// Current backend URL and a callback that saves a new one.
#[hook]
pub fn use_backend_url() -> (BackendUrl, Callback<String>) {
    let (state, _) = use_store::<BackendState>();

    let setter = use_callback((), move |url: String, _| {
        // Failures are shown as a toast.
        let _ = set_backend_url(&url);
    });

    (state.url.clone(), setter)
}
