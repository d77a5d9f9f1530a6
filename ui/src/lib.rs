//! Browser side of the backend URL configuration.
//!
//! On start the effective backend URL is resolved from `localStorage` and
//! published as `window.API_BASE_URL`. Page scripts change it through
//! `setBackendUrl(url)`, which saves the value, shows a toast and reloads
//! the page.

use wasm_bindgen::prelude::*;
use yew::prelude::*;

mod backend;
mod components;
mod contexts;
mod logs;
mod storage;
mod stores;

pub use backend::{
    BackendState, PageReloader, api_client, current_url, page_origin,
    use_backend_url,
};
pub use components::ToastContainer;
pub use contexts::toast::ToastNotifier;
pub use storage::LocalStorage;

/// Id of the element the toast overlay is rendered into.
const OVERLAY_ID: &str = "cl-backend-overlay";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logs::init_logging();
    current_url();

    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    install_globals(&window)?;

    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let Some(body) = document.body() else {
        tracing::warn!("No <body>, toasts will not be shown");
        return Ok(());
    };
    let root = document.create_element("div")?;
    root.set_id(OVERLAY_ID);
    body.append_child(&root)?;
    yew::Renderer::<Overlay>::with_root(root).render();

    Ok(())
}

/// The effective backend URL, without a trailing slash. Empty means the
/// page's own origin.
#[wasm_bindgen(js_name = apiBaseUrl)]
pub fn api_base_url() -> String {
    current_url().into_string()
}

/// Save a new backend URL and reload the page after a short delay.
#[wasm_bindgen(js_name = setBackendUrl)]
pub fn set_backend_url(url: String) {
    // Failures are logged and shown as a toast.
    let _ = backend::set_backend_url(&url);
}

/// Also expose `setBackendUrl` and `apiBaseUrl` on `window` for inline
/// scripts and the devtools console.
fn install_globals(window: &web_sys::Window) -> Result<(), JsValue> {
    let setter = Closure::<dyn Fn(String)>::new(set_backend_url);
    let getter = Closure::<dyn Fn() -> String>::new(api_base_url);
    for (name, function) in [
        ("setBackendUrl", setter.as_ref()),
        ("apiBaseUrl", getter.as_ref()),
    ] {
        js_sys::Reflect::set(window, &JsValue::from_str(name), function)?;
    }
    // Both live for the rest of the page.
    setter.forget();
    getter.forget();
    Ok(())
}

#[function_component]
fn Overlay() -> Html {
    html! { <ToastContainer /> }
}
