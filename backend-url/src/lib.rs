//! Backend address configuration for the charting frontend.
//!
//! The frontend talks to a backend whose base URL is chosen at page load:
//! a value saved in the browser's local storage wins, otherwise a default
//! derived from where the page is hosted is used. The URL can be changed at
//! runtime with [`set_backend_url`], which persists it and asks the page to
//! reload.
//!
//! Everything here is independent of the browser. Storage, notification and
//! reloading are reached through the [`KeyValueStore`], [`Notifier`] and
//! [`Reloader`] traits so the `ui` crate can plug in `localStorage`, toasts
//! and `location.reload()`.

pub mod api_client;
pub mod config;
pub mod resolve;
pub mod responses;
pub mod store;
mod url;

use std::time::Duration;

pub use api_client::{APIClient, ClientError};
pub use config::{
    BackendConfig, Notifier, Reloader, Subscription, set_backend_url,
};
pub use resolve::{default_backend_url, resolve};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use url::BackendUrl;

/// Local storage key holding the user-chosen backend URL.
pub const STORAGE_KEY: &str = "CL_BACKEND_URL";

/// Origins containing this are static deployments with no backend of their
/// own.
pub const HOSTED_ORIGIN_MARKER: &str = "vercel.app";

/// Fallback backend for static deployments until the user sets a real one.
pub const PLACEHOLDER_BACKEND_URL: &str = "https://your-backend-api.com";

/// Delay between saving a new backend URL and reloading the page.
pub const RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// Shown after the backend URL has been saved.
pub const UPDATED_MESSAGE: &str = "后端地址已更新，即将刷新页面";

/// Prefix of the error shown when the backend URL could not be saved.
pub const SAVE_FAILED_MESSAGE: &str = "后端地址保存失败";
