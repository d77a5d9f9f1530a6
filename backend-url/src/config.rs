//! The backend URL as an explicit, observable configuration value.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::{
    BackendUrl, KeyValueStore, RELOAD_DELAY, SAVE_FAILED_MESSAGE, STORAGE_KEY,
    StoreError, UPDATED_MESSAGE, resolve,
};

type Listener = Rc<dyn Fn(&BackendUrl)>;

#[derive(Default)]
struct Shared {
    url: RefCell<BackendUrl>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

/// Holds the effective backend URL and the store it is persisted in.
///
/// Components that build API requests take a reference to this rather than
/// reading a global. Those that must react to changes without waiting for a
/// reload can [`subscribe`](Self::subscribe).
pub struct BackendConfig<S> {
    store: S,
    shared: Rc<Shared>,
}

impl<S: KeyValueStore> BackendConfig<S> {
    /// Resolve the effective URL from `store`, falling back to a default
    /// derived from `origin`.
    pub fn load(origin: &str, build_default: Option<&str>, store: S) -> Self {
        let url = resolve(origin, build_default, &store);
        Self::new(url, store)
    }

    pub fn new(url: BackendUrl, store: S) -> Self {
        let shared = Shared {
            url: RefCell::new(url),
            ..Shared::default()
        };
        Self {
            store,
            shared: Rc::new(shared),
        }
    }

    pub fn url(&self) -> BackendUrl {
        self.shared.url.borrow().clone()
    }

    /// Normalize and persist a new URL, then notify subscribers.
    ///
    /// Nothing changes in memory if persisting fails.
    pub fn set(&self, url: &str) -> Result<BackendUrl, StoreError> {
        let url = BackendUrl::normalize(url);
        self.store.set(STORAGE_KEY, url.as_str())?;
        *self.shared.url.borrow_mut() = url.clone();

        // Listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .shared
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&url);
        }

        Ok(url)
    }

    /// Call `listener` with every new URL until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(
        &self,
        listener: impl Fn(&BackendUrl) + 'static,
    ) -> Subscription {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        let listener: Listener = Rc::new(listener);
        self.shared.listeners.borrow_mut().push((id, listener));
        Subscription {
            id,
            shared: Rc::downgrade(&self.shared),
        }
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "the listener is removed when the subscription is dropped"]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Shows short-lived messages to the user.
pub trait Notifier {
    fn notify(&self, message: &str);

    fn error(&self, message: &str);
}

/// Applies a configuration change by reloading the page.
pub trait Reloader {
    /// Reload once after `delay`. The reload cannot be cancelled.
    fn schedule_reload(&self, delay: Duration);
}

/// Save a new backend URL, tell the user, and schedule a reload so the page
/// starts over with the new value.
///
/// Returns the normalized URL. If it could not be persisted the user is
/// shown the reason, the current URL is kept and no reload is scheduled.
pub fn set_backend_url<S: KeyValueStore>(
    config: &BackendConfig<S>,
    url: &str,
    notifier: &impl Notifier,
    reloader: &impl Reloader,
) -> Result<BackendUrl, StoreError> {
    let url = match config.set(url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Could not save backend URL {url:?}: {e}");
            notifier.error(&format!("{SAVE_FAILED_MESSAGE}: {e}"));
            return Err(e);
        }
    };
    tracing::info!("Backend API URL updated to {url}");
    notifier.notify(UPDATED_MESSAGE);
    reloader.schedule_reload(RELOAD_DELAY);
    Ok(url)
}
