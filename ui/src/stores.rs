//! Dispatch to shared stores from outside any component.
//!
//! The JS-facing functions and timers update stores directly. In the browser
//! they use yewdux's global context, the same one `use_store` falls back to,
//! so the overlay needs no provider. Native builds have no global context and
//! get one per thread instead.

use yewdux::prelude::*;

#[cfg(target_arch = "wasm32")]
pub fn dispatch<S: Store>() -> Dispatch<S> {
    Dispatch::global()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn dispatch<S: Store>() -> Dispatch<S> {
    thread_local! {
        static CONTEXT: yewdux::Context = yewdux::Context::new();
    }
    CONTEXT.with(Dispatch::new)
}
