//! Recording stand-ins for the browser side effects of changing the backend.

use backend_url::{Notifier, Reloader};
use std::cell::RefCell;
use std::time::Duration;

/// Remembers every message instead of showing a toast.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

/// Remembers every requested reload delay instead of reloading.
#[derive(Debug, Default)]
pub struct RecordingReloader {
    delays: RefCell<Vec<Duration>>,
}

impl RecordingReloader {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

impl Reloader for RecordingReloader {
    fn schedule_reload(&self, delay: Duration) {
        self.delays.borrow_mut().push(delay);
    }
}
