use backend_url::Notifier;
use std::rc::Rc;
use uuid::Uuid;
use yewdux::prelude::*;

use crate::stores::dispatch;

#[derive(Debug, Clone, PartialEq)]
pub enum ToastType {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    pub duration: Option<u32>, // milliseconds, None for no auto-dismiss
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            toast_type,
            duration: Some(5000), // 5 seconds default
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastType::Info)
    }
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, PartialEq, Default, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducer<ToastState> for ToastAction {
    fn apply(self, state: Rc<ToastState>) -> Rc<ToastState> {
        let mut toasts = state.toasts.clone();

        match self {
            ToastAction::Add(toast) => toasts.push(toast),
            ToastAction::Remove(id) => toasts.retain(|toast| toast.id != id),
        }

        Rc::new(ToastState { toasts })
    }
}

/// Show a toast, removing it again once its duration has passed.
pub fn show(toast: Toast) {
    let toast_id = toast.id;
    let duration = toast.duration;
    let dispatch = dispatch::<ToastState>();

    dispatch.apply(ToastAction::Add(toast));

    if let Some(duration_ms) = duration {
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(duration_ms).await;
            dispatch.apply(ToastAction::Remove(toast_id));
        });
    }
}

/// Sends configuration messages to the toast overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str) {
        show(Toast::info(message.to_string()));
    }

    fn error(&self, message: &str) {
        show(Toast::error(message.to_string()));
    }
}
