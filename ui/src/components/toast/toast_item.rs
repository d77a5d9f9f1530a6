use crate::contexts::toast::{Toast, ToastAction, ToastState, ToastType};
use yew::prelude::*;
use yewdux::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

/// One notification. Errors are announced assertively to screen readers.
#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let dispatch = use_dispatch::<ToastState>();
    let toast = &props.toast;

    let (kind, role) = match toast.toast_type {
        ToastType::Error => ("cl-toast-error", "alert"),
        ToastType::Info => ("cl-toast-info", "status"),
    };

    let dismiss = {
        let id = toast.id;
        dispatch.apply_callback(move |_: MouseEvent| ToastAction::Remove(id))
    };

    html! {
        <div class={classes!("cl-toast", kind)} {role}>
            <span class="cl-toast-message">{&toast.message}</span>
            <button class="cl-toast-dismiss" aria-label="Dismiss" onclick={dismiss}>
                {"×"}
            </button>
        </div>
    }
}
