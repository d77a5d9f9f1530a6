use super::ToastItem;
use crate::contexts::toast::ToastState;
use yew::prelude::*;
use yewdux::prelude::*;

#[function_component]
pub fn ToastContainer() -> Html {
    let (state, _) = use_store::<ToastState>();

    if state.toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="cl-toasts">
            {for state.toasts.iter().map(|toast| {
                html! {
                    <ToastItem key={toast.id.to_string()} toast={toast.clone()} />
                }
            })}
        </div>
    }
}
