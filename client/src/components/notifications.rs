//! Toast list for persistence failures and other passive notices.

use leptos::prelude::*;

use crate::state::notify::{NotifyLevel, NotifyState};

/// Dismissable toast stack, newest at the bottom.
#[component]
pub fn Notifications() -> impl IntoView {
    let notify = expect_context::<RwSignal<NotifyState>>();

    view! {
        <div class="notifications">
            {move || {
                notify
                    .get()
                    .items()
                    .iter()
                    .map(|item| {
                        let id = item.id;
                        let is_error = item.level == NotifyLevel::Error;
                        view! {
                            <div class="notifications__toast" class:notifications__toast--error=is_error>
                                <span class="notifications__message">{item.message.clone()}</span>
                                <button
                                    class="notifications__dismiss"
                                    on:click=move |_| notify.update(|n| n.dismiss(id))
                                    aria-label="Dismiss"
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
