//! Todo Input Component
//!
//! Form for creating new tasks in the `todo` column.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_board;

/// How long the success check mark stays visible
const SUCCESS_FLASH_MS: u32 = 2_000;

#[component]
pub fn TodoInput() -> impl IntoView {
    let ctx = use_board();

    let (text, set_text) = signal(String::new());
    let (creating, set_creating) = signal(false);
    let (show_success, set_show_success) = signal(false);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = text.get_untracked();
        if value.trim().is_empty() || creating.get_untracked() {
            return;
        }
        set_creating.set(true);

        let controller = ctx.controller();
        spawn_local(async move {
            let created = controller.create_task(&value).await;
            set_creating.try_set(false);
            // Failures are logged by the controller; keep the text for another try
            if let Ok(Some(_)) = created {
                set_text.try_set(String::new());
                set_show_success.try_set(true);
                TimeoutFuture::new(SUCCESS_FLASH_MS).await;
                set_show_success.try_set(false);
            }
        });
    };

    view! {
        <form class="todo-input-form" on:submit=create_task>
            <input
                type="text"
                class="todo-input"
                placeholder="What needs to be done?"
                prop:value=move || text.get()
                prop:disabled=move || creating.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="todo-submit"
                disabled=move || creating.get() || text.get().trim().is_empty()
            >
                {move || {
                    if creating.get() {
                        view! { <span class="spinner small"></span> }.into_any()
                    } else if show_success.get() {
                        view! { <span class="submit-icon success">"✓"</span> }.into_any()
                    } else {
                        view! { <span class="submit-icon">"+"</span> }.into_any()
                    }
                }}
            </button>
        </form>
    }
}
