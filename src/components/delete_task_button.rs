//! Delete Task Button
//!
//! Two-step delete for a task card: the first click asks about the named
//! task, the second sends the request. A failed request offers a retry.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_board::TaskId;

use crate::context::use_board;

/// Longest task name quoted in the prompt
const PROMPT_NAME_CHARS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeleteStep {
    Idle,
    Confirming,
    Deleting,
    Failed,
}

/// Question shown next to the confirm button
fn confirm_prompt(name: &str, step: DeleteStep) -> String {
    match step {
        DeleteStep::Failed => "Delete failed. Retry?".to_string(),
        DeleteStep::Deleting => "Deleting...".to_string(),
        _ => {
            let mut short: String = name.chars().take(PROMPT_NAME_CHARS).collect();
            if name.chars().count() > PROMPT_NAME_CHARS {
                short.push('…');
            }
            format!("Delete \"{}\"?", short)
        }
    }
}

#[component]
pub fn DeleteTaskButton(id: TaskId, #[prop(into)] name: Signal<String>) -> impl IntoView {
    let ctx = use_board();
    let (step, set_step) = signal(DeleteStep::Idle);

    let confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if step.get_untracked() == DeleteStep::Deleting {
            return;
        }
        set_step.set(DeleteStep::Deleting);
        let id = id.clone();
        let controller = ctx.controller();
        spawn_local(async move {
            // On success the card goes away with the refetch
            match controller.delete_task(&id).await {
                Ok(()) => set_step.try_set(DeleteStep::Idle),
                Err(_) => set_step.try_set(DeleteStep::Failed),
            };
        });
    };

    view! {
        <Show
            when=move || step.get() != DeleteStep::Idle
            fallback=move || view! {
                <button
                    class="item-delete-btn"
                    title="Delete task"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_step.set(DeleteStep::Confirming);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm" class:failed=move || step.get() == DeleteStep::Failed>
                <span class="delete-confirm-text">{move || name.with(|n| confirm_prompt(n, step.get()))}</span>
                <button
                    class="confirm-btn"
                    disabled=move || step.get() == DeleteStep::Deleting
                    on:click=confirm.clone()
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    disabled=move || step.get() == DeleteStep::Deleting
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_step.set(DeleteStep::Idle);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
