//! Todo Item Component
//!
//! A draggable task card with inline text editing and delete.
//! The card lives as long as its task id; name, status and pending marker
//! follow the task signal, so edits survive optimistic updates.

use chrono::{DateTime, TimeZone};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use task_board::{ActionOutcome, DisplayTask};

use leptos_dragdrop::make_on_mousedown;

use crate::components::DeleteTaskButton;
use crate::context::{use_board, BoardDnd};

/// Creation stamp as shown on the card, e.g. `8/26/2025 - 9:20`
fn format_created<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y - %-H:%M").to_string()
}

#[component]
pub fn TodoItem(#[prop(into)] task: Signal<DisplayTask>, dnd: BoardDnd) -> impl IntoView {
    let ctx = use_board();

    // Keyed by id, so the id never changes for this card
    let id = task.with_untracked(|t| t.task.id.clone());
    let name = Signal::derive(move || task.with(|t| t.task.name.clone()));
    let status = move || task.with(|t| t.task.status);
    let created = move || task.with(|t| format_created(&t.task.created_at.with_timezone(&chrono::Local)));

    let (editing, set_editing) = signal(false);
    let (edit_text, set_edit_text) = signal(String::new());
    let (saving, set_saving) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    // Focus the edit box when it appears
    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    });

    let start_edit = move |_: web_sys::MouseEvent| {
        set_edit_text.set(name.get_untracked());
        set_editing.set(true);
    };

    // Enter and blur both save; only the first one goes out.
    // Blur can also arrive while the card is being torn down.
    let save = {
        let id = id.clone();
        Callback::new(move |_: ()| {
            if saving.try_get_untracked().unwrap_or(true) || !editing.try_get_untracked().unwrap_or(false) {
                return;
            }
            let Some(text) = edit_text.try_get_untracked() else {
                return;
            };
            set_saving.set(true);
            let id = id.clone();
            let controller = ctx.controller();
            spawn_local(async move {
                let outcome = controller.rename_task(&id, &text).await;
                set_saving.try_set(false);
                // A rolled-back edit keeps the editor open with the rejected text
                if outcome != ActionOutcome::RolledBack {
                    set_editing.try_set(false);
                }
            });
        })
    };

    let cancel = Callback::new(move |_: ()| {
        set_editing.set(false);
    });

    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let card_class = {
        let id = id.clone();
        move || {
            let mut c = String::from("todo-item");
            if dnd.is_dragging(&id) {
                c.push_str(" dragging");
            }
            if task.with(|t| t.pending) {
                c.push_str(" pending");
            }
            c
        }
    };

    view! {
        <div class=card_class on:mousedown=on_mousedown>
            <div class=move || format!("todo-item-row accent-{}", status())>
                <div class="todo-item-main">
                    <Show
                        when=move || editing.get()
                        fallback=move || view! {
                            <div class="todo-item-view">
                                <span class="status-dot"></span>
                                <div class="todo-item-body">
                                    <p class="item-name">{name}</p>
                                    <div class="item-meta">
                                        <span class="status-badge">{move || status().label()}</span>
                                        <span class="item-created">{created}</span>
                                    </div>
                                </div>
                            </div>
                        }
                    >
                        <input
                            type="text"
                            class="item-edit-input"
                            node_ref=input_ref
                            prop:value=move || edit_text.get()
                            prop:disabled=move || saving.get()
                            on:input=move |ev| set_edit_text.set(event_target_value(&ev))
                            on:blur=move |_| save.run(())
                            on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                "Enter" => save.run(()),
                                "Escape" => cancel.run(()),
                                _ => {}
                            }
                        />
                    </Show>
                </div>

                <Show when=move || !editing.get()>
                    <div class="item-actions">
                        <button class="item-edit-btn" title="Edit task" on:click=start_edit>
                            "✎"
                        </button>
                        <DeleteTaskButton id=id.clone() name=name />
                    </div>
                </Show>
            </div>
        </div>
    }
}
