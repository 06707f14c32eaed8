//! Todo Column Component
//!
//! One status column: header with task count and a drop zone holding the cards.

use leptos::prelude::*;
use task_board::{DisplayTask, TaskStatus};

use leptos_dragdrop::{make_on_zone_mouseenter, make_on_zone_mouseleave};

use crate::components::TodoItem;
use crate::context::BoardDnd;

/// "1 task" / "N tasks"
fn task_count_label(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{} tasks", count)
    }
}

/// Hint shown in an empty column
fn empty_hint(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "No created tasks yet",
        TaskStatus::Doing => "Drag tasks here to get going",
        TaskStatus::Done => "Drag tasks here if it's done",
    }
}

/// Latest version of one card's task; keeps the last value once it leaves the column
fn card_signal(tasks: Signal<Vec<DisplayTask>>, initial: DisplayTask) -> Memo<DisplayTask> {
    Memo::new(move |prev: Option<&DisplayTask>| {
        tasks
            .with(|list| find_card(list, &initial.task.id).cloned())
            .or_else(|| prev.cloned())
            .unwrap_or_else(|| initial.clone())
    })
}

fn find_card<'a>(tasks: &'a [DisplayTask], id: &str) -> Option<&'a DisplayTask> {
    tasks.iter().find(|t| t.task.id == id)
}

#[component]
pub fn TodoColumn(
    status: TaskStatus,
    #[prop(into)] tasks: Signal<Vec<DisplayTask>>,
    dnd: BoardDnd,
) -> impl IntoView {
    let on_mouseenter = make_on_zone_mouseenter(dnd, status);
    let on_mouseleave = make_on_zone_mouseleave(dnd, status);

    // Highlight while a card hovers over this column
    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if dnd.is_over(&status) {
            c.push_str(" over");
        }
        c
    };

    view! {
        <section class=format!("todo-column accent-{}", status)>
            <div class="column-header">
                <h2 class="column-title">{status.title()}</h2>
                <div class="column-rule"></div>
                <div class="column-count">{move || task_count_label(tasks.with(Vec::len))}</div>
            </div>

            <div class=zone_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
                <Show
                    when=move || !tasks.with(Vec::is_empty)
                    fallback=move || view! {
                        <div class="column-empty">
                            <span class="column-empty-icon">"☰"</span>
                            <p>{empty_hint(status)}</p>
                        </div>
                    }
                >
                    <For
                        each=move || tasks.get()
                        key=|t| t.task.id.clone()
                        children=move |initial: DisplayTask| {
                            let task = card_signal(tasks, initial);
                            view! { <TodoItem task=task dnd=dnd /> }
                        }
                    />
                </Show>
            </div>
        </section>
    }
}
