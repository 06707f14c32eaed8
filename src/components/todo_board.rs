//! Todo Board Component
//!
//! Three status columns with drag-and-drop between them.
//! Uses leptos-dragdrop: task cards are draggable items, columns are drop zones.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_board::{BoardState, LoadState, TaskId, TaskStatus};

use leptos_dragdrop::*;

use crate::components::{DragPreview, ErrorAlert, Loader, TodoColumn};
use crate::context::{use_board, BoardDnd};

#[component]
pub fn TodoBoard() -> impl IntoView {
    let ctx = use_board();

    // Load tasks on mount
    Effect::new(move |_| {
        let controller = ctx.controller();
        spawn_local(async move {
            let _ = controller.refresh().await;
        });
    });

    let dnd: BoardDnd = create_dnd_signals();

    bind_gesture_handlers(
        dnd,
        move |id: TaskId| {
            tracing::debug!(task_id = %id, "[DND] drag start");
            ctx.controller().drag_start(&id);
        },
        move |id: TaskId, zone: Option<TaskStatus>| {
            let controller = ctx.controller();
            let Some(zone) = zone else {
                tracing::debug!(task_id = %id, "[DND] released outside columns");
                controller.drag_cancel();
                return;
            };
            tracing::info!(task_id = %id, %zone, "[DND] drop");
            spawn_local(async move {
                let outcome = controller.drop_task(&id, zone.as_str()).await;
                tracing::debug!(task_id = %id, ?outcome, "[DND] drop settled");
            });
        },
    );

    let load_state = Memo::new(move |_| ctx.board.with(|b| b.load_state().clone()));
    let columns = Memo::new(move |_| ctx.board.with(BoardState::columns));

    let retry = Callback::new(move |_: ()| {
        let controller = ctx.controller();
        spawn_local(async move {
            let _ = controller.refresh().await;
        });
    });

    move || match load_state.get() {
        LoadState::Loading => view! { <Loader /> }.into_any(),
        LoadState::Failed(message) => view! { <ErrorAlert message=message on_retry=retry /> }.into_any(),
        LoadState::Ready => view! {
            <div class="board-grid">
                {TaskStatus::ALL
                    .into_iter()
                    .map(|status| {
                        let tasks = Signal::derive(move || columns.with(|c| c.get(status).to_vec()));
                        view! { <TodoColumn status=status tasks=tasks dnd=dnd /> }
                    })
                    .collect_view()}
            </div>
            <DragPreview dnd=dnd />
        }
        .into_any(),
    }
}
