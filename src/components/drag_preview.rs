//! Drag Preview Component
//!
//! Floating copy of the dragged card that follows the pointer.

use leptos::prelude::*;
use task_board::BoardState;

use crate::context::{use_board, BoardDnd};

/// Offset so the preview does not sit under the cursor
const POINTER_OFFSET_PX: i32 = 12;

#[component]
pub fn DragPreview(dnd: BoardDnd) -> impl IntoView {
    let ctx = use_board();
    let active = Memo::new(move |_| ctx.board.with(BoardState::active_task));

    let position = move || {
        let (x, y) = dnd.pointer.get();
        format!("left: {}px; top: {}px;", x + POINTER_OFFSET_PX, y + POINTER_OFFSET_PX)
    };

    move || {
        active.get().map(|task| {
            let status = task.task.status;
            view! {
                <div class=format!("drag-preview accent-{}", status) style=position>
                    <span class="status-dot"></span>
                    <div class="drag-preview-body">
                        <p class="item-name">{task.task.name}</p>
                        <span class="status-badge">{status.label()}</span>
                    </div>
                </div>
            }
        })
    }
}
