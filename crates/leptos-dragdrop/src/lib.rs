//! Leptos DragDrop Utilities
//!
//! Pointer-event drag-and-drop for Leptos. Draggable items carry a stable
//! item id, drop zones carry a zone id, and a finished gesture yields an
//! `(item, Option<zone>)` pair. Uses a movement threshold to distinguish
//! click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 8;

/// Mousedown that has not yet travelled far enough to be a drag
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPress<I> {
    pub item: I,
    pub start_x: i32,
    pub start_y: i32,
}

/// DnD state signals, generic over item id `I` and zone id `Z`
pub struct DndSignals<I: Send + Sync + 'static, Z: Send + Sync + 'static> {
    /// Item currently being dragged
    pub dragging: RwSignal<Option<I>>,
    /// Zone under the pointer while dragging
    pub over_zone: RwSignal<Option<Z>>,
    /// Press waiting for the movement threshold
    pub pending: RwSignal<Option<PendingPress<I>>>,
    /// Last pointer position during a drag (client coordinates)
    pub pointer: RwSignal<(i32, i32)>,
}

impl<I: Send + Sync + 'static, Z: Send + Sync + 'static> Clone for DndSignals<I, Z> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: Send + Sync + 'static, Z: Send + Sync + 'static> Copy for DndSignals<I, Z> {}

impl<I, Z> DndSignals<I, Z>
where
    I: Clone + PartialEq + Send + Sync + 'static,
    Z: Clone + PartialEq + Send + Sync + 'static,
{
    /// Is `item` the one being dragged?
    pub fn is_dragging(&self, item: &I) -> bool {
        self.dragging.with(|d| d.as_ref() == Some(item))
    }

    /// Is the pointer over `zone` during a drag?
    pub fn is_over(&self, zone: &Z) -> bool {
        self.over_zone.with(|z| z.as_ref() == Some(zone))
    }
}

pub fn create_dnd_signals<I, Z>() -> DndSignals<I, Z>
where
    I: Send + Sync + 'static,
    Z: Send + Sync + 'static,
{
    DndSignals {
        dragging: RwSignal::new(None),
        over_zone: RwSignal::new(None),
        pending: RwSignal::new(None),
        pointer: RwSignal::new((0, 0)),
    }
}

/// Has the pointer moved far enough from the press to start a drag?
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// End drag operation
pub fn end_drag<I, Z>(dnd: &DndSignals<I, Z>)
where
    I: Send + Sync + 'static,
    Z: Send + Sync + 'static,
{
    dnd.dragging.try_set(None);
    dnd.over_zone.try_set(None);
    dnd.pending.try_set(None);
}

/// Is the event aimed at a form control that must keep its own pointer behaviour?
fn targets_control(ev: &web_sys::MouseEvent) -> bool {
    let Some(target) = ev.target() else {
        return false;
    };
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<I, Z>(dnd: DndSignals<I, Z>, item: I) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    I: Clone + Send + Sync + 'static,
    Z: Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || targets_control(&ev) {
            return;
        }
        dnd.pending.set(Some(PendingPress {
            item: item.clone(),
            start_x: ev.client_x(),
            start_y: ev.client_y(),
        }));
    }
}

/// Create mouseenter handler for drop zones
pub fn make_on_zone_mouseenter<I, Z>(dnd: DndSignals<I, Z>, zone: Z) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    I: Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(Option::is_some) {
            dnd.over_zone.set(Some(zone.clone()));
        }
    }
}

/// Create mouseleave handler for drop zones
pub fn make_on_zone_mouseleave<I, Z>(dnd: DndSignals<I, Z>, zone: Z) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    I: Send + Sync + 'static,
    Z: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        // Entering the next zone may already have replaced us
        if dnd.over_zone.with_untracked(|z| z.as_ref() == Some(&zone)) {
            dnd.over_zone.set(None);
        }
    }
}

/// Bind document-level mousemove/mouseup listeners for one board.
///
/// `on_start(item)` fires when a press crosses the threshold.
/// `on_end(item, Some(zone))` is a drop, `on_end(item, None)` a drag released outside any zone.
/// Listeners outlive the view; once its signals are disposed they do nothing.
pub fn bind_gesture_handlers<I, Z, S, E>(dnd: DndSignals<I, Z>, on_start: S, on_end: E)
where
    I: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
    S: Fn(I) + 'static,
    E: Fn(I, Option<Z>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(is_dragging) = dnd.dragging.try_with_untracked(Option::is_some) else {
            return;
        };
        let position = (ev.client_x(), ev.client_y());
        if is_dragging {
            dnd.pointer.set(position);
            return;
        }

        let Some(Some(press)) = dnd.pending.try_get_untracked() else {
            return;
        };
        if exceeds_threshold((press.start_x, press.start_y), position) {
            dnd.pointer.set(position);
            dnd.dragging.set(Some(press.item.clone()));
            on_start(press.item);
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging.try_get_untracked() else {
            return;
        };
        let zone = dnd.over_zone.try_get_untracked().flatten();

        // Clear pending state first
        dnd.pending.try_set(None);

        // Plain click (no drag): the click event fires on the element as usual
        if let Some(item) = dragging {
            end_drag(&dnd);
            on_end(item, zone);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();
}
