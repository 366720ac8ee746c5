//! Pointer-driven browser adapter for drag-to-sort.
//!
//! Wires pointer events on a container element to a [`SortController`].
//! The container is the drop target; children marked with
//! `data-rowkit-item` are the sortable items, and a descendant marked
//! with `data-rowkit-handle` starts the gesture. While a drag is live
//! the original row is display-hidden behind a placeholder of equal
//! height, a cloned ghost follows the (clamped) pointer, and the other
//! rows step aside via CSS transforms.
//!
//! Every termination path (pointerup, pointercancel, lostpointercapture,
//! window blur) funnels into the same cleanup, so no ghost, placeholder,
//! or transform outlives its gesture.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, PointerEvent};

use crate::error::Result;
use crate::reorder::{
    item_shift, reorder_items, DragAnalysis, DragFrame, PointerUpdate, SortController,
};
use crate::types::{ItemBounds, Rect};

/// Attribute marking a direct child as a sortable item.
const ITEM_ATTR: &str = "data-rowkit-item";
/// Attribute marking the drag handle inside an item.
const HANDLE_ATTR: &str = "data-rowkit-handle";

/// Shared state for the pointer closures.
struct SortState {
    controller: SortController,
    container: HtmlElement,
    /// Handle pressed at pointerdown; captures the pointer on drag start
    pending_handle: Option<HtmlElement>,
    /// Pointer currently captured by the handle, if any
    captured_pointer_id: Option<i32>,
    /// Item elements snapshotted at drag start, in index order
    item_elements: Vec<HtmlElement>,
    dragged: Option<HtmlElement>,
    ghost: Option<HtmlElement>,
    placeholder: Option<HtmlElement>,
    items: Option<js_sys::Array>,
    on_sort: Option<Function>,
}

/// WASM-exported drag-to-sort controller for one container element.
///
/// ```javascript
/// const sortable = new SortableList(container);
/// sortable.set_items(rows);
/// sortable.set_on_sort((newRows) => { rows = newRows; render(); });
/// ```
#[wasm_bindgen]
pub struct SortableList {
    state: Rc<RefCell<SortState>>,
    closures: Vec<Closure<dyn FnMut(PointerEvent)>>,
    blur_closure: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl SortableList {
    /// Attach pointer listeners to `container` and return the controller.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> SortableList {
        console_error_panic_hook::set_once();
        let state = Rc::new(RefCell::new(SortState {
            controller: SortController::new(),
            container: container.clone(),
            pending_handle: None,
            captured_pointer_id: None,
            item_elements: Vec::new(),
            dragged: None,
            ghost: None,
            placeholder: None,
            items: None,
            on_sort: None,
        }));

        let mut sortable = SortableList {
            state,
            closures: Vec::new(),
            blur_closure: None,
        };
        sortable.register_listeners(&container);
        sortable
    }

    /// Provide the array handed back (reordered) to `on_sort` on commit.
    pub fn set_items(&mut self, items: js_sys::Array) {
        self.state.borrow_mut().items = Some(items);
    }

    /// Callback invoked with the reordered array after a committed drag.
    pub fn set_on_sort(&mut self, f: Function) {
        self.state.borrow_mut().on_sort = Some(f);
    }

    /// Drag threshold in pixels (default 4).
    pub fn set_threshold(&mut self, threshold: f32) {
        self.state.borrow_mut().controller = SortController::with_threshold(threshold);
    }

    /// True while a gesture owns the container.
    pub fn is_sorting(&self) -> bool {
        self.state.borrow().controller.is_sorting()
    }
}

impl SortableList {
    fn register_listeners(&mut self, container: &HtmlElement) {
        // Pointer down
        {
            let state = Rc::clone(&self.state);
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                Self::internal_pointer_down(&state, &event);
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
                .ok();
            self.closures.push(closure);
        }

        // Pointer move
        {
            let state = Rc::clone(&self.state);
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                Self::internal_pointer_move(&state, &event);
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
                .ok();
            self.closures.push(closure);
        }

        // Pointer up
        {
            let state = Rc::clone(&self.state);
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                Self::internal_pointer_up(&state, &event);
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())
                .ok();
            self.closures.push(closure);
        }

        // Cancel paths: pointercancel and capture loss reach the same
        // cleanup as window blur.
        for event_name in ["pointercancel", "lostpointercapture"] {
            let state = Rc::clone(&self.state);
            let closure = Closure::wrap(Box::new(move |_event: PointerEvent| {
                Self::internal_cancel(&state);
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
                .ok();
            self.closures.push(closure);
        }

        if let Some(window) = web_sys::window() {
            let state = Rc::clone(&self.state);
            let closure = Closure::wrap(Box::new(move || {
                Self::internal_cancel(&state);
            }) as Box<dyn FnMut()>);
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                .ok();
            self.blur_closure = Some(closure);
        }
    }

    fn internal_pointer_down(state: &Rc<RefCell<SortState>>, event: &PointerEvent) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(handle)) = target.closest(&format!("[{HANDLE_ATTR}]")) else {
            return;
        };
        let Ok(Some(item)) = handle.closest(&format!("[{ITEM_ATTR}]")) else {
            return;
        };

        let mut s = state.borrow_mut();
        let elements = Self::collect_items(&s.container);
        let Some(index) = elements.iter().position(|el| {
            let el: &Element = el.as_ref();
            el == &item
        }) else {
            return;
        };

        let armed =
            s.controller
                .pointer_down(event.pointer_id(), event.client_y() as f32, index);
        if armed {
            s.pending_handle = handle.dyn_into::<HtmlElement>().ok();
        }
    }

    fn internal_pointer_move(state: &Rc<RefCell<SortState>>, event: &PointerEvent) {
        let mut s = state.borrow_mut();
        let s = &mut *s;
        let container = s.container.clone();
        let update = s.controller.pointer_move(
            event.pointer_id(),
            event.client_y() as f32,
            |item_index| Self::analyze(&container, item_index),
        );
        match update {
            Ok(PointerUpdate::Started(frame)) => {
                Self::begin_drag_visuals(s, event.pointer_id(), &frame);
                Self::apply_frame(s, &frame);
            }
            Ok(PointerUpdate::Moved(frame)) => Self::apply_frame(s, &frame),
            Ok(PointerUpdate::Ignored) => {}
            Err(e) => web_sys::console::warn_1(&JsValue::from_str(&e.to_string())),
        }
    }

    fn internal_pointer_up(state: &Rc<RefCell<SortState>>, event: &PointerEvent) {
        let (commit, on_sort, items) = {
            let mut s = state.borrow_mut();
            let commit = s.controller.pointer_up(event.pointer_id());
            Self::cleanup_visuals(&mut s);
            (commit, s.on_sort.clone(), s.items.clone())
        };

        let Some(commit) = commit else {
            return;
        };
        if commit.from == commit.to {
            return;
        }

        // Reorder the host's array and hand it back.
        let Some(items) = items else {
            return;
        };
        let mut values: Vec<JsValue> = items.iter().collect();
        reorder_items(&mut values, commit.from, commit.to);
        let reordered = js_sys::Array::new();
        for value in &values {
            reordered.push(value);
        }
        {
            let mut s = state.borrow_mut();
            s.items = Some(reordered.clone());
        }
        if let Some(on_sort) = on_sort {
            let _ = on_sort.call1(&JsValue::NULL, &reordered);
        }
    }

    fn internal_cancel(state: &Rc<RefCell<SortState>>) {
        let mut s = state.borrow_mut();
        if s.controller.cancel() || s.pending_handle.is_some() {
            Self::cleanup_visuals(&mut s);
        }
    }

    /// Direct children marked as sortable items, in DOM order.
    fn collect_items(container: &HtmlElement) -> Vec<HtmlElement> {
        let children = container.children();
        let mut items = Vec::with_capacity(children.length() as usize);
        for i in 0..children.length() {
            let Some(child) = children.item(i) else {
                continue;
            };
            if !child.has_attribute(ITEM_ATTR) {
                continue;
            }
            if let Ok(el) = child.dyn_into::<HtmlElement>() {
                items.push(el);
            }
        }
        items
    }

    /// Measure the container and every item; DOM order is index order.
    fn analyze(container: &HtmlElement, item_index: usize) -> Result<DragAnalysis> {
        let container_rect = dom_rect(container);
        let elements = Self::collect_items(container);
        let bounds: Vec<ItemBounds> = elements
            .iter()
            .map(|el| ItemBounds::with_margins(dom_rect(el), margin(el, "margin-top"), margin(el, "margin-bottom")))
            .collect();
        DragAnalysis::new(container_rect, &bounds, item_index)
    }

    /// Entry to dragging: capture the pointer, clone a ghost at the
    /// dragged item's rect, hide the original behind a placeholder.
    fn begin_drag_visuals(s: &mut SortState, pointer_id: i32, frame: &DragFrame) {
        if let Some(handle) = &s.pending_handle {
            let _ = handle.set_pointer_capture(pointer_id);
            s.captured_pointer_id = Some(pointer_id);
        }

        s.item_elements = Self::collect_items(&s.container);
        let Some(dragged) = s.item_elements.get(frame.item_index).cloned() else {
            return;
        };
        let rect = dom_rect(&dragged);
        let container_rect = dom_rect(&s.container);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Ghost: deep clone, absolutely positioned over the original.
        if let Ok(node) = dragged.clone_node_with_deep(true) {
            if let Ok(ghost) = node.dyn_into::<HtmlElement>() {
                let style = ghost.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("left", &format!("{}px", rect.left - container_rect.left));
                let _ = style.set_property("top", &format!("{}px", rect.top - container_rect.top));
                let _ = style.set_property("width", &format!("{}px", rect.width()));
                let _ = style.set_property("height", &format!("{}px", rect.height()));
                let _ = style.set_property("pointer-events", "none");
                let _ = style.set_property("z-index", "1000");
                let _ = s.container.append_child(&ghost);
                s.ghost = Some(ghost);
            }
        }

        // Placeholder keeps the list from collapsing around the hidden
        // original.
        if let Ok(el) = document.create_element("div") {
            if let Ok(placeholder) = el.dyn_into::<HtmlElement>() {
                let _ = placeholder
                    .style()
                    .set_property("height", &format!("{}px", rect.height()));
                if let Some(parent) = dragged.parent_node() {
                    let _ = parent.insert_before(&placeholder, Some(&dragged));
                }
                s.placeholder = Some(placeholder);
            }
        }

        let _ = dragged.style().set_property("display", "none");
        s.dragged = Some(dragged);
    }

    /// Move the ghost by the clamped delta; when the destination moved,
    /// re-run the shift calculator over the non-dragged items.
    fn apply_frame(s: &mut SortState, frame: &DragFrame) {
        if let Some(ghost) = &s.ghost {
            let _ = ghost
                .style()
                .set_property("transform", &format!("translateY({}px)", frame.delta));
        }

        if !frame.destination_changed {
            return;
        }
        let crate::reorder::DragPhase::Dragging(session) = s.controller.phase() else {
            return;
        };
        let analysis = session.analysis.clone();
        for (index, element) in s.item_elements.iter().enumerate() {
            if index == frame.item_index {
                continue;
            }
            let shift = item_shift(&analysis, frame.destination, index);
            let value = if shift.abs() < f32::EPSILON {
                String::new()
            } else {
                format!("translateY({shift}px)")
            };
            let _ = element.style().set_property("transform", &value);
        }
    }

    /// The one cleanup routine every termination path reaches: release
    /// capture, drop ghost/placeholder, reshow the original, zero all
    /// transforms.
    fn cleanup_visuals(s: &mut SortState) {
        if let Some(handle) = s.pending_handle.take() {
            if let Some(pointer_id) = s.captured_pointer_id.take() {
                let _ = handle.release_pointer_capture(pointer_id);
            }
        }
        if let Some(ghost) = s.ghost.take() {
            if let Some(parent) = ghost.parent_node() {
                let _ = parent.remove_child(&ghost);
            }
        }
        if let Some(placeholder) = s.placeholder.take() {
            if let Some(parent) = placeholder.parent_node() {
                let _ = parent.remove_child(&placeholder);
            }
        }
        if let Some(dragged) = s.dragged.take() {
            let _ = dragged.style().remove_property("display");
        }
        for element in &s.item_elements {
            let _ = element.style().remove_property("transform");
        }
        s.item_elements.clear();
    }
}

impl Drop for SortableList {
    fn drop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.controller.cancel();
        Self::cleanup_visuals(&mut s);
    }
}

/// Bounding rect of an element as engine geometry.
fn dom_rect(element: &HtmlElement) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        top: rect.top() as f32,
        bottom: rect.bottom() as f32,
        left: rect.left() as f32,
        right: rect.right() as f32,
    }
}

/// Resolved margin in pixels from computed style (`"8px"` -> `8.0`).
fn margin(element: &HtmlElement, property: &str) -> f32 {
    web_sys::window()
        .and_then(|w| w.get_computed_style(element).ok().flatten())
        .and_then(|style| style.get_property_value(property).ok())
        .and_then(|value| value.trim_end_matches("px").parse::<f32>().ok())
        .unwrap_or(0.0)
}
