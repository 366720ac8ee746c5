//! Scroll-driven browser adapter for the virtualization engine.
//!
//! JavaScript owns the scroll container and the item data; this adapter
//! owns a [`ListState`] and translates between the two. Per-item sizes
//! and keys come from JS callbacks (same contract as the engine's
//! `item_size`/`item_key` functions); results go back as plain JS
//! objects via serde.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::types::ScrollDirection;
use crate::vlist::{ListRequest, ListState};

/// WASM-exported virtualized list controller.
///
/// ```javascript
/// const view = new VirtualListView(rowCount, viewportHeight);
/// view.set_item_size_fn((i) => rowHeight(i));
/// view.set_item_key_fn((i) => rows[i].id);
/// container.addEventListener('scroll', () => {
///   view.on_scroll(container.scrollTop);
///   render(view.items_info());
/// });
/// ```
#[wasm_bindgen]
pub struct VirtualListView {
    state: ListState,
    item_count: usize,
    scroll_offset: f32,
    viewport_height: f32,
    overscan_count: usize,
    estimated_item_size: f32,
    is_scrolling: bool,
    scroll_direction: ScrollDirection,
    item_size_fn: Option<Function>,
    item_key_fn: Option<Function>,
}

#[wasm_bindgen]
impl VirtualListView {
    /// Create a view for `item_count` items in a viewport of
    /// `viewport_height` logical pixels.
    #[wasm_bindgen(constructor)]
    pub fn new(item_count: u32, viewport_height: f32) -> VirtualListView {
        console_error_panic_hook::set_once();
        VirtualListView {
            state: ListState::new(),
            item_count: item_count as usize,
            scroll_offset: 0.0,
            viewport_height,
            overscan_count: crate::vlist::DEFAULT_OVERSCAN_COUNT,
            estimated_item_size: crate::vlist::DEFAULT_ESTIMATED_ITEM_SIZE,
            is_scrolling: false,
            scroll_direction: ScrollDirection::Forward,
            item_size_fn: None,
            item_key_fn: None,
        }
    }

    /// Set the per-item size callback `(index) => pixels`.
    pub fn set_item_size_fn(&mut self, f: Function) {
        self.item_size_fn = Some(f);
    }

    /// Set the per-item key callback `(index) => string | number`.
    pub fn set_item_key_fn(&mut self, f: Function) {
        self.item_key_fn = Some(f);
    }

    /// Update the item count (measurements are kept; see
    /// [`invalidate_from`](Self::invalidate_from) for size changes).
    pub fn set_item_count(&mut self, item_count: u32) {
        self.item_count = item_count as usize;
    }

    /// Update the viewport height after a resize.
    pub fn set_viewport_height(&mut self, viewport_height: f32) {
        self.viewport_height = viewport_height;
    }

    /// Number of extra items rendered beyond the viewport.
    pub fn set_overscan_count(&mut self, overscan_count: u32) {
        self.overscan_count = overscan_count as usize;
    }

    /// Assumed size for unmeasured items (drives the total-size estimate).
    pub fn set_estimated_item_size(&mut self, estimated_item_size: f32) {
        self.estimated_item_size = estimated_item_size;
    }

    /// Record a scroll event. Direction derives from the offset delta;
    /// the host should call [`on_scroll_settle`](Self::on_scroll_settle)
    /// once scrolling stops (e.g. from a settle timeout).
    pub fn on_scroll(&mut self, scroll_offset: f32) {
        self.scroll_direction = if scroll_offset < self.scroll_offset {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Forward
        };
        self.scroll_offset = scroll_offset;
        self.is_scrolling = true;
    }

    /// Scrolling has settled; overscan becomes symmetric again.
    pub fn on_scroll_settle(&mut self) {
        self.is_scrolling = false;
    }

    /// Forget measurements at and beyond `index` after item sizes change.
    pub fn invalidate_from(&mut self, index: u32) {
        self.state.invalidate_from(index as usize);
    }

    /// Items to render for the current scroll state, as
    /// `{items: [{key, index, style}], startIndex, stopIndex}`.
    ///
    /// # Errors
    /// Returns an error if the result cannot be converted to a JS value.
    pub fn items_info(&mut self) -> Result<JsValue, JsValue> {
        let key_fn = self.item_key_fn.clone();
        let item_key = move |index: usize| -> String {
            key_fn
                .as_ref()
                .and_then(|f| f.call1(&JsValue::NULL, &JsValue::from(index as f64)).ok())
                .and_then(|v| v.as_string().or_else(|| v.as_f64().map(|n| n.to_string())))
                .unwrap_or_else(|| index.to_string())
        };
        let info = self.with_request(|state, req| state.items_info(req, &item_key));
        serde_wasm_bindgen::to_value(&info)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Estimated total scrollable extent, for sizing the spacer element.
    pub fn total_size(&mut self) -> f32 {
        self.with_request(|state, req| state.estimated_total_size(req))
    }

    /// Highest measured index, or -1 when nothing is measured.
    pub fn last_measured_index(&self) -> i32 {
        self.state
            .last_measured_index()
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }
}

impl VirtualListView {
    /// Run `f` with a request assembled from the current settings. Item
    /// sizes fall back to the estimate when the callback is missing or
    /// returns a non-number.
    fn with_request<T>(&mut self, f: impl FnOnce(&mut ListState, &ListRequest<'_>) -> T) -> T {
        let size_fn = self.item_size_fn.clone();
        let estimated = self.estimated_item_size;
        let item_size = move |index: usize| -> f32 {
            size_fn
                .as_ref()
                .and_then(|f| f.call1(&JsValue::NULL, &JsValue::from(index as f64)).ok())
                .and_then(|v| v.as_f64())
                .map(|v| v as f32)
                .unwrap_or(estimated)
        };
        let req = ListRequest {
            item_count: self.item_count,
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport_height,
            overscan_count: self.overscan_count,
            is_scrolling: self.is_scrolling,
            scroll_direction: self.scroll_direction,
            estimated_item_size: self.estimated_item_size,
            item_size: &item_size,
        };
        f(&mut self.state, &req)
    }
}
