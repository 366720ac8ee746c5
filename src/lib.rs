//! rowkit - virtualized rows and drag-to-sort for the web
//!
//! The two engines behind a spreadsheet-style grid UI, as pure Rust with
//! thin WebAssembly adapters:
//! - Variable-size list virtualization: lazy measurement, binary +
//!   exponential offset search, directional overscan
//! - Pointer drag-to-sort: geometric destination mapping, make-room
//!   shifts, an explicit pointer state machine
//! - No DOM coupling in the engines; hosts supply geometry and apply
//!   the results
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { VirtualListView, SortableList } from 'rowkit';
//! await init();
//! const view = new VirtualListView(rowCount, viewportHeight);
//! view.set_item_size_fn((i) => rowHeight(i));
//! const info = view.items_info();
//! ```

// Engine modules (pure computation)
pub mod error;
pub mod reorder;
pub mod types;
pub mod vlist;

// Browser adapters (wasm32 only)
pub mod host;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use host::{SortableList, VirtualListView};

pub use types::*;

/// Compute render windows for a batch of scroll offsets and return them
/// as a JSON string. A headless helper for hosts that want to prelayout
/// without instantiating a view.
///
/// # Arguments
/// * `item_sizes` - per-item sizes in pixels
/// * `viewport_height` - visible height in pixels
/// * `scroll_offsets` - offsets to compute windows for, in order
///
/// # Errors
/// Returns an error if the result cannot be serialized.
#[wasm_bindgen]
pub fn compute_windows(
    item_sizes: &[f32],
    viewport_height: f32,
    scroll_offsets: &[f32],
) -> Result<String, JsValue> {
    let sizes = item_sizes.to_vec();
    let item_size = move |index: usize| sizes.get(index).copied().unwrap_or(0.0);
    let mut req = vlist::ListRequest::new(item_sizes.len(), &item_size);
    req.viewport_height = viewport_height;

    let mut state = vlist::ListState::new();
    let mut windows = Vec::with_capacity(scroll_offsets.len());
    for &offset in scroll_offsets {
        req.scroll_offset = offset;
        windows.push(state.range_to_render(&req));
    }

    serde_json::to_string(&windows).map_err(|e| JsValue::from_str(&format!("JSON error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
