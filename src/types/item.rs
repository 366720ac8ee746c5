//! Value types produced and consumed by the virtualization pipeline.

use serde::{Deserialize, Serialize};

/// Cached position of a measured item.
///
/// `offset` is the cumulative size of all items before it, so within the
/// measured prefix `offset(i + 1) == offset(i) + size(i)` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Distance from the top of the list to the item's leading edge
    pub offset: f32,
    /// The item's own size along the scroll axis
    pub size: f32,
}

/// Positional style for one rendered item.
///
/// The host translates this into actual positioning (absolute placement
/// at `top` with `height`, spanning the full list width).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    /// Offset from the top of the scrollable content
    pub top: f32,
    /// Item height in pixels
    pub height: f32,
}

/// Direction the list is currently scrolling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Toward higher offsets (down)
    #[default]
    Forward,
    /// Toward lower offsets (up)
    Backward,
}

/// The inclusive index window to render, recomputed on every
/// scroll/resize event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderWindow {
    /// First visible index
    pub start_index: usize,
    /// Last visible index (inclusive)
    pub stop_index: usize,
    /// First index to render, including overscan
    pub overscan_start_index: usize,
    /// Last index to render, including overscan (inclusive)
    pub overscan_stop_index: usize,
}

impl RenderWindow {
    /// The empty window used when the list has no items.
    pub fn empty() -> Self {
        Self {
            start_index: 0,
            stop_index: 0,
            overscan_start_index: 0,
            overscan_stop_index: 0,
        }
    }
}

/// One renderable item: stable key, index, and positional style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Stable key supplied by the host's key function
    pub key: String,
    /// Item index
    pub index: usize,
    /// Positional style
    pub style: ItemStyle,
}

/// Everything the host needs to render one frame of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsInfo {
    /// Items inside the overscan window, in index order
    pub items: Vec<ItemInfo>,
    /// First visible index (without overscan)
    pub start_index: usize,
    /// Last visible index (without overscan, inclusive)
    pub stop_index: usize,
}
