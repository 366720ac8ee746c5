//! Scroll-offset to render-window computation.
//!
//! Finding the item under a scroll offset uses two strategies: a binary
//! search when the offset falls inside the already-measured prefix, and
//! an exponential probe (double the step until the measured offset
//! catches up) when it lies beyond. Together they bound the work for a
//! fast scrollbar jump to O(log n) search steps instead of a linear walk
//! from the last measured item.

use std::cmp::Ordering;

use super::state::ListState;
use crate::types::{ItemInfo, ItemsInfo, RenderWindow, ScrollDirection};

/// Default estimated size for unmeasured items, in pixels.
pub const DEFAULT_ESTIMATED_ITEM_SIZE: f32 = 50.0;

/// Default number of overscan items beyond the viewport.
pub const DEFAULT_OVERSCAN_COUNT: usize = 2;

/// Inputs for one virtualization pass.
///
/// Borrowed by every query; the caller re-populates scroll fields per
/// frame and keeps `item_size` pure (same index, same answer) until it
/// explicitly invalidates the [`ListState`].
pub struct ListRequest<'a> {
    /// Number of items in the list
    pub item_count: usize,
    /// Current scroll offset in pixels
    pub scroll_offset: f32,
    /// Visible height of the list in pixels
    pub viewport_height: f32,
    /// Extra items to render beyond the viewport
    pub overscan_count: usize,
    /// True while a scroll gesture is in flight
    pub is_scrolling: bool,
    /// Direction of the in-flight scroll
    pub scroll_direction: ScrollDirection,
    /// Assumed size for items that have not been measured yet
    pub estimated_item_size: f32,
    /// Size of the item at an index, in pixels
    pub item_size: &'a dyn Fn(usize) -> f32,
}

impl<'a> ListRequest<'a> {
    /// Create a request with default viewport and overscan settings.
    pub fn new(item_count: usize, item_size: &'a dyn Fn(usize) -> f32) -> Self {
        Self {
            item_count,
            scroll_offset: 0.0,
            viewport_height: 600.0,
            overscan_count: DEFAULT_OVERSCAN_COUNT,
            is_scrolling: false,
            scroll_direction: ScrollDirection::Forward,
            estimated_item_size: DEFAULT_ESTIMATED_ITEM_SIZE,
            item_size,
        }
    }
}

impl ListState {
    /// Find the item whose offset is nearest to (without exceeding) the
    /// request's scroll offset, measuring as little as possible.
    pub fn find_nearest_item(&mut self, req: &ListRequest<'_>) -> usize {
        let measured_reaches_offset = self
            .metadata()
            .last()
            .is_some_and(|m| m.offset >= req.scroll_offset);
        if !measured_reaches_offset {
            self.probe_unmeasured(req);
        }
        self.nearest_measured(req.scroll_offset)
    }

    /// Exponential probe into the unmeasured region: starting from the
    /// high-water mark, double the step until the measured offset
    /// reaches the target or the end of the list.
    fn probe_unmeasured(&mut self, req: &ListRequest<'_>) {
        let Some(last) = req.item_count.checked_sub(1) else {
            return;
        };
        let mut index = self.metadata().len().saturating_sub(1);
        let mut interval = 1usize;
        while index < req.item_count && self.item_metadata(req, index).offset < req.scroll_offset {
            index += interval;
            interval *= 2;
        }
        // Measure through the bracket end so the binary search below
        // operates on a contiguous prefix that contains the target.
        self.item_metadata(req, index.min(last));
    }

    /// Binary search over the measured prefix for the last item whose
    /// offset does not exceed `offset`.
    fn nearest_measured(&self, offset: f32) -> usize {
        match self
            .metadata()
            .binary_search_by(|m| m.offset.partial_cmp(&offset).unwrap_or(Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Accumulate item sizes from `start_index` until the viewport is
    /// filled or the list ends.
    fn stop_index_for_start(&mut self, req: &ListRequest<'_>, start_index: usize) -> usize {
        let last = req.item_count.saturating_sub(1);
        let item = self.item_metadata(req, start_index);
        let max_offset = req.scroll_offset + req.viewport_height;
        let mut offset = item.offset + item.size;
        let mut stop_index = start_index;
        while stop_index < last && offset < max_offset {
            stop_index += 1;
            offset += self.item_metadata(req, stop_index).size;
        }
        stop_index
    }

    /// Compute the inclusive index window to render.
    ///
    /// Overscan extends the window in the direction of travel by
    /// `overscan_count`; the opposite direction always gets at least one
    /// extra item so focus-based keyboard traversal never loops back on
    /// itself at the visible boundary.
    pub fn range_to_render(&mut self, req: &ListRequest<'_>) -> RenderWindow {
        if req.item_count == 0 {
            return RenderWindow::empty();
        }
        let last = req.item_count - 1;
        let start_index = self.find_nearest_item(req).min(last);
        let stop_index = self.stop_index_for_start(req, start_index);

        let scrolling_forward =
            req.is_scrolling && req.scroll_direction == ScrollDirection::Forward;
        let scrolling_backward =
            req.is_scrolling && req.scroll_direction == ScrollDirection::Backward;
        let overscan_backward = if scrolling_forward {
            1
        } else {
            req.overscan_count.max(1)
        };
        let overscan_forward = if scrolling_backward {
            1
        } else {
            req.overscan_count.max(1)
        };

        RenderWindow {
            start_index,
            stop_index,
            overscan_start_index: start_index.saturating_sub(overscan_backward),
            overscan_stop_index: (stop_index + overscan_forward).min(last),
        }
    }

    /// Compute the render window and the key/index/style triple for each
    /// item inside it.
    pub fn items_info(
        &mut self,
        req: &ListRequest<'_>,
        item_key: &dyn Fn(usize) -> String,
    ) -> ItemsInfo {
        let window = self.range_to_render(req);
        let mut items = Vec::new();
        if req.item_count > 0 {
            items.reserve(window.overscan_stop_index - window.overscan_start_index + 1);
            for index in window.overscan_start_index..=window.overscan_stop_index {
                items.push(ItemInfo {
                    key: item_key(index),
                    index,
                    style: self.item_style(req, index),
                });
            }
        }
        ItemsInfo {
            items,
            start_index: window.start_index,
            stop_index: window.stop_index,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn uniform(size: f32) -> impl Fn(usize) -> f32 {
        move |_| size
    }

    #[test]
    fn nearest_item_at_offset_zero_is_first() {
        let sizes = uniform(30.0);
        let req = ListRequest::new(100, &sizes);
        let mut state = ListState::new();
        assert_eq!(state.find_nearest_item(&req), 0);
    }

    #[test]
    fn nearest_item_inside_measured_region() {
        let sizes = uniform(30.0);
        let mut req = ListRequest::new(100, &sizes);
        let mut state = ListState::new();
        state.item_metadata(&req, 50);

        req.scroll_offset = 305.0;
        assert_eq!(state.find_nearest_item(&req), 10);

        // Exact boundary resolves to the item starting there.
        req.scroll_offset = 300.0;
        assert_eq!(state.find_nearest_item(&req), 10);
    }

    #[test]
    fn nearest_item_beyond_measured_region() {
        let sizes = uniform(30.0);
        let mut req = ListRequest::new(1000, &sizes);
        let mut state = ListState::new();

        req.scroll_offset = 15_000.0;
        assert_eq!(state.find_nearest_item(&req), 500);
        // The probe overshoots by at most a doubling, never to the end.
        let measured = state.last_measured_index().unwrap();
        assert!(measured >= 500);
        assert!(measured < 999, "probe measured the whole list");
    }

    #[test]
    fn range_is_empty_for_zero_items() {
        let sizes = uniform(30.0);
        let req = ListRequest::new(0, &sizes);
        let mut state = ListState::new();
        assert_eq!(state.range_to_render(&req), RenderWindow::empty());
    }

    #[test]
    fn range_fills_viewport_exactly() {
        let sizes = uniform(30.0);
        let mut req = ListRequest::new(1000, &sizes);
        req.viewport_height = 300.0;
        req.overscan_count = 0;
        let mut state = ListState::new();

        let window = state.range_to_render(&req);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.stop_index, 9, "10 x 30px fills a 300px viewport");
    }

    #[test]
    fn overscan_is_directional_while_scrolling() {
        let sizes = uniform(30.0);
        let mut req = ListRequest::new(1000, &sizes);
        req.viewport_height = 300.0;
        req.overscan_count = 3;
        req.scroll_offset = 600.0;
        req.is_scrolling = true;
        req.scroll_direction = ScrollDirection::Forward;
        let mut state = ListState::new();

        let window = state.range_to_render(&req);
        assert_eq!(window.start_index, 20);
        assert_eq!(window.stop_index, 29);
        // One behind for focus continuity, three ahead in the direction
        // of travel.
        assert_eq!(window.overscan_start_index, 19);
        assert_eq!(window.overscan_stop_index, 32);

        req.scroll_direction = ScrollDirection::Backward;
        let window = state.range_to_render(&req);
        assert_eq!(window.overscan_start_index, 17);
        assert_eq!(window.overscan_stop_index, 30);
    }

    #[test]
    fn overscan_clamps_at_list_edges() {
        let sizes = uniform(30.0);
        let mut req = ListRequest::new(12, &sizes);
        req.viewport_height = 300.0;
        req.overscan_count = 5;
        let mut state = ListState::new();

        let window = state.range_to_render(&req);
        assert_eq!(window.overscan_start_index, 0);
        assert_eq!(window.overscan_stop_index, 11);
    }

    #[test]
    fn items_info_returns_keys_and_styles() {
        let sizes = uniform(40.0);
        let mut req = ListRequest::new(100, &sizes);
        req.viewport_height = 120.0;
        req.overscan_count = 1;
        let mut state = ListState::new();

        let key = |i: usize| format!("row-{i}");
        let info = state.items_info(&req, &key);
        assert_eq!(info.start_index, 0);
        assert_eq!(info.stop_index, 2);
        assert_eq!(info.items.len(), 4);
        assert_eq!(info.items[0].key, "row-0");
        assert_eq!(info.items[3].style.top, 120.0);
        assert_eq!(info.items[3].style.height, 40.0);
    }

    #[test]
    fn items_info_is_empty_for_zero_items() {
        let sizes = uniform(40.0);
        let req = ListRequest::new(0, &sizes);
        let mut state = ListState::new();
        let info = state.items_info(&req, &|i| i.to_string());
        assert!(info.items.is_empty());
    }
}
