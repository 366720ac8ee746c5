//! Per-gesture geometry analysis.
//!
//! Computed once when a drag begins, from rects measured by the host in
//! a single pass. Everything downstream (clamping, destination lookup,
//! shifts) is arithmetic over this snapshot; the DOM is never consulted
//! again until the gesture ends.

use crate::error::{Result, RowkitError};
use crate::types::{ItemBounds, Rect};

/// Geometric bounds for one drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragAnalysis {
    /// Index of the item being dragged
    pub dragging_index: usize,
    /// Height of the dragged item's rect
    pub dragging_height: f32,
    /// Resolved top margin of the dragged item
    pub dragging_margin_top: f32,
    /// Resolved bottom margin of the dragged item
    pub dragging_margin_bottom: f32,
    /// Most negative delta the dragged item may move (to the container top)
    pub min_delta: f32,
    /// Most positive delta the dragged item may move (to the container bottom)
    pub max_delta: f32,
    /// Minimum delta at which each index becomes the destination.
    /// Entry 0 is `-inf`; entries are non-decreasing.
    pub destination_lower_bounds: Vec<f32>,
}

impl DragAnalysis {
    /// Analyze a gesture dragging `items[dragging_index]` inside
    /// `container`. Items must be in visual (index) order.
    ///
    /// # Errors
    /// Returns an error if `items` is empty or `dragging_index` is out
    /// of range — both are caller bugs, not recoverable conditions.
    pub fn new(container: Rect, items: &[ItemBounds], dragging_index: usize) -> Result<Self> {
        let Some(dragging) = items.get(dragging_index) else {
            return Err(RowkitError::DragAnalysis(format!(
                "dragging index {dragging_index} out of range for {} items",
                items.len()
            )));
        };
        let rect = dragging.rect;

        // For destinations at or above the original slot, the dragged
        // item's leading edge must cross the midpoint of the item above
        // the slot; below the original slot it is the trailing edge
        // crossing the midpoint of the item now occupying the slot.
        let mut lower_bounds = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let bound = if i == 0 {
                f32::NEG_INFINITY
            } else if i <= dragging_index {
                items
                    .get(i - 1)
                    .map(|prev| prev.rect.mid_y())
                    .unwrap_or(f32::NEG_INFINITY)
                    - rect.top
            } else {
                item.rect.mid_y() - rect.bottom
            };
            lower_bounds.push(bound);
        }

        Ok(Self {
            dragging_index,
            dragging_height: rect.height(),
            dragging_margin_top: dragging.margin_top,
            dragging_margin_bottom: dragging.margin_bottom,
            min_delta: container.top - rect.top,
            max_delta: container.bottom - rect.bottom,
            destination_lower_bounds: lower_bounds,
        })
    }

    /// Clamp a raw pointer delta so the dragged item stays inside the
    /// container.
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        delta.clamp(self.min_delta, self.max_delta)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    /// A vertical stack of `count` items of uniform `height`, flush.
    fn stack(count: usize, height: f32) -> Vec<ItemBounds> {
        (0..count)
            .map(|i| ItemBounds::new(Rect::new(0.0, i as f32 * height, 100.0, height)))
            .collect()
    }

    #[test]
    fn rejects_out_of_range_dragging_index() {
        let items = stack(3, 40.0);
        let container = Rect::new(0.0, 0.0, 100.0, 120.0);
        assert!(DragAnalysis::new(container, &items, 3).is_err());
        assert!(DragAnalysis::new(container, &[], 0).is_err());
    }

    #[test]
    fn clamp_limits_follow_container() {
        let items = stack(5, 40.0);
        let container = Rect::new(0.0, 0.0, 100.0, 200.0);
        let analysis = DragAnalysis::new(container, &items, 2).unwrap();

        // Item 2 spans 80..120 inside a 0..200 container.
        assert_eq!(analysis.min_delta, -80.0);
        assert_eq!(analysis.max_delta, 80.0);
        assert_eq!(analysis.clamp_delta(-500.0), -80.0);
        assert_eq!(analysis.clamp_delta(500.0), 80.0);
        assert_eq!(analysis.clamp_delta(12.5), 12.5);
    }

    #[test]
    fn lower_bounds_use_midpoints_asymmetrically() {
        let items = stack(5, 40.0);
        let container = Rect::new(0.0, 0.0, 100.0, 200.0);
        let analysis = DragAnalysis::new(container, &items, 2).unwrap();

        let bounds = &analysis.destination_lower_bounds;
        assert_eq!(bounds.len(), 5);
        assert_eq!(bounds[0], f32::NEG_INFINITY);
        // Upward crossings: midpoint of the item above, minus drag top.
        assert_eq!(bounds[1], 20.0 - 80.0);
        assert_eq!(bounds[2], 60.0 - 80.0);
        // Downward crossings: midpoint of the occupying item, minus
        // drag bottom.
        assert_eq!(bounds[3], 140.0 - 120.0);
        assert_eq!(bounds[4], 180.0 - 120.0);
    }

    #[test]
    fn lower_bounds_are_non_decreasing() {
        let mut items = stack(6, 40.0);
        // Uneven heights still yield an ordered bounds table.
        items[2] = ItemBounds::new(Rect::new(0.0, 80.0, 100.0, 70.0));
        for (i, item) in items.iter_mut().enumerate().skip(3) {
            item.rect = Rect::new(0.0, 150.0 + (i as f32 - 3.0) * 40.0, 100.0, 40.0);
        }
        let container = Rect::new(0.0, 0.0, 100.0, 400.0);
        let analysis = DragAnalysis::new(container, &items, 2).unwrap();
        let bounds = &analysis.destination_lower_bounds;
        for pair in bounds.windows(2) {
            assert!(pair[0] <= pair[1], "bounds out of order: {pair:?}");
        }
    }

    #[test]
    fn margins_carry_through() {
        let rects = stack(3, 40.0);
        let items: Vec<ItemBounds> = rects
            .iter()
            .map(|b| ItemBounds::with_margins(b.rect, 8.0, 4.0))
            .collect();
        let container = Rect::new(0.0, 0.0, 100.0, 120.0);
        let analysis = DragAnalysis::new(container, &items, 1).unwrap();
        assert_eq!(analysis.dragging_margin_top, 8.0);
        assert_eq!(analysis.dragging_margin_bottom, 4.0);
        assert_eq!(analysis.dragging_height, 40.0);
    }
}
