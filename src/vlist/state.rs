//! Per-list measurement state: lazily measured item positions plus a
//! memoized style per index.
//!
//! Measurement always proceeds in ascending index order, so the measured
//! region is a contiguous prefix of the list. That invariant is what
//! makes the binary search in `window.rs` valid.

use std::collections::HashMap;

use super::window::ListRequest;
use crate::types::{ItemMetadata, ItemStyle};

/// Measurement and style caches for one list instance.
///
/// Created once per list and mutated incrementally as scrolling measures
/// new indices. Nothing is ever forgotten automatically; callers whose
/// item sizes change must call [`ListState::invalidate_from`].
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Measured items, index-aligned; `metadata.len()` is the measured count
    metadata: Vec<ItemMetadata>,
    /// Memoized positional styles keyed by index
    style_cache: HashMap<usize, ItemStyle>,
}

impl ListState {
    /// Create an empty state (nothing measured).
    pub fn new() -> Self {
        Self::default()
    }

    /// The high-water mark: highest index whose offset/size have been
    /// computed, or `None` if nothing has been measured yet.
    pub fn last_measured_index(&self) -> Option<usize> {
        self.metadata.len().checked_sub(1)
    }

    /// Get the offset/size of `index`, measuring up to it if needed.
    ///
    /// Unmeasured indices between the high-water mark and `index` are
    /// measured in ascending order, each offset accumulated from the
    /// previous entry, so the measured prefix never has holes.
    pub fn item_metadata(&mut self, req: &ListRequest<'_>, index: usize) -> ItemMetadata {
        if index >= self.metadata.len() {
            let mut offset = self
                .metadata
                .last()
                .map(|m| m.offset + m.size)
                .unwrap_or(0.0);
            for i in self.metadata.len()..=index {
                let size = (req.item_size)(i);
                self.metadata.push(ItemMetadata { offset, size });
                offset += size;
            }
        }
        self.metadata.get(index).copied().unwrap_or_default()
    }

    /// Estimate the full scrollable extent.
    ///
    /// Measured items contribute their exact sizes; the unmeasured tail
    /// is extrapolated at `estimated_item_size`. The estimate shifts as
    /// more items get measured, which the host surfaces as a scrollbar
    /// adjustment during scrolling.
    pub fn estimated_total_size(&self, req: &ListRequest<'_>) -> f32 {
        // The item count may shrink between renders while a scroll is in
        // flight; clamp so the measured extent never runs past it.
        let measured = self.metadata.len().min(req.item_count);
        let measured_extent = measured
            .checked_sub(1)
            .and_then(|last| self.metadata.get(last))
            .map(|m| m.offset + m.size)
            .unwrap_or(0.0);
        let unmeasured = req.item_count - measured;
        measured_extent + unmeasured as f32 * req.estimated_item_size
    }

    /// Positional style for `index`, memoized per index.
    ///
    /// The cache is not invalidated when an already-measured item's size
    /// changes; callers that resize items must call
    /// [`ListState::invalidate_from`] with the first affected index.
    pub fn item_style(&mut self, req: &ListRequest<'_>, index: usize) -> ItemStyle {
        if let Some(style) = self.style_cache.get(&index) {
            return *style;
        }
        let metadata = self.item_metadata(req, index);
        let style = ItemStyle {
            top: metadata.offset,
            height: metadata.size,
        };
        self.style_cache.insert(index, style);
        style
    }

    /// Forget measurements and styles for `index` and everything after it.
    ///
    /// Call when item sizes at or beyond `index` have changed; the next
    /// query re-measures from `index` with fresh sizes. Earlier items are
    /// untouched.
    pub fn invalidate_from(&mut self, index: usize) {
        self.metadata.truncate(index);
        self.style_cache.retain(|&i, _| i < index);
    }

    pub(super) fn metadata(&self) -> &[ItemMetadata] {
        &self.metadata
    }
}
