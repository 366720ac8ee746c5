//! Variable-size list virtualization.
//!
//! This module computes which rows of a long list need to exist at a
//! given scroll offset, measuring item sizes lazily as scrolling reaches
//! them. Positions are cached incrementally so lookups stay O(log n):
//!
//! - [`ListState`] owns the measured-position cache and style cache for
//!   one list instance; two lists never share state.
//! - [`ListRequest`] carries the per-frame inputs (count, scroll offset,
//!   viewport, overscan policy, size callback) into every computation.
//!
//! The host owns scrolling and rendering; it feeds offsets in and turns
//! the returned [`ItemsInfo`](crate::types::ItemsInfo) into positioned
//! rows.

mod state;
mod window;

pub use state::ListState;
pub use window::{ListRequest, DEFAULT_ESTIMATED_ITEM_SIZE, DEFAULT_OVERSCAN_COUNT};
