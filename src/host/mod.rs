//! Browser host adapters (wasm32 only).
//!
//! The engines in [`vlist`](crate::vlist) and [`reorder`](crate::reorder)
//! are pure; these adapters supply the geometry they need and apply the
//! positioning they produce:
//!
//! - [`VirtualListView`] feeds scroll offsets in and hands items-info out
//!   as JS values.
//! - [`SortableList`] owns the pointer listeners, rect measurement, and
//!   ghost/placeholder DOM for drag-to-sort.

#[cfg(target_arch = "wasm32")]
mod list;
#[cfg(target_arch = "wasm32")]
mod sortable;

#[cfg(target_arch = "wasm32")]
pub use list::VirtualListView;
#[cfg(target_arch = "wasm32")]
pub use sortable::SortableList;
