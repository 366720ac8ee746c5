//! Pointer-driven drag-to-sort.
//!
//! A drag gesture is analyzed once at its start ([`DragAnalysis`]): the
//! container and item rects become clamp limits plus a table of
//! destination lower bounds. Every pointer move then maps the live drag
//! delta to a destination slot with a walking search seeded by the
//! previous answer, and [`item_shift`] tells each other item how far to
//! move out of the way. [`SortController`] owns the pointer state
//! machine around all of this.
//!
//! The module never touches the DOM: the host measures geometry
//! ([`ItemBounds`](crate::types::ItemBounds)), applies transforms, and
//! commits the reorder through its own callback.

mod analysis;
mod destination;
mod session;

pub use analysis::DragAnalysis;
pub use destination::{destination_for_delta, item_shift};
pub use session::{
    reorder_items, DragFrame, DragPhase, DragSession, PointerUpdate, SortCommit, SortController,
    DEFAULT_DRAG_THRESHOLD,
};
