//! Pointer session state machine.
//!
//! One controller per sortable container. The phase enum makes the
//! illegal states unrepresentable: there is no way to commit without a
//! live session, and a second pointer cannot start a gesture while one
//! is active (the non-idle phase doubles as the sorting guard).
//!
//! Every termination path — pointer up, pointer cancel, capture loss,
//! window blur — must land in [`SortController::pointer_up`] or
//! [`SortController::cancel`], both of which collapse to `Idle` through
//! the same reset, so the host can hang its cleanup (release capture,
//! drop ghost/placeholder, zero transforms) off exactly two calls.

use super::analysis::DragAnalysis;
use super::destination::destination_for_delta;
use crate::error::Result;

/// Pointer travel (pixels) required before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 4.0;

/// Live state for one drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Pointer that owns the gesture
    pub pointer_id: i32,
    /// Pointer Y at the time the gesture was armed
    pub origin_y: f32,
    /// Geometry snapshot taken when the threshold was crossed
    pub analysis: DragAnalysis,
    /// Destination as of the latest pointer move
    pub destination: usize,
}

/// Where a sortable container is in its gesture lifecycle.
#[derive(Debug, Clone, Default)]
pub enum DragPhase {
    /// No pointer engaged
    #[default]
    Idle,
    /// A handle is pressed, but the threshold has not been crossed
    Pending {
        /// Pointer that pressed the handle
        pointer_id: i32,
        /// Pointer Y at press time
        origin_y: f32,
        /// Index of the pressed item
        item_index: usize,
    },
    /// A drag is in flight
    Dragging(DragSession),
}

/// What one pointer-move did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerUpdate {
    /// The event did not belong to an active gesture
    Ignored,
    /// The threshold was crossed; a drag session started
    Started(DragFrame),
    /// An in-flight drag advanced
    Moved(DragFrame),
}

/// Everything the host needs to repaint after a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// Index of the dragged item
    pub item_index: usize,
    /// Clamped delta to apply to the dragged item's ghost
    pub delta: f32,
    /// Tentative destination slot
    pub destination: usize,
    /// True when the destination differs from the previous event's —
    /// shifts and the placeholder only need recomputing then
    pub destination_changed: bool,
}

/// The reorder to apply when a drag commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCommit {
    /// Original index of the dragged item
    pub from: usize,
    /// Destination index
    pub to: usize,
}

/// Pointer-capture state machine for one sortable container.
#[derive(Debug, Clone)]
pub struct SortController {
    phase: DragPhase,
    threshold: f32,
}

impl Default for SortController {
    fn default() -> Self {
        Self::new()
    }
}

impl SortController {
    /// Controller with the default 4px drag threshold.
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }

    /// Controller with a custom drag threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold,
        }
    }

    /// True while a gesture (pending or dragging) owns the container.
    pub fn is_sorting(&self) -> bool {
        !matches!(self.phase, DragPhase::Idle)
    }

    /// Current phase, for hosts that reflect it in their UI.
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// A handle was pressed. Arms the threshold detector and returns
    /// true; returns false (and does nothing) if another pointer already
    /// owns the container.
    pub fn pointer_down(&mut self, pointer_id: i32, y: f32, item_index: usize) -> bool {
        if self.is_sorting() {
            return false;
        }
        self.phase = DragPhase::Pending {
            pointer_id,
            origin_y: y,
            item_index,
        };
        true
    }

    /// The pointer moved. While pending, crossing the threshold runs
    /// `analyze` (the host measures geometry here) and starts the drag;
    /// while dragging, recomputes the clamped delta and destination.
    ///
    /// # Errors
    /// Propagates a failure from `analyze`; the phase stays pending so a
    /// later move may retry.
    pub fn pointer_move(
        &mut self,
        pointer_id: i32,
        y: f32,
        analyze: impl FnOnce(usize) -> Result<DragAnalysis>,
    ) -> Result<PointerUpdate> {
        if let DragPhase::Pending {
            pointer_id: pid,
            origin_y,
            item_index,
        } = self.phase
        {
            if pid != pointer_id || (y - origin_y).abs() <= self.threshold {
                return Ok(PointerUpdate::Ignored);
            }
            let analysis = analyze(item_index)?;
            let delta = analysis.clamp_delta(y - origin_y);
            let destination = destination_for_delta(
                &analysis.destination_lower_bounds,
                delta,
                analysis.dragging_index,
            );
            let frame = DragFrame {
                item_index: analysis.dragging_index,
                delta,
                destination,
                destination_changed: destination != analysis.dragging_index,
            };
            self.phase = DragPhase::Dragging(DragSession {
                pointer_id,
                origin_y,
                analysis,
                destination,
            });
            return Ok(PointerUpdate::Started(frame));
        }

        if let DragPhase::Dragging(session) = &mut self.phase {
            if session.pointer_id != pointer_id {
                return Ok(PointerUpdate::Ignored);
            }
            let delta = session.analysis.clamp_delta(y - session.origin_y);
            let destination = destination_for_delta(
                &session.analysis.destination_lower_bounds,
                delta,
                session.destination,
            );
            let destination_changed = destination != session.destination;
            session.destination = destination;
            return Ok(PointerUpdate::Moved(DragFrame {
                item_index: session.analysis.dragging_index,
                delta,
                destination,
                destination_changed,
            }));
        }

        Ok(PointerUpdate::Ignored)
    }

    /// The pointer was released. Ends the gesture; returns the commit to
    /// apply if a drag was in flight (the host still resets transforms
    /// even when `from == to`).
    pub fn pointer_up(&mut self, pointer_id: i32) -> Option<SortCommit> {
        match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(session) if session.pointer_id == pointer_id => Some(SortCommit {
                from: session.analysis.dragging_index,
                to: session.destination,
            }),
            DragPhase::Pending {
                pointer_id: pid, ..
            } if pid == pointer_id => None,
            other => {
                // Not our pointer: leave the gesture alone.
                self.phase = other;
                None
            }
        }
    }

    /// Abandon any gesture without committing (pointer cancel, capture
    /// loss, window blur). Returns true if a drag session was discarded,
    /// in which case the host must still run its visual cleanup.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = matches!(self.phase, DragPhase::Dragging(_));
        self.phase = DragPhase::Idle;
        was_dragging
    }
}

/// Move `items[from]` to position `to`, shifting the items in between.
///
/// Out-of-range indices are ignored rather than panicking; the multiset
/// of items is always preserved.
pub fn reorder_items<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{ItemBounds, Rect};

    fn analyze_stack(dragging_index: usize) -> Result<DragAnalysis> {
        let items: Vec<ItemBounds> = (0..5)
            .map(|i| ItemBounds::new(Rect::new(0.0, i as f32 * 40.0, 100.0, 40.0)))
            .collect();
        DragAnalysis::new(Rect::new(0.0, 0.0, 100.0, 200.0), &items, dragging_index)
    }

    #[test]
    fn press_then_small_move_stays_pending() {
        let mut controller = SortController::new();
        assert!(controller.pointer_down(7, 100.0, 2));
        assert!(controller.is_sorting());

        let update = controller.pointer_move(7, 103.0, analyze_stack).unwrap();
        assert_eq!(update, PointerUpdate::Ignored);
        assert!(matches!(controller.phase(), DragPhase::Pending { .. }));
    }

    #[test]
    fn crossing_threshold_starts_drag() {
        let mut controller = SortController::new();
        controller.pointer_down(7, 100.0, 2);

        let update = controller.pointer_move(7, 105.0, analyze_stack).unwrap();
        let PointerUpdate::Started(frame) = update else {
            panic!("expected Started, got {update:?}");
        };
        assert_eq!(frame.item_index, 2);
        assert_eq!(frame.delta, 5.0);
        assert_eq!(frame.destination, 2);
        assert!(!frame.destination_changed);
        assert!(matches!(controller.phase(), DragPhase::Dragging(_)));
    }

    #[test]
    fn moves_track_destination_changes() {
        let mut controller = SortController::new();
        controller.pointer_down(7, 100.0, 2);
        controller.pointer_move(7, 105.0, analyze_stack).unwrap();

        // 45px down: crosses the bound for slot 3 (20px).
        let update = controller.pointer_move(7, 145.0, analyze_stack).unwrap();
        let PointerUpdate::Moved(frame) = update else {
            panic!("expected Moved, got {update:?}");
        };
        assert_eq!(frame.destination, 3);
        assert!(frame.destination_changed);

        // Another event at the same spot: destination is stable.
        let update = controller.pointer_move(7, 145.0, analyze_stack).unwrap();
        let PointerUpdate::Moved(frame) = update else {
            panic!("expected Moved, got {update:?}");
        };
        assert_eq!(frame.destination, 3);
        assert!(!frame.destination_changed);
    }

    #[test]
    fn delta_is_clamped_to_container() {
        let mut controller = SortController::new();
        controller.pointer_down(7, 100.0, 2);
        controller.pointer_move(7, 105.0, analyze_stack).unwrap();

        let update = controller.pointer_move(7, 1000.0, analyze_stack).unwrap();
        let PointerUpdate::Moved(frame) = update else {
            panic!("expected Moved, got {update:?}");
        };
        // Item 2 spans 80..120 in a 200px container.
        assert_eq!(frame.delta, 80.0);
        assert_eq!(frame.destination, 4);
    }

    #[test]
    fn commit_reports_final_move() {
        let mut controller = SortController::new();
        controller.pointer_down(7, 100.0, 2);
        controller.pointer_move(7, 105.0, analyze_stack).unwrap();
        controller.pointer_move(7, 145.0, analyze_stack).unwrap();

        let commit = controller.pointer_up(7).unwrap();
        assert_eq!(commit, SortCommit { from: 2, to: 3 });
        assert!(!controller.is_sorting());
    }

    #[test]
    fn release_before_threshold_commits_nothing() {
        let mut controller = SortController::new();
        controller.pointer_down(7, 100.0, 2);
        assert_eq!(controller.pointer_up(7), None);
        assert!(!controller.is_sorting());
    }

    #[test]
    fn second_pointer_is_ignored_while_sorting() {
        let mut controller = SortController::new();
        assert!(controller.pointer_down(7, 100.0, 2));
        assert!(!controller.pointer_down(8, 50.0, 0));

        controller.pointer_move(7, 105.0, analyze_stack).unwrap();
        let update = controller.pointer_move(8, 400.0, analyze_stack).unwrap();
        assert_eq!(update, PointerUpdate::Ignored);

        // The foreign pointer releasing does not end the gesture.
        assert_eq!(controller.pointer_up(8), None);
        assert!(controller.is_sorting());
    }

    #[test]
    fn cancel_reaches_idle_from_any_phase() {
        let mut controller = SortController::new();
        assert!(!controller.cancel());

        controller.pointer_down(7, 100.0, 2);
        assert!(!controller.cancel(), "pending had no session to discard");
        assert!(!controller.is_sorting());

        controller.pointer_down(7, 100.0, 2);
        controller.pointer_move(7, 105.0, analyze_stack).unwrap();
        assert!(controller.cancel());
        assert!(!controller.is_sorting());
    }

    #[test]
    fn failed_analysis_stays_pending() {
        let mut controller = SortController::new();
        controller.pointer_down(7, 100.0, 9);
        let result = controller.pointer_move(7, 105.0, analyze_stack);
        assert!(result.is_err());
        assert!(matches!(controller.phase(), DragPhase::Pending { .. }));
    }

    #[test]
    fn reorder_moves_item_down() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        reorder_items(&mut items, 0, 2);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
    }

    #[test]
    fn reorder_moves_item_up() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        reorder_items(&mut items, 3, 1);
        assert_eq!(items, vec!['a', 'd', 'b', 'c']);
    }

    #[test]
    fn reorder_ignores_out_of_range() {
        let mut items = vec!['a', 'b', 'c'];
        reorder_items(&mut items, 5, 1);
        reorder_items(&mut items, 1, 5);
        reorder_items(&mut items, 1, 1);
        assert_eq!(items, vec!['a', 'b', 'c']);
    }
}
