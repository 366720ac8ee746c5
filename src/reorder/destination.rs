//! Delta-to-destination mapping and make-room shifts.

use super::analysis::DragAnalysis;

/// Map a drag delta to a destination index.
///
/// A walking search seeded with the previous destination: successive
/// pointer events move the delta a little at a time, so the answer is
/// almost always the seed itself or a neighbor. Walks down while the
/// delta sits below the current candidate's lower bound, up while it has
/// reached the next candidate's, and stops when neither holds.
/// Out-of-range table reads behave as `±inf`, so the walk can never
/// leave the table.
pub fn destination_for_delta(lower_bounds: &[f32], delta: f32, seed: usize) -> usize {
    let Some(last) = lower_bounds.len().checked_sub(1) else {
        return 0;
    };
    let mut destination = seed.min(last);
    loop {
        let lower = lower_bounds
            .get(destination)
            .copied()
            .unwrap_or(f32::NEG_INFINITY);
        if delta < lower && destination > 0 {
            destination -= 1;
            continue;
        }
        let next = lower_bounds
            .get(destination + 1)
            .copied()
            .unwrap_or(f32::INFINITY);
        if delta >= next && destination < last {
            destination += 1;
            continue;
        }
        return destination;
    }
}

/// How far the item at `item_index` must move to make room for the
/// dragged item landing at `destination`.
///
/// Items between the original slot and the destination step aside by the
/// dragged item's height plus the margin on the side they cross; all
/// others stay put. The dragged item itself is excluded — it follows the
/// clamped pointer delta directly.
pub fn item_shift(analysis: &DragAnalysis, destination: usize, item_index: usize) -> f32 {
    let dragging = analysis.dragging_index;
    if item_index == dragging {
        return 0.0;
    }
    if item_index < dragging && item_index >= destination {
        analysis.dragging_height + analysis.dragging_margin_top
    } else if item_index > dragging && item_index <= destination {
        -(analysis.dragging_height + analysis.dragging_margin_bottom)
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{ItemBounds, Rect};
    use test_case::test_case;

    const NEG: f32 = f32::NEG_INFINITY;

    // 5 items of height 40, dragging index 2 (see analysis tests).
    const BOUNDS: [f32; 5] = [NEG, -60.0, -20.0, 20.0, 60.0];

    #[test_case(0.0, 2; "no movement stays put")]
    #[test_case(19.0, 2; "just under the next bound")]
    #[test_case(45.0, 3; "one slot down")]
    #[test_case(60.0, 4; "tie lands past the bound")]
    #[test_case(500.0, 4; "clamps at the last slot")]
    #[test_case(-20.0, 2; "tie going up stays")]
    #[test_case(-21.0, 1; "one slot up")]
    #[test_case(-500.0, 0; "clamps at the first slot")]
    fn destination_from_original_slot(delta: f32, expected: usize) {
        assert_eq!(destination_for_delta(&BOUNDS, delta, 2), expected);
    }

    #[test]
    fn walk_converges_from_any_seed() {
        for seed in 0..BOUNDS.len() {
            assert_eq!(destination_for_delta(&BOUNDS, 45.0, seed), 3);
            assert_eq!(destination_for_delta(&BOUNDS, -61.0, seed), 0);
        }
        // Out-of-range seeds are clamped, not trusted.
        assert_eq!(destination_for_delta(&BOUNDS, 0.0, 99), 2);
    }

    #[test]
    fn empty_table_yields_zero() {
        assert_eq!(destination_for_delta(&[], 10.0, 3), 0);
    }

    fn analysis_for_stack() -> DragAnalysis {
        let items: Vec<ItemBounds> = (0..5)
            .map(|i| {
                ItemBounds::with_margins(
                    Rect::new(0.0, i as f32 * 44.0, 100.0, 40.0),
                    4.0,
                    0.0,
                )
            })
            .collect();
        DragAnalysis::new(Rect::new(0.0, 0.0, 100.0, 220.0), &items, 2).unwrap()
    }

    #[test]
    fn shifts_open_a_gap_below_when_dragging_up() {
        let analysis = analysis_for_stack();
        // Dragged item headed to slot 0: items 0 and 1 step down.
        assert_eq!(item_shift(&analysis, 0, 0), 44.0);
        assert_eq!(item_shift(&analysis, 0, 1), 44.0);
        assert_eq!(item_shift(&analysis, 0, 3), 0.0);
        assert_eq!(item_shift(&analysis, 0, 4), 0.0);
    }

    #[test]
    fn shifts_open_a_gap_above_when_dragging_down() {
        let analysis = analysis_for_stack();
        // Dragged item headed to slot 4: items 3 and 4 step up.
        assert_eq!(item_shift(&analysis, 4, 3), -40.0);
        assert_eq!(item_shift(&analysis, 4, 4), -40.0);
        assert_eq!(item_shift(&analysis, 4, 0), 0.0);
        assert_eq!(item_shift(&analysis, 4, 1), 0.0);
    }

    #[test]
    fn dragged_item_never_shifts() {
        let analysis = analysis_for_stack();
        for destination in 0..5 {
            assert_eq!(item_shift(&analysis, destination, 2), 0.0);
        }
    }

    #[test]
    fn no_shift_at_original_destination() {
        let analysis = analysis_for_stack();
        for item in 0..5 {
            if item != 2 {
                assert_eq!(item_shift(&analysis, 2, item), 0.0);
            }
        }
    }
}
