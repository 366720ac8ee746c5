//! Virtualization engine tests
//!
//! Tests for lazy measurement, offset search, render-window computation,
//! total-size estimation, and the style cache.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use rowkit::types::ScrollDirection;
use rowkit::vlist::{ListRequest, ListState};

/// Request over `count` uniform items of `size` pixels.
fn uniform_request(count: usize, size_fn: &dyn Fn(usize) -> f32) -> ListRequest<'_> {
    let mut req = ListRequest::new(count, size_fn);
    req.viewport_height = 300.0;
    req.overscan_count = 2;
    req
}

// =============================================================================
// RENDER WINDOW PROPERTIES
// =============================================================================

#[test]
fn test_window_indices_are_ordered_and_in_bounds() {
    let sizes = |i: usize| 20.0 + (i % 5) as f32 * 7.0;
    for count in [1usize, 2, 9, 100, 1000] {
        let mut req = uniform_request(count, &sizes);
        let mut state = ListState::new();
        for offset in [0.0f32, 10.0, 99.5, 1000.0, 50_000.0] {
            req.scroll_offset = offset;
            let w = state.range_to_render(&req);
            assert!(
                w.start_index <= w.stop_index,
                "start {} > stop {} at offset {} with {} items",
                w.start_index,
                w.stop_index,
                offset,
                count
            );
            assert!(
                w.stop_index <= count - 1,
                "stop {} out of bounds for {} items",
                w.stop_index,
                count
            );
            assert!(w.overscan_start_index <= w.start_index);
            assert!(w.overscan_stop_index >= w.stop_index);
            assert!(w.overscan_stop_index <= count - 1);
        }
    }
}

#[test]
fn test_empty_list_yields_empty_window() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(0, &sizes);
    req.scroll_offset = 500.0;
    let mut state = ListState::new();

    let w = state.range_to_render(&req);
    assert_eq!(w.start_index, 0, "Empty list should produce a zero window");
    assert_eq!(w.stop_index, 0);
    assert_eq!(w.overscan_start_index, 0);
    assert_eq!(w.overscan_stop_index, 0);
}

// =============================================================================
// MEASUREMENT INVARIANTS
// =============================================================================

#[test]
fn test_offsets_are_monotonic_and_gap_free() {
    let sizes = |i: usize| 15.0 + (i % 11) as f32 * 4.0;
    let req = uniform_request(200, &sizes);
    let mut state = ListState::new();

    // Styles expose offsets; walking them checks the metadata chain.
    let mut expected_top = 0.0;
    for i in 0..200 {
        let style = state.item_style(&req, i);
        assert_eq!(
            style.top, expected_top,
            "offset of item {} should be the sum of all prior sizes",
            i
        );
        assert_eq!(style.height, sizes(i));
        expected_top += style.height;
    }
}

#[test]
fn test_estimate_never_undercounts_measured_items() {
    let sizes = |i: usize| 10.0 + (i % 3) as f32 * 30.0;
    let mut req = uniform_request(500, &sizes);
    req.estimated_item_size = 1.0; // Deliberately tiny estimate
    let mut state = ListState::new();

    req.scroll_offset = 2000.0;
    state.range_to_render(&req);

    let last = state.last_measured_index().unwrap();
    let measured_sum: f32 = (0..=last).map(sizes).sum();
    assert!(
        state.estimated_total_size(&req) >= measured_sum,
        "estimate {} under-counts the measured portion {}",
        state.estimated_total_size(&req),
        measured_sum
    );
}

// =============================================================================
// SCENARIO A: uniform list, viewport-filling window
// =============================================================================

#[test]
fn test_uniform_list_fills_viewport_from_zero() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(1000, &sizes);
    req.viewport_height = 300.0;
    req.scroll_offset = 0.0;
    let mut state = ListState::new();

    let w = state.range_to_render(&req);
    assert_eq!(w.start_index, 0, "Start should be 0 at offset 0");
    assert_eq!(
        w.stop_index, 9,
        "10 rows of 30px exactly fill a 300px viewport"
    );
    // Overscan extends beyond the visible pair symmetrically when idle.
    assert_eq!(w.overscan_start_index, 0);
    assert_eq!(w.overscan_stop_index, 11);
}

// =============================================================================
// SCENARIO B: scrollbar jump into unmeasured territory
// =============================================================================

#[test]
fn test_scrollbar_jump_uses_exponential_probe() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(1000, &sizes);
    req.scroll_offset = 15_000.0;
    let mut state = ListState::new();

    let w = state.range_to_render(&req);
    assert_eq!(
        w.start_index, 500,
        "Offset 15000 over 30px rows lands on row 500"
    );

    // The probe doubles its way to a bracket around row 500; it must not
    // have walked measurement to the end of the list.
    let measured = state.last_measured_index().unwrap();
    assert!(measured >= w.stop_index, "window must be measured");
    assert!(
        measured < 999,
        "probe measured every row ({} of 1000) instead of bracketing",
        measured + 1
    );
}

#[test]
fn test_jump_backward_into_measured_region() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(1000, &sizes);
    let mut state = ListState::new();

    req.scroll_offset = 15_000.0;
    state.range_to_render(&req);
    let measured_after_jump = state.last_measured_index().unwrap();

    // Jumping back is a pure binary search; nothing new gets measured
    // before the window itself.
    req.scroll_offset = 3_000.0;
    let w = state.range_to_render(&req);
    assert_eq!(w.start_index, 100);
    assert!(state.last_measured_index().unwrap() >= measured_after_jump);
}

// =============================================================================
// SCENARIO E: item count shrinks mid-scroll
// =============================================================================

#[test]
fn test_total_size_survives_count_shrink() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(100, &sizes);
    let mut state = ListState::new();

    req.scroll_offset = 2_500.0;
    state.range_to_render(&req);
    assert!(state.last_measured_index().unwrap() > 10);

    // The data source dropped to 10 items between renders.
    req.item_count = 10;
    assert_eq!(
        state.estimated_total_size(&req),
        300.0,
        "estimate must clamp to the live item count"
    );

    req.scroll_offset = 0.0;
    let w = state.range_to_render(&req);
    assert!(w.stop_index <= 9, "window must clamp to the live item count");
}

// =============================================================================
// OVERSCAN DIRECTION
// =============================================================================

#[test]
fn test_overscan_symmetric_when_idle() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(1000, &sizes);
    req.overscan_count = 4;
    req.scroll_offset = 3_000.0;
    req.is_scrolling = false;
    let mut state = ListState::new();

    let w = state.range_to_render(&req);
    assert_eq!(w.start_index - w.overscan_start_index, 4);
    assert_eq!(w.overscan_stop_index - w.stop_index, 4);
}

#[test]
fn test_overscan_leans_forward_while_scrolling_down() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(1000, &sizes);
    req.overscan_count = 4;
    req.scroll_offset = 3_000.0;
    req.is_scrolling = true;
    req.scroll_direction = ScrollDirection::Forward;
    let mut state = ListState::new();

    let w = state.range_to_render(&req);
    assert_eq!(
        w.start_index - w.overscan_start_index,
        1,
        "trailing side keeps exactly one row for focus continuity"
    );
    assert_eq!(w.overscan_stop_index - w.stop_index, 4);
}

#[test]
fn test_overscan_leans_backward_while_scrolling_up() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(1000, &sizes);
    req.overscan_count = 4;
    req.scroll_offset = 3_000.0;
    req.is_scrolling = true;
    req.scroll_direction = ScrollDirection::Backward;
    let mut state = ListState::new();

    let w = state.range_to_render(&req);
    assert_eq!(w.start_index - w.overscan_start_index, 4);
    assert_eq!(w.overscan_stop_index - w.stop_index, 1);
}

#[test]
fn test_zero_overscan_still_renders_one_extra() {
    let sizes = |_: usize| 30.0;
    let mut req = uniform_request(1000, &sizes);
    req.overscan_count = 0;
    req.scroll_offset = 3_000.0;
    let mut state = ListState::new();

    let w = state.range_to_render(&req);
    assert_eq!(
        w.start_index - w.overscan_start_index,
        1,
        "overscan never drops below one row on either side"
    );
    assert_eq!(w.overscan_stop_index - w.stop_index, 1);
}

// =============================================================================
// ITEMS INFO
// =============================================================================

#[test]
fn test_items_info_covers_overscan_window() {
    let sizes = |_: usize| 40.0;
    let mut req = uniform_request(100, &sizes);
    req.viewport_height = 200.0;
    req.overscan_count = 2;
    req.scroll_offset = 400.0;
    let mut state = ListState::new();

    let info = state.items_info(&req, &|i| format!("key-{i}"));
    assert_eq!(info.start_index, 10);
    assert_eq!(info.stop_index, 14);
    // 2 overscan rows on both sides of the 5 visible rows.
    assert_eq!(info.items.len(), 9);
    assert_eq!(info.items[0].index, 8);
    assert_eq!(info.items[0].key, "key-8");
    assert_eq!(info.items[0].style.top, 320.0);
    assert_eq!(info.items[8].index, 16);

    // Styles are contiguous across the returned slice.
    for pair in info.items.windows(2) {
        assert_eq!(pair[1].style.top, pair[0].style.top + pair[0].style.height);
    }
}

// =============================================================================
// STYLE CACHE AND INVALIDATION
// =============================================================================

#[test]
fn test_style_cache_returns_identical_styles() {
    let sizes = |i: usize| 20.0 + (i % 4) as f32;
    let req = uniform_request(50, &sizes);
    let mut state = ListState::new();

    let first = state.item_style(&req, 17);
    let second = state.item_style(&req, 17);
    assert_eq!(first, second, "cached style must be stable across calls");
}

#[test]
fn test_invalidate_from_rolls_back_measurement() {
    let tall = |_: usize| 40.0;
    let short = |_: usize| 20.0;
    let mut state = ListState::new();

    let req = uniform_request(100, &tall);
    state.item_style(&req, 50);
    assert_eq!(state.item_style(&req, 10).top, 400.0);

    // Rows 10+ changed height; roll the caches back to row 10.
    state.invalidate_from(10);
    assert_eq!(state.last_measured_index(), Some(9));

    let req = uniform_request(100, &short);
    assert_eq!(
        state.item_style(&req, 10).top,
        400.0,
        "rows before the invalidation point keep their offsets"
    );
    assert_eq!(state.item_style(&req, 10).height, 20.0);
    assert_eq!(state.item_style(&req, 11).top, 420.0);
}
