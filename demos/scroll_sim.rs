//! Simulates a scroll session against the virtualization engine and
//! prints each step's render window as JSON.
//!
//! Run with: cargo run --example scroll_sim

#![allow(clippy::unwrap_used)]

use rowkit::types::ScrollDirection;
use rowkit::vlist::{ListRequest, ListState};

fn main() {
    // 10k rows with a repeating pattern of tall and short rows.
    let item_size = |index: usize| if index % 10 == 0 { 64.0 } else { 28.0 };
    let mut req = ListRequest::new(10_000, &item_size);
    req.viewport_height = 480.0;
    req.overscan_count = 3;

    let mut state = ListState::new();

    // A fast flick forward, a scrollbar jump, then a slow crawl back.
    let offsets: Vec<f32> = (0..10)
        .map(|i| i as f32 * 220.0)
        .chain(std::iter::once(150_000.0))
        .chain((0..5).map(|i| 150_000.0 - i as f32 * 40.0))
        .collect();

    let mut previous = 0.0f32;
    for offset in offsets {
        req.is_scrolling = true;
        req.scroll_direction = if offset < previous {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Forward
        };
        req.scroll_offset = offset;
        previous = offset;

        let window = state.range_to_render(&req);
        println!(
            "offset {:>9.1}  total {:>10.1}  {}",
            offset,
            state.estimated_total_size(&req),
            serde_json::to_string(&window).unwrap()
        );
    }

    println!(
        "measured through index {:?} of {}",
        state.last_measured_index(),
        req.item_count
    );
}
