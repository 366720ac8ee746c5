//! CLI tool for rowkit - replays a scroll scenario and outputs JSON
//!
//! Usage:
//!   rowkit_cli <scenario.json>              # Output JSON to stdout
//!   rowkit_cli <scenario.json> -o out.json  # Output JSON to file
//!
//! A scenario describes a list and a sequence of scroll offsets:
//!
//! ```json
//! {
//!   "itemSizes": [30, 30, 45, 30],
//!   "viewportHeight": 300,
//!   "overscanCount": 2,
//!   "scrollOffsets": [0, 120, 90]
//! }
//! ```

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use rowkit::types::{RenderWindow, ScrollDirection};
use rowkit::vlist::{ListRequest, ListState, DEFAULT_OVERSCAN_COUNT};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    item_sizes: Vec<f32>,
    viewport_height: f32,
    #[serde(default)]
    overscan_count: Option<usize>,
    scroll_offsets: Vec<f32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Step {
    scroll_offset: f32,
    window: RenderWindow,
    total_size: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    steps: Vec<Step>,
    last_measured_index: Option<usize>,
}

fn run(scenario: &Scenario) -> Report {
    let sizes = scenario.item_sizes.clone();
    let item_size = move |index: usize| sizes.get(index).copied().unwrap_or(0.0);
    let mut req = ListRequest::new(scenario.item_sizes.len(), &item_size);
    req.viewport_height = scenario.viewport_height;
    req.overscan_count = scenario.overscan_count.unwrap_or(DEFAULT_OVERSCAN_COUNT);

    let mut state = ListState::new();
    let mut steps = Vec::with_capacity(scenario.scroll_offsets.len());
    let mut previous_offset = 0.0f32;
    for (i, &offset) in scenario.scroll_offsets.iter().enumerate() {
        req.is_scrolling = i > 0;
        req.scroll_direction = if offset < previous_offset {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Forward
        };
        req.scroll_offset = offset;
        previous_offset = offset;

        steps.push(Step {
            scroll_offset: offset,
            window: state.range_to_render(&req),
            total_size: state.estimated_total_size(&req),
        });
    }

    Report {
        last_measured_index: state.last_measured_index(),
        steps,
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: rowkit_cli <scenario.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read scenario file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Parse scenario
    let scenario: Scenario = match serde_json::from_str(&data) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing scenario: {}", e);
            std::process::exit(1);
        }
    };

    let report = run(&scenario);

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
