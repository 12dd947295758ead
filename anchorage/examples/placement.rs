//! Placement Example
//!
//! Walks a target down a small viewport and prints where a tooltip-sized
//! annotation lands on each row, showing the flip from below to above once
//! the bottom edge runs out of room.
//!
//! Debug logs go to `placement.log`.

use std::fs::File;

use anchorage::text::layout_lines;
use anchorage::{place, CellMetrics, Chrome, Edges, PlacementRequest, Rect, Side};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("placement.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, Config::default(), log_file);
    }

    let metrics = CellMetrics::default();
    let viewport = Rect::new(0, 0, 60, 20);
    let chrome = Chrome::new(Edges::symmetric(0, 1)).arrow(1);
    let lines = layout_lines(&metrics, "Please enter a valid email address.", Some(20));
    let size = chrome.measure(&metrics, &lines, Side::After);

    println!(
        "annotation {}x{} in a {}x{} viewport",
        size.width, size.height, viewport.width, viewport.height
    );
    for y in (0..viewport.height).step_by(3) {
        let target = Rect::new(20, y, 16, 1);
        let request = PlacementRequest::new(target, size, viewport).side(Side::After);
        let placement = place(&request);
        println!(
            "  target row {:>2} -> {:?} at ({}, {})",
            y, placement.side, placement.rect.x, placement.rect.y
        );
    }
}
