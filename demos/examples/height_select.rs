// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A height-select screen driven end to end: measure, drag, fling, confirm.
//!
//! The "rendering" is a text dump of the resolved rows (the selected row is
//! marked bold, edge rows fade per the default mask), so the whole gesture,
//! snap, and selection loop is observable from a terminal.

use spindle_render::{Emphasis, FadeMask, adapters::resolve_wheel_rows};
use spindle_wheel::{Wheel, WheelOptions};

const ITEM_EXTENT: f64 = 48.0;
const FRAME_MS: u64 = 16;

fn draw(wheel: &Wheel<String>, mask: &FadeMask) {
    for row in resolve_wheel_rows(wheel, mask) {
        let marker = match row.emphasis {
            Emphasis::Selected => "**",
            Emphasis::Normal => "  ",
        };
        println!("  {marker} {:>4} {marker} (alpha {:.2})", row.item, row.alpha);
    }
}

fn main() {
    let heights: Vec<String> = (140..=210).map(|cm| cm.to_string()).collect();
    let mut wheel = Wheel::new(
        heights,
        WheelOptions {
            start_index: 0,
            visible_count: 5,
        },
    )
    .expect("non-empty items and a positive visible count");

    // React to every selection change, as the screen's "X Cm" label would.
    wheel.subscribe_selection(|height: &String| println!("selected: {height} cm"));

    // The host measures the first rendered row, then sizes the window.
    wheel.set_item_extent(ITEM_EXTENT);
    let window: kurbo::Size = wheel.viewport_size(100.0);
    println!("window: {} x {}", window.width, window.height);

    let mask = FadeMask::default();
    println!("\nat rest:");
    draw(&wheel, &mask);

    // Drag down a little past one row, then let go with some velocity.
    println!("\ndragging…");
    wheel.drag_by(ITEM_EXTENT + 10.0);

    println!("flinging…");
    let mut now = 0;
    wheel.release(500.0, now);
    while wheel.tick(now) {
        now += FRAME_MS;
    }
    assert!(wheel.is_settled());

    println!("\nsettled after {now}ms:");
    draw(&wheel, &mask);

    // The confirm button reads the current value at the moment it is pressed.
    println!("\nSelected Height: {} Cm", wheel.selection());
}
