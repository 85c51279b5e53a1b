// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=spindle_wheel --heading-base-level=0

//! Spindle Wheel: a looping, snapping value-picker core.
//!
//! This crate provides the interaction and state model of a "wheel picker":
//! a vertically scrolling, infinitely-looping list that snaps to the item
//! nearest the center and reports that item as the current selection. It is
//! renderer-agnostic: it knows nothing about widgets, text, or drawing, only
//! about positions, gestures, and the selected value.
//!
//! The core pieces are:
//!
//! - [`Wheel`]: the controller. It owns the item list, the looping scroll
//!   position (a [`spindle_loop::LoopSpace`] virtual index plus a fractional
//!   in-item offset), the measured item extent, the fling/snap animation, and
//!   the observable selection cell.
//! - [`SelectionMapper`]: the pure derivation from a first-visible index to
//!   the centered real item, with change-deduplication so rapid fling
//!   emissions produce exactly one selection write per actual change.
//! - [`WheelDamage`]: a batched record of what changed (scroll, selection,
//!   viewport) for hosts that redraw incrementally.
//! - [`WheelError`]: construction-time configuration failures.
//! - [`motion`]: the fling-projection and settle-duration constants.
//!
//! Hosts own rendering and input decoding. They feed the wheel discrete
//! events (drags, a release with velocity, frame ticks, the measured row
//! extent) and react to selection changes through a subscription or by
//! reading [`Wheel::selection`] at the moment of a confirm action.
//!
//! ## Minimal example
//!
//! ```rust
//! use spindle_wheel::{Wheel, WheelOptions};
//!
//! let heights: Vec<String> = (140..=210).map(|cm| cm.to_string()).collect();
//! let mut wheel = Wheel::new(
//!     heights,
//!     WheelOptions {
//!         start_index: 0,
//!         visible_count: 5,
//!     },
//! )
//! .unwrap();
//!
//! // Selected before any layout: the start item.
//! assert_eq!(wheel.selection(), "140");
//!
//! // The host measures one rendered row, then drives gestures.
//! wheel.set_item_extent(48.0);
//! wheel.drag_by(48.0);
//! assert_eq!(wheel.selection(), "141");
//!
//! // A release projects the fling and snaps to the nearest boundary.
//! wheel.release(400.0, 0);
//! let mut now = 0;
//! while wheel.tick(now) {
//!     now += 16;
//! }
//! assert!(wheel.is_settled());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point
//!   math.

#![no_std]

extern crate alloc;

mod error;
mod mapper;
pub mod motion;
mod snap;
mod wheel;

pub use error::WheelError;
pub use mapper::SelectionMapper;
pub use wheel::{Wheel, WheelDamage, WheelOptions};

// The selection subscription handle comes from the cell crate; re-exported so
// hosts using only the wheel API can name it.
pub use spindle_cell::SubscriberId;
