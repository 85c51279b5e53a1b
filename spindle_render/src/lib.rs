// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=spindle_render --heading-base-level=0

//! Spindle Render: presentational row resolution for wheel pickers.
//!
//! This crate turns picker state into per-row drawing instructions without
//! knowing how rows are drawn. For each visible row it answers two questions:
//!
//! - **Emphasis**: is this the selected row? [`resolve_rows`] compares each
//!   row's item to the current selection and marks the match
//!   [`Emphasis::Selected`], which hosts render with a heavier (bold) weight.
//! - **Edge fade**: how opaque is this row? A [`FadeMask`] describes the
//!   vertical transparent → opaque → transparent gradient that makes the
//!   strip read as a wheel. Hosts with gradient compositing apply it as a
//!   destination-in post-process over the whole window
//!   ([`FadeMask::stops`] / [`FadeMask::gradient_line`]); hosts without it
//!   multiply each row's alpha by the sampled mask value
//!   ([`composite_alpha`]).
//!
//! Resolution is purely presentational: nothing here mutates scroll or
//! selection state.
//!
//! ## Minimal example
//!
//! ```rust
//! use spindle_render::{Emphasis, FadeMask, resolve_rows};
//!
//! let rows: Vec<String> = (140..=144).map(|cm| cm.to_string()).collect();
//! let selection = "142".to_string();
//!
//! let resolved = resolve_rows(rows.iter(), &selection, &FadeMask::default());
//! assert_eq!(resolved[2].emphasis, Emphasis::Selected);
//! // Edge rows fade toward transparent.
//! assert!(resolved[0].alpha < resolved[2].alpha);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point
//!   math.
//! - `wheel_adapter`: enables the [`adapters`] module and pulls in
//!   `spindle_wheel` so rows can be resolved straight from a wheel.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "wheel_adapter")]
pub mod adapters;
mod fade;
mod rows;

pub use fade::{FadeMask, FadeStop, composite_alpha};
pub use rows::{Emphasis, RowVisual, resolve_rows};
