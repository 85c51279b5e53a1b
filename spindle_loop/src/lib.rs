// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=spindle_loop --heading-base-level=0

//! Spindle Loop: looping virtual-index mathematics.
//!
//! A looping list (a wheel picker, a carousel) presents a finite sequence of
//! `N` items as an endless strip. This crate provides the coordinate space for
//! that illusion: a [`LoopSpace`] maps *virtual* indices (signed integers of
//! effectively unbounded range) onto *real* indices in `0..N`.
//!
//! The core concepts are:
//!
//! - [`LoopSpace::real`]: non-negative modulo from a virtual index to a real
//!   index. The result is always in `0..N`, even for negative virtual indices
//!   (this uses Euclidean remainder, not the sign-following `%` operator).
//! - [`LoopSpace::anchor`]: a multiple of `N` placed in the middle of the
//!   `i64` range. Hosts start their visible window at the anchor so that
//!   ordinary scrolling, in either direction, never approaches an edge of the
//!   representable range.
//! - [`LoopSpace::anchored_start`]: the anchor shifted so that the item at a
//!   chosen start index sits at a chosen slot of the visible window.
//! - [`LoopSpace::renormalize`]: shifts a virtual index that has drifted
//!   outside a safe band back toward the anchor by a multiple of `N`,
//!   preserving its real index. With renormalization applied after each
//!   position change, use is truly unbounded.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use spindle_loop::LoopSpace;
//!
//! let space = LoopSpace::new(NonZeroUsize::new(3).unwrap());
//!
//! // Virtual indices wrap onto 0..3, negatives included.
//! assert_eq!(space.real(0), 0);
//! assert_eq!(space.real(4), 1);
//! assert_eq!(space.real(-1), 2);
//!
//! // A window anchored deep in the range, with item 1 at window slot 1.
//! let first = space.anchored_start(1, 1);
//! assert_eq!(space.real(first + 1), 1);
//! ```
//!
//! The safe band around the anchor spans a quarter of the `i64` range in each
//! direction. At one item per millisecond that is roughly seventy thousand
//! years of continuous scrolling before [`LoopSpace::renormalize`] has
//! anything to do.
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

use core::num::NonZeroUsize;

/// Midpoint of the virtual index range where windows are anchored.
const MID: i64 = i64::MAX / 2;

/// How far a virtual index may drift from the anchor before
/// [`LoopSpace::renormalize`] pulls it back.
const SAFE_RADIUS: i64 = i64::MAX / 4;

/// An `N`-item looping coordinate space over signed virtual indices.
///
/// `N` must be non-zero; a zero-length loop has no well-defined modulo. The
/// constructor takes [`NonZeroUsize`] so that invalid spaces cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSpace {
    len: NonZeroUsize,
}

impl LoopSpace {
    /// Creates a loop space over `len` items.
    #[must_use]
    pub const fn new(len: NonZeroUsize) -> Self {
        Self { len }
    }

    /// Number of real items in the loop.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len.get()
    }

    fn len_i64(&self) -> i64 {
        debug_assert!(
            self.len.get() <= i64::MAX as usize,
            "loop length must fit in i64"
        );
        #[allow(clippy::cast_possible_wrap, reason = "Checked against i64::MAX above")]
        let len = self.len.get() as i64;
        len
    }

    /// Maps a virtual index to its real index in `0..len`.
    ///
    /// Uses Euclidean remainder, so the result is non-negative for every
    /// input, including negative virtual indices.
    #[must_use]
    pub fn real(&self, virtual_index: i64) -> usize {
        #[allow(
            clippy::cast_sign_loss,
            reason = "rem_euclid with a positive modulus is non-negative"
        )]
        let real = virtual_index.rem_euclid(self.len_i64()) as usize;
        real
    }

    /// A multiple of `len` near the middle of the representable range.
    ///
    /// `anchor() % len == 0`, so `real(anchor() + k) == real(k)` for any
    /// offset `k`.
    #[must_use]
    pub fn anchor(&self) -> i64 {
        MID - MID % self.len_i64()
    }

    /// The virtual index of the first window slot such that the item at
    /// `start_index` appears at window slot `middle`.
    ///
    /// This is the initial first-visible index for a window that should open
    /// with `start_index` centered: the anchor, pulled back by `middle`,
    /// pushed forward by `start_index`.
    #[must_use]
    pub fn anchored_start(&self, start_index: usize, middle: usize) -> i64 {
        debug_assert!(
            start_index < self.len.get(),
            "start_index must be a valid real index"
        );
        #[allow(
            clippy::cast_possible_wrap,
            reason = "start_index < len and middle is a small window offset"
        )]
        let first = self.anchor() - middle as i64 + start_index as i64;
        first
    }

    /// Returns `true` if `virtual_index` is within the safe operating band
    /// around the anchor.
    #[must_use]
    pub fn in_safe_band(&self, virtual_index: i64) -> bool {
        // Widen to i128: the distance from the anchor to the far end of the
        // i64 range does not fit in i64.
        (i128::from(virtual_index) - i128::from(self.anchor())).abs() <= i128::from(SAFE_RADIUS)
    }

    /// Shifts a virtual index back into the safe band, preserving its real
    /// index.
    ///
    /// Indices inside the band are returned unchanged, so hosts can call this
    /// unconditionally after every position change. An index outside the band
    /// is replaced by the equivalent index in `anchor()..anchor() + len`.
    #[must_use]
    pub fn renormalize(&self, virtual_index: i64) -> i64 {
        if self.in_safe_band(virtual_index) {
            virtual_index
        } else {
            let residue = (i128::from(virtual_index) - i128::from(self.anchor()))
                .rem_euclid(i128::from(self.len_i64()));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "residue < len, which fits in i64"
            )]
            let residue = residue as i64;
            self.anchor() + residue
        }
    }
}
