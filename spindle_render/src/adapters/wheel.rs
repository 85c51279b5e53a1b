// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for resolving rows straight from a [`spindle_wheel::Wheel`].

use smallvec::SmallVec;
use spindle_wheel::Wheel;

use crate::fade::FadeMask;
use crate::rows::{RowVisual, resolve_rows};

/// Resolves the wheel's currently realized rows against its own selection.
///
/// The row set is [`Wheel::visible_items`] (including the partially visible
/// trailing row mid-scroll), so hosts can hand the result directly to their
/// draw pass.
pub fn resolve_wheel_rows<'a, T: Clone + PartialEq>(
    wheel: &'a Wheel<T>,
    mask: &FadeMask,
) -> SmallVec<[RowVisual<'a, T>; 8]> {
    resolve_rows(
        wheel.visible_items().map(|(_, item)| item),
        wheel.selection(),
        mask,
    )
}
