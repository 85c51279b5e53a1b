// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-row visual resolution: emphasis and mask alpha.

use smallvec::SmallVec;

use crate::fade::FadeMask;

/// How a row should be styled relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// An ordinary row, rendered in the host's base style.
    Normal,
    /// The row holding the selected item; hosts render it with a heavier
    /// weight (bold).
    Selected,
}

/// The resolved presentation of one visible row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowVisual<'a, T> {
    /// The item shown in this row.
    pub item: &'a T,
    /// Window slot, `0` at the top of the visible window.
    pub slot: usize,
    /// Selection emphasis for this row.
    pub emphasis: Emphasis,
    /// Mask alpha sampled at the row's vertical center.
    pub alpha: f64,
}

/// Resolves the visible rows against the current selection and fade mask.
///
/// Each row is compared to `selection` (one `O(1)` equality per row, per
/// frame) and sampled against the mask at its vertical center. Rows equal to
/// the selection get [`Emphasis::Selected`]; with distinct items that is
/// exactly one row. The resolution is purely presentational: it never feeds
/// back into scroll or selection state.
pub fn resolve_rows<'a, T: PartialEq>(
    rows: impl IntoIterator<Item = &'a T>,
    selection: &T,
    mask: &FadeMask,
) -> SmallVec<[RowVisual<'a, T>; 8]> {
    let items: SmallVec<[&'a T; 8]> = rows.into_iter().collect();
    let count = items.len().max(1) as f64;
    items
        .into_iter()
        .enumerate()
        .map(|(slot, item)| RowVisual {
            item,
            slot,
            emphasis: if item == selection {
                Emphasis::Selected
            } else {
                Emphasis::Normal
            },
            alpha: mask.alpha_at((slot as f64 + 0.5) / count),
        })
        .collect()
}
