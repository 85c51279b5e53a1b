// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fading-edge mask: a vertical alpha gradient over the visible window.

use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// One stop of a [`FadeMask`] gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStop {
    /// Position along the window's vertical axis, `0.0` (top) to `1.0`
    /// (bottom).
    pub offset: f64,
    /// Mask alpha at this position, `0.0` (transparent) to `1.0` (opaque).
    pub alpha: f64,
}

impl FadeStop {
    /// Creates a stop at `offset` with the given `alpha`.
    #[must_use]
    pub const fn new(offset: f64, alpha: f64) -> Self {
        Self { offset, alpha }
    }
}

/// A vertical alpha gradient masking the visible window.
///
/// The default mask is the carousel fade: transparent at the top edge, opaque
/// at the center, transparent again at the bottom edge, so rows fade out as
/// they approach the window boundaries and the strip reads as a wheel.
///
/// The mask is applied over the rendered content as a post-process with
/// destination-in semantics: where the mask is opaque the content is kept,
/// where it is transparent the content disappears. Hosts with real gradient
/// compositing take [`FadeMask::stops`] and [`FadeMask::gradient_line`];
/// hosts without it sample [`FadeMask::alpha_at`] per row (see
/// [`composite_alpha`]).
#[derive(Debug, Clone, PartialEq)]
pub struct FadeMask {
    stops: SmallVec<[FadeStop; 4]>,
}

impl Default for FadeMask {
    /// The carousel fade: transparent → opaque → transparent.
    fn default() -> Self {
        Self::new([
            FadeStop::new(0.0, 0.0),
            FadeStop::new(0.5, 1.0),
            FadeStop::new(1.0, 0.0),
        ])
    }
}

impl FadeMask {
    /// Creates a mask from gradient stops.
    ///
    /// Stops must be sorted by offset, with offsets and alphas in
    /// `[0.0, 1.0]`; debug builds assert this. An empty stop list yields a
    /// fully opaque mask (no fade).
    #[must_use]
    pub fn new(stops: impl IntoIterator<Item = FadeStop>) -> Self {
        let stops: SmallVec<[FadeStop; 4]> = stops.into_iter().collect();
        debug_assert!(
            stops
                .windows(2)
                .all(|pair| pair[0].offset <= pair[1].offset),
            "fade stops must be sorted by offset"
        );
        debug_assert!(
            stops
                .iter()
                .all(|s| (0.0..=1.0).contains(&s.offset) && (0.0..=1.0).contains(&s.alpha)),
            "fade stop offsets and alphas must be in [0, 1]"
        );
        Self { stops }
    }

    /// The gradient stops, sorted by offset.
    #[must_use]
    pub fn stops(&self) -> &[FadeStop] {
        &self.stops
    }

    /// Samples the mask alpha at `t` along the vertical axis.
    ///
    /// `t` is clamped to `[0.0, 1.0]`. Positions before the first stop or
    /// after the last take that stop's alpha; positions between stops are
    /// linearly interpolated.
    #[must_use]
    pub fn alpha_at(&self, t: f64) -> f64 {
        let Some(first) = self.stops.first() else {
            return 1.0;
        };
        let t = t.clamp(0.0, 1.0);
        if t <= first.offset {
            return first.alpha;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.alpha;
                }
                let local = (t - a.offset) / span;
                return a.alpha + (b.alpha - a.alpha) * local;
            }
        }
        self.stops[self.stops.len() - 1].alpha
    }

    /// Mask alphas for `count` rows filling the window, sampled at each row's
    /// vertical center.
    pub fn row_alphas(&self, count: usize) -> impl Iterator<Item = f64> + '_ {
        let denom = count.max(1) as f64;
        (0..count).map(move |row| self.alpha_at((row as f64 + 0.5) / denom))
    }

    /// Endpoints of the vertical gradient line over `window`, for hosts that
    /// composite the mask as a real gradient.
    #[must_use]
    pub fn gradient_line(&self, window: Rect) -> (Point, Point) {
        let x = window.center().x;
        (Point::new(x, window.y0), Point::new(x, window.y1))
    }
}

/// Destination-in compositing: keeps `dst` where the mask is opaque.
///
/// This is the per-row scalar form of the mask's blend rule: the row's
/// rendered alpha is multiplied by the mask alpha sampled at its position.
#[must_use]
pub fn composite_alpha(dst: f64, mask: f64) -> f64 {
    (dst * mask).clamp(0.0, 1.0)
}
