// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wheel controller: looping scroll state, gestures, and selection.

use alloc::vec::Vec;
use core::num::NonZeroUsize;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Size;
use spindle_cell::{ObservableCell, SubscriberId};
use spindle_loop::LoopSpace;

use crate::error::WheelError;
use crate::mapper::SelectionMapper;
use crate::motion;
use crate::snap::Snap;

bitflags::bitflags! {
    /// Batched record of what changed since the host last drained it.
    ///
    /// Hosts poll this once per frame via [`Wheel::take_damage`] and redraw
    /// or re-layout only what the bits name.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct WheelDamage: u8 {
        /// The scroll position moved.
        const SCROLL    = 0b0000_0001;
        /// The selected item changed.
        const SELECTION = 0b0000_0010;
        /// The measured item extent changed; the window must be resized.
        const VIEWPORT  = 0b0000_0100;
    }
}

/// Construction parameters for a [`Wheel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelOptions {
    /// Real index of the item initially centered. Reduced modulo the item
    /// count. Defaults to `0`.
    pub start_index: usize,
    /// Number of items shown at once. Must be at least 1; odd values keep a
    /// single item exactly centered. Defaults to `3`.
    pub visible_count: usize,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            visible_count: 3,
        }
    }
}

/// A looping, snapping picker over a finite item list.
///
/// The wheel presents its items as an endless vertical strip: the window
/// starts anchored deep inside a signed virtual index range
/// ([`LoopSpace::anchored_start`]) and element `v` of the strip shows
/// `items[v mod N]`. Scroll position is the pair of the first visible virtual
/// index and a fractional offset into that item, so precision is independent
/// of the huge anchor.
///
/// Hosts drive it with discrete events:
///
/// - [`Wheel::drag_by`] while a pointer gesture is active,
/// - [`Wheel::release`] when the gesture ends (projects the fling and starts
///   the snap-to-boundary settle),
/// - [`Wheel::tick`] on each frame while [`Wheel::is_animating`],
/// - [`Wheel::set_item_extent`] once the first rendered row is measured.
///
/// On every position change the centered item is re-derived and, when it
/// actually changed, written to the observable selection cell, so subscribers
/// see each crossing exactly once, during flings included.
pub struct Wheel<T> {
    items: Vec<T>,
    space: LoopSpace,
    visible_count: usize,
    first_visible: i64,
    /// Scroll offset into the first visible item, in `[0, item_extent)`.
    within: f64,
    /// Measured uniform item extent; `0.0` until the host reports a layout.
    item_extent: f64,
    snap: Option<Snap>,
    mapper: SelectionMapper,
    selection: ObservableCell<T>,
    damage: WheelDamage,
}

impl<T: core::fmt::Debug> core::fmt::Debug for Wheel<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Wheel")
            .field("len", &self.items.len())
            .field("visible_count", &self.visible_count)
            .field("first_visible", &self.first_visible)
            .field("within", &self.within)
            .field("item_extent", &self.item_extent)
            .field("animating", &self.snap.is_some())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq> Wheel<T> {
    /// Creates a wheel over `items`.
    ///
    /// The selection cell is initialized to the item at
    /// `options.start_index` before any layout happens.
    ///
    /// # Errors
    ///
    /// [`WheelError::EmptyItems`] if `items` is empty,
    /// [`WheelError::ZeroVisibleItems`] if `options.visible_count` is zero.
    pub fn new(items: Vec<T>, options: WheelOptions) -> Result<Self, WheelError> {
        let len = NonZeroUsize::new(items.len()).ok_or(WheelError::EmptyItems)?;
        if options.visible_count == 0 {
            return Err(WheelError::ZeroVisibleItems);
        }

        let space = LoopSpace::new(len);
        let middle = options.visible_count / 2;
        let start = options.start_index % len.get();
        let first_visible = space.anchored_start(start, middle);

        let mut mapper = SelectionMapper::new(middle);
        let initial = mapper
            .map(first_visible, &space)
            .expect("an unprimed mapper always reports its first derivation");
        let selection = ObservableCell::new(items[initial].clone());

        Ok(Self {
            items,
            space,
            visible_count: options.visible_count,
            first_visible,
            within: 0.0,
            item_extent: 0.0,
            snap: None,
            mapper,
            selection,
            damage: WheelDamage::empty(),
        })
    }

    /// The item list.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of real items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: construction rejects empty item lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items shown at once.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// The currently selected (centered) item.
    #[must_use]
    pub fn selection(&self) -> &T {
        self.selection.get()
    }

    /// Real index of the currently centered item.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.mapper.centered(self.first_visible, &self.space)
    }

    /// Registers a callback observing every selection change.
    pub fn subscribe_selection(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriberId {
        self.selection.subscribe(callback)
    }

    /// Tears down a selection subscription.
    pub fn unsubscribe_selection(&mut self, id: SubscriberId) -> bool {
        self.selection.unsubscribe(id)
    }

    /// First visible virtual index.
    #[must_use]
    pub const fn first_visible(&self) -> i64 {
        self.first_visible
    }

    /// Scroll offset into the first visible item.
    #[must_use]
    pub const fn first_visible_offset(&self) -> f64 {
        self.within
    }

    /// Measured per-item extent, `0.0` until the first measurement arrives.
    #[must_use]
    pub const fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Total extent of the visible window (`item_extent * visible_count`).
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Visible counts are tiny"
    )]
    pub fn viewport_extent(&self) -> f64 {
        self.item_extent * self.visible_count as f64
    }

    /// Size of the visible window for a host-chosen width.
    #[must_use]
    pub fn viewport_size(&self, width: f64) -> Size {
        Size::new(width, self.viewport_extent())
    }

    /// Reports the measured extent of one rendered item.
    ///
    /// All items are assumed to share this extent. A transient `0.0` before
    /// the first layout is tolerated: gestures are inert until a real
    /// measurement arrives. Re-layout is only triggered when the value
    /// actually changes, so hosts can report on every layout pass without
    /// creating a feedback loop. Negative values are clamped to `0.0`.
    pub fn set_item_extent(&mut self, extent: f64) {
        // Extents are expected to be finite. Catch NaNs (and infinities) in
        // debug builds so misuse does not go unnoticed.
        debug_assert!(
            extent.is_finite(),
            "item extents must be finite; got {extent:?}"
        );
        let extent = if extent.is_sign_negative() { 0.0 } else { extent };
        if extent == self.item_extent {
            return;
        }
        if self.item_extent > 0.0 && extent > 0.0 {
            // Keep the fractional position stable across a re-measure.
            self.within = self.within / self.item_extent * extent;
        } else {
            self.within = 0.0;
        }
        self.item_extent = extent;
        self.damage |= WheelDamage::VIEWPORT;
    }

    /// `true` while a settle animation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.snap.is_some()
    }

    /// `true` when the wheel rests exactly on an item boundary.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.snap.is_none() && self.within == 0.0
    }

    /// The run of virtual indices a host should realize: the first visible
    /// index and the slot count (one extra while mid-scroll, when the last
    /// row is partially visible).
    #[must_use]
    pub fn visible_range(&self) -> (i64, usize) {
        let extra = usize::from(self.within > 0.0);
        (self.first_visible, self.visible_count + extra)
    }

    /// Iterates the realized slots as `(virtual_index, item)` pairs.
    pub fn visible_items(&self) -> impl Iterator<Item = (i64, &T)> {
        let (first, count) = self.visible_range();
        let space = self.space;
        let items = &self.items;
        (0..count).map(move |slot| {
            #[allow(
                clippy::cast_possible_wrap,
                reason = "Slot counts are tiny window offsets"
            )]
            let v = first + slot as i64;
            (v, &items[space.real(v)])
        })
    }

    /// Applies a pointer drag of `delta` (positive scrolls toward larger
    /// indices), interrupting any settle in flight.
    pub fn drag_by(&mut self, delta: f64) {
        self.snap = None;
        self.apply_scroll(delta);
    }

    /// Ends a gesture at `now_ms` with the given release velocity (units per
    /// second) and starts the snap-to-boundary settle.
    ///
    /// The fling is projected as `velocity * tau` ([`motion::DECAY_TAU_MS`]),
    /// the landing position rounded to the nearest item boundary, and the
    /// travel animated by subsequent [`Wheel::tick`] calls. A zero velocity
    /// still snaps the window back onto the nearest boundary. Inert until the
    /// item extent is measured.
    pub fn release(&mut self, velocity: f64, now_ms: u64) {
        if self.item_extent <= 0.0 {
            return;
        }
        let projected = velocity * (motion::DECAY_TAU_MS as f64 / 1000.0);
        let landing = self.within + projected;
        let steps = (landing / self.item_extent).round();
        let travel = steps * self.item_extent - self.within;
        if travel == 0.0 {
            self.snap = None;
            return;
        }

        #[allow(
            clippy::cast_possible_truncation,
            reason = "Boundary steps are bounded by one fling's travel"
        )]
        let target = self.space.renormalize(self.first_visible + steps as i64);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Non-negative and bounded by one fling's travel"
        )]
        let items_traveled = (travel.abs() / self.item_extent).ceil() as u64;
        let duration = (motion::SNAP_DURATION_MS
            + motion::STEP_DURATION_MS * items_traveled.saturating_sub(1))
        .min(motion::MAX_SNAP_DURATION_MS);

        self.snap = Some(Snap::new(travel, target, now_ms, duration));
    }

    /// Advances the settle animation to `now_ms`.
    ///
    /// Returns `true` while motion continues. The final frame lands exactly
    /// on the projected boundary, re-establishing the centered-item
    /// invariant.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(mut snap) = self.snap else {
            return false;
        };
        if snap.is_done(now_ms) {
            self.snap = None;
            self.first_visible = snap.target_first_visible();
            self.within = 0.0;
            self.damage |= WheelDamage::SCROLL;
            self.sync_selection();
            return false;
        }
        let delta = snap.step(now_ms);
        self.snap = Some(snap);
        self.apply_scroll(delta);
        true
    }

    /// Jumps so that `items[index]` is centered, without animation.
    ///
    /// `index` is reduced modulo the item count. Any settle in flight is
    /// cancelled.
    pub fn scroll_to(&mut self, index: usize) {
        self.snap = None;
        let index = index % self.items.len();
        let middle = self.mapper.middle();
        let first = self.space.anchored_start(index, middle);
        if first != self.first_visible || self.within != 0.0 {
            self.first_visible = first;
            self.within = 0.0;
            self.damage |= WheelDamage::SCROLL;
            self.sync_selection();
        }
    }

    /// Drains and returns the damage accumulated since the last call.
    pub fn take_damage(&mut self) -> WheelDamage {
        let damage = self.damage;
        self.damage = WheelDamage::empty();
        damage
    }

    /// Peeks at the accumulated damage without draining it.
    #[must_use]
    pub const fn damage(&self) -> WheelDamage {
        self.damage
    }

    fn apply_scroll(&mut self, delta: f64) {
        if delta == 0.0 || self.item_extent <= 0.0 {
            return;
        }
        let total = self.within + delta;
        let mut carry = (total / self.item_extent).floor();
        let mut within = total - carry * self.item_extent;
        // Guard the half-open invariant against floating-point rounding.
        if within >= self.item_extent {
            carry += 1.0;
            within -= self.item_extent;
        }
        self.within = within.max(0.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Carries are bounded by one event's scroll distance"
        )]
        let carry = carry as i64;
        self.first_visible = self.space.renormalize(self.first_visible + carry);
        self.damage |= WheelDamage::SCROLL;
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        if let Some(index) = self.mapper.map(self.first_visible, &self.space) {
            self.selection.set(self.items[index].clone());
            self.damage |= WheelDamage::SELECTION;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Size;

    use super::{Wheel, WheelDamage, WheelOptions};
    use crate::error::WheelError;

    const EXTENT: f64 = 48.0;

    fn heights() -> Vec<String> {
        (140..=210).map(|cm| cm.to_string()).collect()
    }

    fn height_wheel() -> Wheel<String> {
        let mut wheel = Wheel::new(
            heights(),
            WheelOptions {
                start_index: 0,
                visible_count: 5,
            },
        )
        .unwrap();
        wheel.set_item_extent(EXTENT);
        wheel
    }

    fn settle(wheel: &mut Wheel<String>, mut now: u64) -> u64 {
        loop {
            now += 16;
            if !wheel.tick(now) {
                return now;
            }
        }
    }

    fn record_selection(wheel: &mut Wheel<String>) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        wheel.subscribe_selection(move |item: &String| sink.borrow_mut().push(item.clone()));
        seen
    }

    #[test]
    fn initial_selection_is_the_start_item() {
        let wheel = height_wheel();
        assert_eq!(wheel.selection(), "140");
        assert_eq!(wheel.selected_index(), 0);
        assert!(wheel.is_settled());
    }

    #[test]
    fn one_item_forward_selects_the_next() {
        let mut wheel = height_wheel();
        wheel.drag_by(EXTENT);
        assert_eq!(wheel.selection(), "141");
        assert!(wheel.is_settled());
    }

    #[test]
    fn a_full_loop_returns_to_the_start() {
        let mut wheel = Wheel::new(
            ["A", "B", "C"].map(String::from).to_vec(),
            WheelOptions {
                start_index: 1,
                visible_count: 3,
            },
        )
        .unwrap();
        assert_eq!(wheel.selection(), "B");

        wheel.set_item_extent(EXTENT);
        wheel.drag_by(3.0 * EXTENT);
        assert_eq!(wheel.selection(), "B");
        assert_eq!(wheel.selected_index(), 1);
    }

    #[test]
    fn empty_items_fail_construction() {
        let result = Wheel::<String>::new(Vec::new(), WheelOptions::default());
        assert_eq!(result.unwrap_err(), WheelError::EmptyItems);
    }

    #[test]
    fn zero_visible_count_fails_construction() {
        let result = Wheel::new(
            heights(),
            WheelOptions {
                start_index: 0,
                visible_count: 0,
            },
        );
        assert_eq!(result.unwrap_err(), WheelError::ZeroVisibleItems);
    }

    #[test]
    fn single_visible_item_centers_the_first_visible() {
        let mut wheel = Wheel::new(
            heights(),
            WheelOptions {
                start_index: 3,
                visible_count: 1,
            },
        )
        .unwrap();
        // middle = 0: the selected item is exactly the first visible one.
        assert_eq!(wheel.selection(), "143");
        assert_eq!(wheel.selected_index(), 3);

        wheel.set_item_extent(EXTENT);
        wheel.drag_by(EXTENT);
        assert_eq!(wheel.selection(), "144");
    }

    #[test]
    fn start_index_wraps_modulo_the_item_count() {
        let wheel = Wheel::new(
            heights(),
            WheelOptions {
                start_index: 71,
                visible_count: 5,
            },
        )
        .unwrap();
        assert_eq!(wheel.selection(), "140");
    }

    #[test]
    fn gestures_are_inert_until_measured() {
        let mut wheel = Wheel::new(
            heights(),
            WheelOptions {
                start_index: 0,
                visible_count: 5,
            },
        )
        .unwrap();
        let before = wheel.first_visible();

        wheel.drag_by(100.0);
        wheel.release(500.0, 0);
        assert!(!wheel.tick(16));

        assert_eq!(wheel.first_visible(), before);
        assert_eq!(wheel.selection(), "140");
        assert!(wheel.take_damage().is_empty());
    }

    #[test]
    fn measurement_reports_viewport_damage_once_per_change() {
        let mut wheel = height_wheel();
        assert_eq!(wheel.take_damage(), WheelDamage::VIEWPORT);

        // Re-reporting the same extent is a no-op.
        wheel.set_item_extent(EXTENT);
        assert!(wheel.take_damage().is_empty());

        wheel.set_item_extent(52.0);
        assert_eq!(wheel.take_damage(), WheelDamage::VIEWPORT);
    }

    #[test]
    fn viewport_follows_the_measured_extent() {
        let mut wheel = Wheel::new(
            heights(),
            WheelOptions {
                start_index: 0,
                visible_count: 5,
            },
        )
        .unwrap();
        assert_eq!(wheel.viewport_extent(), 0.0);

        wheel.set_item_extent(EXTENT);
        assert_eq!(wheel.viewport_extent(), 240.0);
        assert_eq!(wheel.viewport_size(100.0), Size::new(100.0, 240.0));
    }

    #[test]
    fn partial_drag_keeps_selection_and_realizes_an_extra_row() {
        let mut wheel = height_wheel();
        let (_, count) = wheel.visible_range();
        assert_eq!(count, 5);

        wheel.drag_by(EXTENT / 2.0);
        assert_eq!(wheel.selection(), "140");
        let (_, count) = wheel.visible_range();
        assert_eq!(count, 6);
        assert!(!wheel.is_settled());
    }

    #[test]
    fn visible_items_wrap_around_the_loop() {
        let mut wheel = Wheel::new(
            ["A", "B", "C"].map(String::from).to_vec(),
            WheelOptions {
                start_index: 0,
                visible_count: 3,
            },
        )
        .unwrap();
        wheel.set_item_extent(EXTENT);

        let labels: Vec<&str> = wheel.visible_items().map(|(_, item)| item.as_str()).collect();
        // Window opens one slot before the start item.
        assert_eq!(labels, ["C", "A", "B"]);
    }

    #[test]
    fn selection_writes_are_deduplicated() {
        let mut wheel = height_wheel();
        let seen = record_selection(&mut wheel);

        // Two single-item drags: one write each.
        wheel.drag_by(EXTENT);
        wheel.drag_by(EXTENT);
        assert_eq!(*seen.borrow(), ["141", "142"]);

        // One two-item drag: the position changes once, so one write.
        wheel.drag_by(2.0 * EXTENT);
        assert_eq!(seen.borrow().last().unwrap(), "144");
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn release_below_half_snaps_back() {
        let mut wheel = height_wheel();
        wheel.drag_by(10.0);
        wheel.release(0.0, 0);
        assert!(wheel.is_animating());

        settle(&mut wheel, 0);
        assert!(wheel.is_settled());
        assert_eq!(wheel.selection(), "140");
        assert_eq!(wheel.first_visible_offset(), 0.0);
    }

    #[test]
    fn release_past_half_snaps_forward() {
        let mut wheel = height_wheel();
        wheel.drag_by(30.0);
        wheel.release(0.0, 0);

        settle(&mut wheel, 0);
        assert!(wheel.is_settled());
        assert_eq!(wheel.selection(), "141");
    }

    #[test]
    fn fling_lands_on_a_boundary() {
        let mut wheel = height_wheel();
        // 400 units/s over a 240ms decay projects two item extents.
        wheel.release(400.0, 0);
        settle(&mut wheel, 0);

        assert!(wheel.is_settled());
        assert_eq!(wheel.selection(), "142");
        assert_eq!(wheel.selected_index(), 2);
    }

    #[test]
    fn fling_emissions_arrive_in_scroll_order() {
        let mut wheel = height_wheel();
        let seen = record_selection(&mut wheel);

        wheel.release(400.0, 0);
        settle(&mut wheel, 0);

        // Each crossing is observed once, in order, during the fling.
        assert_eq!(*seen.borrow(), ["141", "142"]);
    }

    #[test]
    fn drag_interrupts_a_fling() {
        let mut wheel = height_wheel();
        wheel.release(400.0, 0);
        assert!(wheel.tick(16));

        wheel.drag_by(-5.0);
        assert!(!wheel.is_animating());

        // Releasing again settles on the nearest boundary.
        wheel.release(0.0, 32);
        settle(&mut wheel, 32);
        assert!(wheel.is_settled());
        assert_eq!(wheel.selection(), "140");
    }

    #[test]
    fn settled_selection_matches_the_centered_invariant() {
        let mut wheel = height_wheel();
        wheel.drag_by(EXTENT * 7.0 + 13.0);
        wheel.release(-250.0, 0);
        settle(&mut wheel, 0);

        assert!(wheel.is_settled());
        let centered = wheel.selected_index();
        assert_eq!(wheel.selection(), &wheel.items()[centered]);
    }

    #[test]
    fn scroll_to_jumps_without_animation() {
        let mut wheel = height_wheel();
        wheel.take_damage();

        wheel.scroll_to(13);
        assert_eq!(wheel.selection(), "153");
        assert!(wheel.is_settled());
        assert_eq!(
            wheel.take_damage(),
            WheelDamage::SCROLL | WheelDamage::SELECTION
        );

        // Jumping to the current selection is a no-op.
        wheel.scroll_to(13);
        assert!(wheel.take_damage().is_empty());
    }

    #[test]
    fn damage_drains_on_take() {
        let mut wheel = height_wheel();
        wheel.take_damage();

        wheel.drag_by(EXTENT);
        let damage = wheel.take_damage();
        assert!(damage.contains(WheelDamage::SCROLL));
        assert!(damage.contains(WheelDamage::SELECTION));
        assert!(wheel.take_damage().is_empty());
        assert!(wheel.damage().is_empty());
    }

    #[test]
    fn unsubscribe_stops_selection_delivery() {
        let mut wheel = height_wheel();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = wheel.subscribe_selection(move |item: &String| sink.borrow_mut().push(item.clone()));

        wheel.drag_by(EXTENT);
        assert!(wheel.unsubscribe_selection(id));
        wheel.drag_by(EXTENT);

        assert_eq!(*seen.borrow(), ["141"]);
    }
}
