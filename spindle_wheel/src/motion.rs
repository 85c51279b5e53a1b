// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion constants for fling projection and snap settling.
//!
//! Tuning happens here so every wheel settles consistently.

/// Exponential-decay time constant used to project fling travel from the
/// release velocity (ms). Travel is `velocity * tau`.
pub const DECAY_TAU_MS: u64 = 240;

/// Base duration of the settle tween for a one-item snap (ms).
pub const SNAP_DURATION_MS: u64 = 180;

/// Additional tween duration per extra item of travel (ms).
pub const STEP_DURATION_MS: u64 = 40;

/// Ceiling on the settle tween duration for long flings (ms).
pub const MAX_SNAP_DURATION_MS: u64 = 480;
