// Copyright 2025 the Spindle Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional adapters wiring the row resolver to concrete picker state.

mod wheel;

pub use wheel::resolve_wheel_rows;
