// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Utility functions

pub mod math;

pub use math::{near_zero, snap_to_zero, EPSILON};
