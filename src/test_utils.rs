// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for unit tests.
//!
//! Animation progress, opacities and offsets are floats; compare them with
//! `assert_abs_diff_eq!` rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;
