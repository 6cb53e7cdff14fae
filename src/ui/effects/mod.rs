// SPDX-License-Identifier: MPL-2.0
//! Decorative micro-interactions.
//!
//! None of these carry page state worth keeping; each one owns its own
//! timing and is ticked by the app only while it reports
//! `is_animating`.

pub mod browser_card;
pub mod camera;
pub mod counters;
pub mod garden;
pub mod particles;

pub use browser_card::BrowserCard;
pub use camera::Camera;
pub use counters::Counters;
pub use garden::Garden;
pub use particles::{Ambient, Confetti, Fireflies};
