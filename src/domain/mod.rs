// SPDX-License-Identifier: MPL-2.0
//! Pure page logic with no dependency on the GUI runtime.
//!
//! - [`layout`]: section and entry positions computed from content
//! - [`scroll`]: viewport geometry, intersection observers, scroll triggers
//! - [`timeline`]: cancellable timed sequences and easing

pub mod layout;
pub mod scroll;
pub mod timeline;

pub use layout::PageLayout;
pub use scroll::{
    Anchor, Crossing, Edge, ElementBox, IntersectionObserver, ScrollTrigger, TriggerEvent,
    Viewport,
};
pub use timeline::{Deadline, EffectState, Timeline};
