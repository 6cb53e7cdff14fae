// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Every interactive piece of the page is a self-contained component
//! following the Elm-style "state down, messages up" pattern: it owns its
//! state, turns a `Message` into an `Event` for the app to act on, and
//! renders itself given the current instant.
//!
//! # Page components
//!
//! - [`hero`] - Staged hero entrance, scroll progress bar, first-click chime
//! - [`reveal`] - Sections fading in as they scroll into view
//! - [`studio`] - Phone preview following the case-study entries
//! - [`gallery`] - Artwork marquee with speed controls
//! - [`dialogue`] - Narrator captions for the section in view
//! - [`modal`] - Full-size image viewer
//! - [`contact_form`] - Contact form driving the delivery chain
//! - [`router`] - Smooth scrolling to a section
//! - [`certificates`] - Certificate desktop with a pop-up window
//! - [`book`] - Book turned page by page
//! - [`accordion`] - Single-open panel groups
//! - [`ipod`] - Click-wheel list navigator
//! - [`effects`] - Decorative micro-interactions
//!
//! # Shared Infrastructure
//!
//! - [`navbar`] - Section links and the theme toggle
//! - [`notifications`] - Toast notification system for user feedback
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark theme mode and its persistence

pub mod accordion;
pub mod book;
pub mod certificates;
pub mod contact_form;
pub mod design_tokens;
pub mod dialogue;
pub mod effects;
pub mod gallery;
pub mod hero;
pub mod ipod;
pub mod modal;
pub mod navbar;
pub mod notifications;
pub mod reveal;
pub mod router;
pub mod studio;
pub mod styles;
pub mod theming;
