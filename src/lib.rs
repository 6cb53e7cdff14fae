// SPDX-License-Identifier: MPL-2.0
//! `iced_folio` is an interactive single-page portfolio built with the Iced GUI framework.
//!
//! The page is described by a TOML content document and brought to life by
//! scroll-driven effects: staged hero entrance, section reveals, a phone
//! preview following the case studies, a narrator, an artwork marquee and a
//! set of small micro-interactions. Labels are localized with Fluent and the
//! theme choice is persisted between runs.

#![doc(html_root_url = "https://docs.rs/iced_folio/0.1.0")]

pub mod app;
pub mod audio;
pub mod config;
pub mod contact;
pub mod content;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
