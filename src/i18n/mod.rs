// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Labels, feedback texts and form status messages are resolved through
//! Fluent bundles embedded at build time. Page content (captions, project
//! names) is not translated; it comes from the content document.

pub mod fluent;
