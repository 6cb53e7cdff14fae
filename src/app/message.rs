// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::content::SectionId;
use crate::ui::effects::{browser_card, camera, garden};
use crate::ui::{
    accordion, book, certificates, contact_form, dialogue, gallery, ipod, modal, navbar,
    notifications, studio,
};
use iced::widget::scrollable;
use iced::Size;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// The page scrollable moved.
    Scrolled(scrollable::Viewport),
    WindowResized(Size),
    /// Frame clock while something animates.
    Tick(Instant),
    /// In-page anchor to a section, outside the navbar.
    Navigate(SectionId),
    EscapePressed,
    /// Any mouse press on the page; drives the first-interaction chime.
    PagePressed,
    Navbar(navbar::Message),
    Studio(studio::Message),
    Gallery(gallery::Message),
    Modal(modal::Message),
    Dialogue(dialogue::Message),
    Contact(contact_form::Message),
    Camera(camera::Message),
    Garden(garden::Message),
    BrowserCard(browser_card::Message),
    Certificates(certificates::Message),
    Book(book::Message),
    Accordion(accordion::Group, accordion::Message),
    Ipod(ipod::Message),
    Notification(notifications::NotificationMessage),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Content document replacing the embedded one.
    /// Takes precedence over the `[content] path` setting.
    pub content_path: Option<String>,
    /// Optional data directory override (for the state file).
    /// Takes precedence over `ICED_FOLIO_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_FOLIO_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
