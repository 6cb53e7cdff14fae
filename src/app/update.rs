// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Components never talk to each other directly. They report an `Event`,
//! and the handlers here turn it into effects on other components: the
//! chime, the image viewer, the delivery chain, scroll operations.

use super::bootstrap::Components;
use super::persisted_state::AppState;
use super::Message;
use crate::config::defaults::RESIZE_SETTLE_MS;
use crate::contact::ContactChain;
use crate::domain::{Deadline, PageLayout, Viewport};
use crate::i18n::fluent::I18n;
use crate::ui::accordion::{self, Group};
use crate::ui::design_tokens::sizing;
use crate::ui::effects::{browser_card, camera, garden};
use crate::ui::hero::HERO_SECTION;
use crate::ui::modal::{self, ModalImage};
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeSwitcher;
use crate::ui::{book, certificates, contact_form, dialogue, gallery, ipod, navbar, studio};
use iced::widget::scrollable::{self, RelativeOffset};
use iced::widget::{operation, Id};
use iced::{Size, Task};
use std::time::{Duration, Instant};

/// Id of the page scrollable.
pub const PAGE_ID: &str = "page";

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub components: &'a mut Components,
    pub viewport: &'a mut Viewport,
    pub theme: &'a mut ThemeSwitcher,
    pub app_state: &'a mut AppState,
    pub contact_chain: &'a ContactChain,
    pub notifications: &'a mut notifications::Manager,
    pub resize_settle: &'a mut Deadline,
}

/// Scrolls the page so its top edge sits at `offset_y`.
pub fn snap_page<T: Send + 'static>(viewport: &Viewport, offset_y: f32) -> Task<T> {
    operation::snap_to(
        Id::new(PAGE_ID),
        RelativeOffset {
            x: 0.0,
            y: viewport.relative_offset_for(offset_y),
        },
    )
}

/// Height taken above the page by the navbar and the progress bar.
pub fn chrome_height() -> f32 {
    sizing::NAVBAR_HEIGHT + sizing::PROGRESS_BAR_HEIGHT
}

/// Whether any part of section `id` is on screen.
pub fn section_in_view(layout: &PageLayout, viewport: &Viewport, id: &str) -> bool {
    layout
        .section(id)
        .is_some_and(|section| section.visible_ratio(viewport.offset_y, viewport.bottom()) > 0.0)
}

/// Handles a scroll of the page.
///
/// While the image viewer is open the page is held at the locked offset.
pub fn handle_scrolled(
    ctx: &mut UpdateContext<'_>,
    page: scrollable::Viewport,
    now: Instant,
) -> Task<Message> {
    let offset_y = page.absolute_offset().y;
    let height = page.bounds().height;

    if let Some(locked) = ctx.components.modal.locked_offset() {
        if (offset_y - locked).abs() > 0.5 {
            return snap_page(ctx.viewport, locked);
        }
        return Task::none();
    }

    *ctx.viewport = Viewport::new(offset_y, height, ctx.components.layout.content_height());
    observe_viewport(ctx, now);
    Task::none()
}

/// Resizes settle before observers see the new height.
pub fn handle_resized(ctx: &mut UpdateContext<'_>, size: Size, now: Instant) -> Task<Message> {
    log::trace!("Window resized to {}x{}", size.width, size.height);
    ctx.resize_settle
        .arm(now, Duration::from_millis(RESIZE_SETTLE_MS));
    ctx.viewport.height = (size.height - chrome_height()).max(0.0);
    Task::none()
}

/// Feeds the current viewport to every scroll-driven component.
pub fn observe_viewport(ctx: &mut UpdateContext<'_>, now: Instant) {
    let viewport = *ctx.viewport;
    let c = &mut *ctx.components;

    if let Some(reveal) = c.reveal.as_mut() {
        let revealed = reveal.observe(&viewport, now);
        if !revealed.is_empty() {
            log::debug!("Revealed sections: {}", revealed.join(", "));
        }
    }

    if let Some(counters) = c.counters.as_mut() {
        let section = counters.section();
        let revealed = match c.reveal.as_ref() {
            Some(reveal) if reveal.is_revealed(section) => true,
            _ => section_in_view(&c.layout, &viewport, section),
        };
        if revealed {
            counters.start(now);
        }
    }

    if let Some(studio) = c.studio.as_mut() {
        studio.on_scroll(&viewport, now);
    }
    if let Some(dialogue) = c.dialogue.as_mut() {
        dialogue.observe(&viewport);
    }
    if let Some(gallery) = c.gallery.as_mut() {
        gallery.on_scroll(&viewport);
    }
    if let Some(garden) = c.garden.as_mut() {
        garden.on_scroll(&c.layout, &viewport);
    }
}

/// Advances every running animation by one frame.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    if ctx.resize_settle.fire(now) {
        observe_viewport(ctx, now);
    }

    let mut task = Task::none();
    if let Some(offset_y) = ctx.components.router.tick(now) {
        task = snap_page(ctx.viewport, offset_y);
    }

    let viewport = *ctx.viewport;
    let hero_visible = section_in_view(&ctx.components.layout, &viewport, HERO_SECTION);
    let footer_visible = footer_in_view(ctx.components, &viewport);
    let c = &mut *ctx.components;

    if let Some(studio) = c.studio.as_mut() {
        studio.tick(now);
    }
    if let Some(gallery) = c.gallery.as_mut() {
        gallery.tick(now);
    }
    if let Some(dialogue) = c.dialogue.as_mut() {
        dialogue.tick(now);
    }
    if let Some(contact) = c.contact.as_mut() {
        contact.tick(now);
    }
    if let Some(garden) = c.garden.as_mut() {
        garden.tick(now);
    }
    if let Some(book) = c.book.as_mut() {
        book.tick(now);
    }
    if let Some(card) = c.browser_card.as_mut() {
        card.on_frame();
    }
    c.confetti.tick(now);

    // Background particles only move while their section is on screen.
    if let Some(ambient) = c.ambient.as_mut() {
        if hero_visible {
            ambient.tick(now);
        } else {
            ambient.pause();
        }
    }
    if let Some(fireflies) = c.fireflies.as_mut() {
        if footer_visible {
            fireflies.tick(now);
        } else {
            fireflies.pause();
        }
    }

    ctx.notifications.tick(now);
    task
}

/// Whether the footer, where the fireflies live, is on screen.
pub fn footer_in_view(components: &Components, viewport: &Viewport) -> bool {
    components
        .footer
        .as_deref()
        .is_some_and(|id| section_in_view(&components.layout, viewport, id))
}

/// Whether anything needs frame ticks at `now`.
pub fn is_animating(components: &Components, viewport: &Viewport, now: Instant) -> bool {
    let c = components;
    c.hero.as_ref().is_some_and(|hero| hero.is_animating(now))
        || c.reveal.as_ref().is_some_and(|reveal| reveal.is_animating(now))
        || c.studio.as_ref().is_some_and(|studio| studio.is_animating(now))
        || c.gallery.as_ref().is_some_and(|gallery| gallery.is_animating())
        || c.dialogue.as_ref().is_some_and(|dialogue| dialogue.is_animating())
        || c.contact.as_ref().is_some_and(|contact| contact.is_animating())
        || c.router.is_animating()
        || c.counters.as_ref().is_some_and(|counters| counters.is_animating(now))
        || c.confetti.is_animating()
        || c.camera.as_ref().is_some_and(|camera| camera.is_animating(now))
        || c.garden.as_ref().is_some_and(|garden| garden.is_animating())
        || c.browser_card.as_ref().is_some_and(|card| card.is_animating(now))
        || c.certificates.as_ref().is_some_and(|certs| certs.is_animating(now))
        || c.book.as_ref().is_some_and(|book| book.is_animating())
        || (c.ambient.is_some() && section_in_view(&c.layout, viewport, HERO_SECTION))
        || (c.fireflies.is_some() && footer_in_view(c, viewport))
}

/// Starts a smooth scroll to `target`.
///
/// Ignored while the image viewer holds the page. Any navbar link click
/// brings the dismissed narrator back, even when the scroll does not start.
pub fn handle_navigation(
    ctx: &mut UpdateContext<'_>,
    target: &str,
    from_navbar: bool,
    now: Instant,
) -> Task<Message> {
    let c = &mut *ctx.components;
    if from_navbar {
        if let Some(dialogue) = c.dialogue.as_mut() {
            dialogue.nav_clicked(now);
        }
    }
    if c.modal.is_open() {
        log::debug!("Navigation to {target} ignored while the viewer is open");
        return Task::none();
    }
    if !c.router.navigate(target, &c.layout, ctx.viewport, now) {
        return Task::none();
    }
    c.chime();
    Task::none()
}

pub fn handle_navbar_message(
    ctx: &mut UpdateContext<'_>,
    message: navbar::Message,
    now: Instant,
) -> Task<Message> {
    match navbar::update(message) {
        navbar::Event::Navigate(target) => handle_navigation(ctx, &target, true, now),
        navbar::Event::ToggleTheme => {
            if let Some(key) = ctx.theme.toggle(ctx.app_state) {
                ctx.notifications.push(Notification::warning(key), now);
            }
            log::debug!("Theme switched to {:?}", ctx.theme.mode());
            ctx.components.chime();
            Task::none()
        }
    }
}

/// Opens the image viewer, freezing the page where it is.
fn open_modal(ctx: &mut UpdateContext<'_>, image: ModalImage) {
    let c = &mut *ctx.components;
    if c.modal.is_open() {
        return;
    }
    c.router.cancel();
    c.modal.open(image, ctx.viewport.offset_y);
    c.chime();
}

pub fn handle_escape(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let c = &mut *ctx.components;
    if c.modal.is_open() {
        c.modal.close();
    } else if let Some(certificates) = c.certificates.as_mut() {
        certificates.close();
    }
    Task::none()
}

pub fn handle_page_pressed(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.components.first_interaction.take() {
        ctx.components.chime();
    }
    Task::none()
}

pub fn handle_studio_message(
    ctx: &mut UpdateContext<'_>,
    message: studio::Message,
) -> Task<Message> {
    let Some(studio) = ctx.components.studio.as_ref() else {
        return Task::none();
    };
    match studio.update(message) {
        studio::Event::None => {}
        studio::Event::OpenImage {
            title,
            image,
            color,
        } => open_modal(
            ctx,
            ModalImage {
                title,
                path: image,
                color,
            },
        ),
    }
    Task::none()
}

pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
    now: Instant,
) -> Task<Message> {
    let Some(gallery) = ctx.components.gallery.as_mut() else {
        return Task::none();
    };
    match gallery.update(message, now) {
        gallery::Event::None => {}
        gallery::Event::Acknowledge => ctx.components.chime(),
        gallery::Event::OpenArtwork(image) => open_modal(ctx, image),
    }
    Task::none()
}

pub fn handle_modal_message(ctx: &mut UpdateContext<'_>, message: modal::Message) -> Task<Message> {
    if ctx.components.modal.update(message) == modal::Event::Closed {
        log::debug!("Image viewer closed");
    }
    Task::none()
}

pub fn handle_dialogue_message(
    ctx: &mut UpdateContext<'_>,
    message: dialogue::Message,
) -> Task<Message> {
    if let Some(dialogue) = ctx.components.dialogue.as_mut() {
        dialogue.update(message);
    }
    Task::none()
}

/// Drives the contact form; `Send` starts the delivery chain off the UI thread.
pub fn handle_contact_message(
    ctx: &mut UpdateContext<'_>,
    message: contact_form::Message,
    now: Instant,
) -> Task<Message> {
    let Some(form) = ctx.components.contact.as_mut() else {
        return Task::none();
    };
    match form.update(message, now, ctx.i18n) {
        contact_form::Event::None => Task::none(),
        contact_form::Event::Send(submission) => {
            let chain = ctx.contact_chain.clone();
            Task::perform(
                async move { chain.send(&submission).await },
                |result| Message::Contact(contact_form::Message::Finished(result)),
            )
        }
        contact_form::Event::Delivered(delivery) => {
            log::info!("Contact message delivered via {}", delivery.via);
            ctx.components.chime();
            ctx.components.confetti.burst();
            Task::none()
        }
        contact_form::Event::Failed(err) => {
            log::warn!("Contact message not delivered: {err}");
            Task::none()
        }
    }
}

pub fn handle_camera_message(
    ctx: &mut UpdateContext<'_>,
    message: camera::Message,
    now: Instant,
) -> Task<Message> {
    let Some(camera) = ctx.components.camera.as_mut() else {
        return Task::none();
    };
    if camera.update(message, now) == camera::Event::Shot {
        ctx.components.chime();
    }
    Task::none()
}

pub fn handle_garden_message(
    ctx: &mut UpdateContext<'_>,
    message: garden::Message,
    now: Instant,
) -> Task<Message> {
    let Some(garden) = ctx.components.garden.as_mut() else {
        return Task::none();
    };
    if let garden::Event::Bloomed(pot) = garden.update(message, now) {
        log::trace!("Pot {pot} bloomed");
        ctx.components.chime();
    }
    Task::none()
}

pub fn handle_browser_card_message(
    ctx: &mut UpdateContext<'_>,
    message: browser_card::Message,
) -> Task<Message> {
    if let Some(card) = ctx.components.browser_card.as_mut() {
        card.update(message);
    }
    Task::none()
}

pub fn handle_certificates_message(
    ctx: &mut UpdateContext<'_>,
    message: certificates::Message,
    now: Instant,
) -> Task<Message> {
    let Some(certificates) = ctx.components.certificates.as_mut() else {
        return Task::none();
    };
    match certificates.update(message, now) {
        certificates::Event::None => {}
        certificates::Event::OpenDocument(document) => open_external(ctx, &document, now),
    }
    Task::none()
}

pub fn handle_book_message(
    ctx: &mut UpdateContext<'_>,
    message: book::Message,
    now: Instant,
) -> Task<Message> {
    if let Some(book) = ctx.components.book.as_mut() {
        book.update(message, now);
    }
    Task::none()
}

pub fn handle_accordion_message(
    ctx: &mut UpdateContext<'_>,
    group: Group,
    message: accordion::Message,
    now: Instant,
) -> Task<Message> {
    let c = &mut *ctx.components;
    let accordion = match group {
        Group::Chapters => c.chapters.as_mut(),
        Group::CaseStudies => c.case_studies.as_mut(),
    };
    let Some(accordion) = accordion else {
        return Task::none();
    };

    match accordion.update(message) {
        accordion::Event::None => {}
        accordion::Event::Changed(open) => {
            if group == Group::CaseStudies {
                let url = open
                    .and_then(|index| accordion.panel(index))
                    .and_then(|panel| panel.url.as_deref());
                if let Some(card) = c.browser_card.as_mut() {
                    card.set_url(url, now);
                }
            }
        }
        accordion::Event::OpenUrl(url) => open_external(ctx, &url, now),
    }
    Task::none()
}

pub fn handle_ipod_message(ctx: &mut UpdateContext<'_>, message: ipod::Message) -> Task<Message> {
    let Some(ipod) = ctx.components.ipod.as_mut() else {
        return Task::none();
    };
    match ipod.update(message) {
        ipod::Event::IndexChanged(_) => ipod.snap_to_active(),
        ipod::Event::ScreenChanged | ipod::Event::None => Task::none(),
    }
}

/// Hands a document or URL to the system handler; failures become a toast.
fn open_external(ctx: &mut UpdateContext<'_>, target: &str, now: Instant) {
    log::debug!("Opening {target}");
    if let Err(err) = open::that_detached(target) {
        log::warn!("Could not open {target}: {err}");
        ctx.notifications.push(
            Notification::warning("notification-open-failed").with_arg("target", target),
            now,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bootstrap::{self, Capabilities};
    use crate::content::Content;
    use crate::ui::theming::ThemeMode;
    use tempfile::tempdir;

    struct Harness {
        i18n: I18n,
        components: Components,
        viewport: Viewport,
        theme: ThemeSwitcher,
        app_state: AppState,
        chain: ContactChain,
        notifications: notifications::Manager,
        resize_settle: Deadline,
        _store: tempfile::TempDir,
    }

    impl Harness {
        fn new(source: &str) -> Self {
            let content = Content::from_toml_str(source).expect("valid content");
            let layout = PageLayout::from_content(&content);
            let content_height = layout.content_height();
            let components = bootstrap::run(
                &content,
                Capabilities {
                    layout,
                    audio: None,
                    started_at: Instant::now(),
                    contact_recipient: "hello@example.com".into(),
                },
            );
            let store = tempdir().expect("temp dir");
            let app_state = AppState::default();
            let theme = ThemeSwitcher::init(
                &app_state,
                Some(store.path().to_path_buf()),
                || ThemeMode::Light,
            );
            let mut harness = Self {
                i18n: I18n::default(),
                components,
                viewport: Viewport::new(0.0, 600.0, content_height),
                theme,
                app_state,
                chain: ContactChain::default(),
                notifications: notifications::Manager::new(),
                resize_settle: Deadline::default(),
                _store: store,
            };
            observe_viewport(&mut harness.ctx(), Instant::now());
            harness
        }

        fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
                i18n: &self.i18n,
                components: &mut self.components,
                viewport: &mut self.viewport,
                theme: &mut self.theme,
                app_state: &mut self.app_state,
                contact_chain: &self.chain,
                notifications: &mut self.notifications,
                resize_settle: &mut self.resize_settle,
            }
        }
    }

    const PAGE: &str = r##"
        [[sections]]
        id = "hero"
        height = 800.0
        [[sections]]
        id = "studio"
        height = 1200.0
        [[sections]]
        id = "contact"
        height = 800.0

        [studio]
        entries = [{ title = "Fern", color = "#7FA37A", height = 600.0 }]

        [dialogue.captions]
        hero = { text = "Welcome" }
        contact = { text = "Say hi" }
    "##;

    #[test]
    fn open_viewer_blocks_navigation() {
        let mut harness = Harness::new(PAGE);
        let now = Instant::now();
        let mut ctx = harness.ctx();

        let _ = handle_studio_message(&mut ctx, studio::Message::OpenImage(0));
        assert!(ctx.components.modal.is_open());

        let _ = handle_navigation(&mut ctx, "contact", true, now);
        assert!(!ctx.components.router.is_animating());

        let _ = handle_escape(&mut ctx);
        assert!(!ctx.components.modal.is_open());
        let _ = handle_navigation(&mut ctx, "contact", true, now);
        assert!(ctx.components.router.is_animating());
    }

    #[test]
    fn router_reaches_its_target_through_ticks() {
        let mut harness = Harness::new(PAGE);
        let now = Instant::now();
        let mut ctx = harness.ctx();

        let _ = handle_navigation(&mut ctx, "studio", false, now);
        let _ = handle_tick(&mut ctx, now + Duration::from_secs(1));
        assert!(!ctx.components.router.is_animating());
    }

    #[test]
    fn unknown_section_does_not_navigate() {
        let mut harness = Harness::new(PAGE);
        let mut ctx = harness.ctx();
        let _ = handle_navigation(&mut ctx, "nowhere", true, Instant::now());
        assert!(!ctx.components.router.is_animating());
    }

    #[test]
    fn theme_toggle_persists_each_flip() {
        let mut harness = Harness::new(PAGE);
        let now = Instant::now();
        let mut ctx = harness.ctx();

        let _ = handle_navbar_message(&mut ctx, navbar::Message::ToggleTheme, now);
        assert_eq!(ctx.app_state.theme, Some(ThemeMode::Dark));
        let _ = handle_navbar_message(&mut ctx, navbar::Message::ToggleTheme, now);
        assert_eq!(ctx.app_state.theme, Some(ThemeMode::Light));
        assert!(!ctx.notifications.has_notifications());
    }

    #[test]
    fn dismissed_narrator_returns_after_navbar_navigation() {
        let mut harness = Harness::new(PAGE);
        let now = Instant::now();
        let mut ctx = harness.ctx();

        let _ = handle_dialogue_message(&mut ctx, dialogue::Message::Dismiss);
        assert!(!ctx.components.dialogue.as_ref().expect("dialogue").is_visible());

        let _ = handle_navbar_message(&mut ctx, navbar::Message::LinkPressed("contact".into()), now);
        let _ = handle_tick(&mut ctx, now + dialogue::REENABLE_DELAY);
        assert!(ctx.components.dialogue.as_ref().expect("dialogue").is_visible());
    }

    #[test]
    fn navbar_click_restores_narrator_when_navigation_is_refused() {
        let mut harness = Harness::new(PAGE);
        let now = Instant::now();
        let mut ctx = harness.ctx();

        let _ = handle_dialogue_message(&mut ctx, dialogue::Message::Dismiss);
        let _ = handle_studio_message(&mut ctx, studio::Message::OpenImage(0));
        let _ = handle_navbar_message(&mut ctx, navbar::Message::LinkPressed("contact".into()), now);
        assert!(!ctx.components.router.is_animating());

        let _ = handle_escape(&mut ctx);
        let _ = handle_navbar_message(&mut ctx, navbar::Message::LinkPressed("nowhere".into()), now);
        assert!(!ctx.components.router.is_animating());

        let _ = handle_tick(&mut ctx, now + dialogue::REENABLE_DELAY);
        assert!(ctx.components.dialogue.as_ref().expect("dialogue").is_visible());
    }

    #[test]
    fn resize_waits_to_settle() {
        let mut harness = Harness::new(PAGE);
        let now = Instant::now();
        let mut ctx = harness.ctx();

        let _ = handle_resized(&mut ctx, Size::new(800.0, 500.0), now);
        assert!(ctx.resize_settle.is_armed());
        let _ = handle_tick(&mut ctx, now + Duration::from_millis(RESIZE_SETTLE_MS));
        assert!(!ctx.resize_settle.is_armed());
    }

    #[test]
    fn first_press_is_taken_once() {
        let mut harness = Harness::new(PAGE);
        let mut ctx = harness.ctx();
        let _ = handle_page_pressed(&mut ctx);
        assert!(!ctx.components.first_interaction.take());
    }
}
