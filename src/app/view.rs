// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The window is a column: navbar, scroll progress bar, then the page. The
//! page is one scrollable holding every section at its laid-out height, with
//! the overlays (phone preview, narrator, certificate window, confetti, image
//! viewer, toasts) stacked above it.

use super::bootstrap::Components;
use super::update::PAGE_ID;
use super::Message;
use crate::content::{Content, Section};
use crate::domain::Viewport;
use crate::i18n::fluent::I18n;
use crate::ui::accordion::Group;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::effects::particles;
use crate::ui::hero::{self, HERO_SECTION};
use crate::ui::navbar::{self, ViewContext as NavbarViewContext};
use crate::ui::notifications::{self, Toast};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::Scrollable;
use iced::widget::{button, Column, Container, Id, Space, Stack, Text};
use iced::{alignment, Element, Length, Padding};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub content: &'a Content,
    pub components: &'a Components,
    pub viewport: &'a Viewport,
    pub theme_mode: ThemeMode,
    pub notifications: &'a notifications::Manager,
    pub now: Instant,
}

/// Renders the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let navbar = navbar::view(NavbarViewContext {
        i18n: ctx.i18n,
        links: &ctx.content.nav,
        theme_mode: ctx.theme_mode,
    })
    .map(Message::Navbar);

    let mut column = Column::new().width(Length::Fill).height(Length::Fill).push(navbar);
    if ctx.components.progress {
        column = column.push(hero::progress_bar(ctx.viewport));
    }

    let page = Scrollable::new(view_sections(&ctx))
        .id(Id::new(PAGE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(Message::Scrolled);

    let mut layers = Stack::new().width(Length::Fill).height(Length::Fill).push(page);
    for overlay in view_overlays(&ctx) {
        layers = layers.push(overlay);
    }

    Container::new(column.push(layers))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::page)
        .into()
}

fn view_sections<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut sections = Column::new().width(Length::Fill);
    for section in &ctx.content.sections {
        sections = sections.push(view_section(ctx, section));
    }
    sections.into()
}

/// One section at exactly its laid-out height.
fn view_section<'a>(ctx: &ViewContext<'a>, section: &'a Section) -> Element<'a, Message> {
    let c = ctx.components;
    let id = section.id.as_str();
    let height = framed_height(c, section);

    let body: Element<'a, Message> = if id == HERO_SECTION && c.hero.is_some() {
        let mut stack = Stack::new().width(Length::Fill).height(Length::Fill);
        if let Some(ambient) = &c.ambient {
            stack = stack.push(particles::view(ambient.dots()));
        }
        if let Some(hero) = &c.hero {
            stack = stack.push(hero.view(ctx.now));
        }
        if let Some(next) = next_section(ctx.content, id) {
            stack = stack.push(
                Container::new(
                    button(Text::new("↓").size(typography::TITLE_MD))
                        .on_press(Message::Navigate(next.to_string()))
                        .padding([spacing::XS, spacing::MD])
                        .style(styles::button::ghost),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::LG)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Bottom),
            );
        }
        stack.into()
    } else if let Some(studio) = c.studio.as_ref().filter(|_| {
        ctx.content
            .studio
            .as_ref()
            .is_some_and(|block| block.section == id)
    }) {
        let intro_height = ctx
            .content
            .studio
            .as_ref()
            .map_or(0.0, |block| block.intro_height);
        Column::new()
            .push(
                Container::new(section_title(section))
                    .height(Length::Fixed(intro_height.max(0.0)))
                    .padding([spacing::LG, spacing::XL]),
            )
            .push(studio.view_entries(ctx.i18n).map(Message::Studio))
            .into()
    } else {
        let mut column = Column::new()
            .spacing(spacing::LG)
            .padding([spacing::XL, spacing::XL])
            .width(Length::Fill);
        if !section.title.is_empty() {
            column = column.push(section_title(section));
        }
        for element in section_components(ctx, id) {
            column = column.push(element);
        }
        column.into()
    };

    let body: Element<'a, Message> = match &c.fireflies {
        Some(fireflies) if c.footer.as_deref() == Some(id) => Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(particles::view(fireflies.dots()))
            .push(body)
            .into(),
        _ => body,
    };

    let framed = Container::new(body)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .clip(true);

    // Unrevealed sections sit under a page-colored veil that lifts as they
    // fade in, shifted down by the remaining reveal offset.
    let Some(reveal) = c.reveal.as_ref().filter(|_| section.reveal) else {
        return framed.into();
    };
    let opacity = reveal.opacity(id, ctx.now);
    if opacity >= 1.0 {
        return framed.into();
    }
    let shifted = framed.padding(Padding::ZERO.top(reveal.offset(id, ctx.now).max(0.0)));

    Stack::new()
        .push(shifted)
        .push(
            Container::new(Space::new())
                .width(Length::Fill)
                .height(Length::Fixed(height))
                .style(styles::container::veil(1.0 - opacity)),
        )
        .into()
}

/// Height the section occupies on the page.
///
/// The layout may grow a section past its declared height to fit studio
/// entries, so the frame follows the layout.
fn framed_height(components: &Components, section: &Section) -> f32 {
    components
        .layout
        .section(&section.id)
        .map_or(section.height, |element| element.height)
        .max(0.0)
}

/// Section following `id` in page order.
fn next_section<'a>(content: &'a Content, id: &str) -> Option<&'a str> {
    let index = content.sections.iter().position(|section| section.id == id)?;
    content
        .sections
        .get(index + 1)
        .map(|section| section.id.as_str())
}

fn section_title(section: &Section) -> Text<'_> {
    Text::new(section.title.as_str()).size(typography::TITLE_LG)
}

/// Every component placed in section `id`, in page order.
fn section_components<'a>(ctx: &ViewContext<'a>, id: &str) -> Vec<Element<'a, Message>> {
    let c = ctx.components;
    let content = ctx.content;
    let i18n = ctx.i18n;
    let now = ctx.now;
    let mut elements: Vec<Element<'a, Message>> = Vec::new();

    if let Some(counters) = c.counters.as_ref().filter(|counters| counters.section() == id) {
        elements.push(counters.view(now));
    }
    if let Some(camera) = c.camera.as_ref().filter(|camera| camera.section() == id) {
        elements.push(camera.view(i18n, now).map(Message::Camera));
    }
    if let Some(gallery) = c.gallery.as_ref().filter(|_| {
        content
            .gallery
            .as_ref()
            .is_some_and(|block| block.section == id)
    }) {
        elements.push(gallery.view(i18n, now).map(Message::Gallery));
    }
    if let Some(card) = c.browser_card.as_ref().filter(|card| card.section() == id) {
        elements.push(card.view(now).map(Message::BrowserCard));
    }
    if let Some(accordion) = c.case_studies.as_ref().filter(|a| a.section() == id) {
        elements.push(
            accordion
                .view(i18n)
                .map(|message| Message::Accordion(Group::CaseStudies, message)),
        );
    }
    if let Some(book) = c.book.as_ref().filter(|book| book.section() == id) {
        elements.push(book.view(i18n).map(Message::Book));
    }
    if let Some(accordion) = c.chapters.as_ref().filter(|a| a.section() == id) {
        elements.push(
            accordion
                .view(i18n)
                .map(|message| Message::Accordion(Group::Chapters, message)),
        );
    }
    if let Some(certificates) = c.certificates.as_ref().filter(|certs| certs.section() == id) {
        elements.push(certificates.view(i18n, now).map(Message::Certificates));
    }
    if let Some(garden) = c.garden.as_ref().filter(|garden| garden.section() == id) {
        elements.push(garden.view(now).map(Message::Garden));
    }
    if let Some(ipod) = c.ipod.as_ref().filter(|ipod| ipod.section() == id) {
        elements.push(ipod.view(i18n).map(Message::Ipod));
    }
    if let Some(form) = c.contact.as_ref().filter(|_| {
        content
            .contact
            .as_ref()
            .is_some_and(|block| block.section == id)
    }) {
        elements.push(form.view(i18n).map(Message::Contact));
    }

    elements
}

/// Layers drawn above the page, bottom to top.
fn view_overlays<'a>(ctx: &ViewContext<'a>) -> Vec<Element<'a, Message>> {
    let c = ctx.components;
    let mut layers: Vec<Element<'a, Message>> = Vec::new();

    if let Some(preview) = c.studio.as_ref().and_then(|studio| studio.view_preview(ctx.now)) {
        layers.push(
            Container::new(preview.map(Message::Studio))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::XL)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Center)
                .into(),
        );
    }

    if let Some(panel) = c.dialogue.as_ref().and_then(|dialogue| dialogue.view(ctx.i18n)) {
        layers.push(
            Container::new(panel.map(Message::Dialogue))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::LG)
                .align_x(alignment::Horizontal::Left)
                .align_y(alignment::Vertical::Bottom)
                .into(),
        );
    }

    if let Some(window) = c
        .certificates
        .as_ref()
        .and_then(|certificates| certificates.view_overlay(ctx.i18n, ctx.now))
    {
        layers.push(window.map(Message::Certificates));
    }

    if !c.confetti.is_empty() {
        layers.push(particles::view(c.confetti.dots()));
    }

    if let Some(viewer) = c.modal.view() {
        layers.push(viewer.map(Message::Modal));
    }

    if ctx.notifications.has_notifications() {
        layers.push(
            Container::new(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::MD)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Bottom)
                .into(),
        );
    }

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bootstrap::{self, Capabilities};
    use crate::domain::PageLayout;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn embedded_page_renders_in_both_themes() {
        let content = Content::embedded().expect("embedded content");
        let layout = PageLayout::from_content(&content);
        let viewport = Viewport::new(0.0, 700.0, layout.content_height());
        let now = Instant::now();
        let components = bootstrap::run(
            &content,
            Capabilities {
                layout,
                audio: None,
                started_at: now,
                contact_recipient: "hello@example.com".into(),
            },
        );
        let i18n = I18n::default();
        let manager = notifications::Manager::new();

        for theme_mode in [ThemeMode::Light, ThemeMode::Dark] {
            let _element = view(ViewContext {
                i18n: &i18n,
                content: &content,
                components: &components,
                viewport: &viewport,
                theme_mode,
                notifications: &manager,
                now,
            });
        }
    }

    #[test]
    fn sections_are_framed_at_their_laid_out_heights() {
        let content = Content::from_toml_str(
            r##"
            [[sections]]
            id = "studio"
            height = 500.0
            [[sections]]
            id = "contact"
            height = 600.0

            [studio]
            section = "studio"
            intro_height = 0.0

            [[studio.entries]]
            title = "One"
            height = 700.0
            [[studio.entries]]
            title = "Two"
            height = 700.0
            "##,
        )
        .expect("valid content");
        let layout = PageLayout::from_content(&content);
        let components = bootstrap::run(
            &content,
            Capabilities {
                layout: layout.clone(),
                audio: None,
                started_at: Instant::now(),
                contact_recipient: String::new(),
            },
        );

        let mut top = 0.0;
        for section in &content.sections {
            let laid_out = layout.section(&section.id).expect("laid out");
            assert_abs_diff_eq!(top, laid_out.top);
            let height = framed_height(&components, section);
            assert_abs_diff_eq!(height, laid_out.height);
            top += height;
        }
        assert_abs_diff_eq!(top, layout.content_height());
        assert_abs_diff_eq!(top, 2000.0);
    }

    #[test]
    fn hero_anchor_targets_the_following_section() {
        let content = Content::from_toml_str(
            r#"
            [[sections]]
            id = "hero"
            height = 800.0
            [[sections]]
            id = "about"
            height = 600.0
            "#,
        )
        .expect("valid content");
        assert_eq!(next_section(&content, "hero"), Some("about"));
        assert_eq!(next_section(&content, "about"), None);
        assert_eq!(next_section(&content, "missing"), None);
    }

    #[test]
    fn empty_page_renders_navbar_only() {
        let content = Content::default();
        let layout = PageLayout::from_content(&content);
        let viewport = Viewport::new(0.0, 700.0, 0.0);
        let now = Instant::now();
        let components = bootstrap::run(
            &content,
            Capabilities {
                layout,
                audio: None,
                started_at: now,
                contact_recipient: String::new(),
            },
        );
        let i18n = I18n::default();
        let manager = notifications::Manager::new();
        let _element = view(ViewContext {
            i18n: &i18n,
            content: &content,
            components: &components,
            viewport: &viewport,
            theme_mode: ThemeMode::Light,
            notifications: &manager,
            now,
        });
    }
}
