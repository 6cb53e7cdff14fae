// SPDX-License-Identifier: MPL-2.0
//! Narrator panel that comments on the section in view.
//!
//! Dismissing the panel silences it until the visitor uses a navigation
//! link; it then comes back shortly after with the caption of wherever the
//! page currently is.

use crate::content::{Caption, Content, SectionId};
use crate::domain::{Deadline, ElementBox, IntersectionObserver, PageLayout, Viewport};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, Container, Row, Text};
use iced::{alignment, Border, Element, Length, Theme};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

pub const DIALOGUE_THRESHOLD: f32 = 0.3;
/// Delay between a navigation click and the narrator returning.
pub const REENABLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss,
}

#[derive(Debug, Clone)]
pub struct Dialogue {
    observer: IntersectionObserver<SectionId>,
    /// Every section in page order, footer included.
    sections: Vec<(SectionId, ElementBox)>,
    captions: BTreeMap<SectionId, Caption>,
    current: Option<SectionId>,
    enabled: bool,
    reenable: Deadline,
}

impl Dialogue {
    /// `None` without a dialogue block. Starts on the first captioned section.
    #[must_use]
    pub fn new(content: &Content, layout: &PageLayout) -> Option<Self> {
        let captions = content.dialogue.as_ref()?.captions.clone();
        let sections: Vec<_> = layout
            .sections()
            .map(|(id, element)| (id.clone(), *element))
            .collect();
        let current = sections
            .iter()
            .map(|(id, _)| id)
            .find(|id| captions.contains_key(*id))
            .cloned();

        Some(Self {
            observer: IntersectionObserver::new(DIALOGUE_THRESHOLD, 0.0),
            sections,
            captions,
            current,
            enabled: true,
            reenable: Deadline::default(),
        })
    }

    /// Switches to the caption of each section that starts intersecting.
    pub fn observe(&mut self, viewport: &Viewport) {
        let crossings = self.observer.observe(
            self.sections.iter().map(|(id, element)| (id, element)),
            viewport,
        );
        if !self.enabled {
            return;
        }
        for crossing in crossings.into_iter().filter(|c| c.entering) {
            if self.captions.contains_key(&crossing.key) {
                self.current = Some(crossing.key);
            }
        }
    }

    pub fn dismiss(&mut self) {
        self.enabled = false;
        self.reenable.disarm();
    }

    /// A navigation link was used; the narrator returns after a short delay.
    pub fn nav_clicked(&mut self, now: Instant) {
        self.reenable.arm(now, REENABLE_DELAY);
    }

    pub fn tick(&mut self, now: Instant) {
        if !self.reenable.fire(now) {
            return;
        }
        self.enabled = true;
        let observer = &self.observer;
        let captions = &self.captions;
        if let Some((id, _)) = self
            .sections
            .iter()
            .find(|(id, _)| observer.is_key_intersecting(id) && captions.contains_key(id))
        {
            self.current = Some(id.clone());
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.enabled && self.caption().is_some()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.reenable.is_armed()
    }

    #[must_use]
    pub fn current_section(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn caption(&self) -> Option<&Caption> {
        self.captions.get(self.current.as_ref()?)
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Dismiss => self.dismiss(),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Option<Element<'a, Message>> {
        if !self.enabled {
            return None;
        }
        let caption = self.caption()?;

        let mut line = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(caption.text.as_str())
                    .size(typography::BODY)
                    .width(Length::Fill),
            );
        if let Some(glyph) = caption.icon_glyph() {
            line = line.push(Text::new(glyph).size(typography::BODY_LG));
        }
        line = line.push(
            button(Text::new("×").size(typography::BODY_LG))
                .on_press(Message::Dismiss)
                .padding(spacing::XXS)
                .style(styles::button::ghost),
        );

        Some(
            Container::new(
                iced::widget::Column::new()
                    .spacing(spacing::XXS)
                    .push(
                        Text::new(i18n.tr("dialogue-speaker"))
                            .size(typography::CAPTION)
                            .style(|theme: &Theme| iced::widget::text::Style {
                                color: Some(theme.extended_palette().primary.base.color),
                            }),
                    )
                    .push(line),
            )
            .width(Length::Fixed(sizing::DIALOGUE_WIDTH))
            .padding(spacing::MD)
            .style(|theme: &Theme| container::Style {
                border: Border {
                    color: theme.extended_palette().primary.base.color,
                    width: border::WIDTH_MD,
                    radius: radius::LG.into(),
                },
                ..styles::container::card(theme)
            })
            .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Content {
        Content::from_toml_str(
            r#"
            [[sections]]
            id = "hero"
            height = 1000

            [[sections]]
            id = "about"
            height = 1000

            [[sections]]
            id = "designs"
            height = 1000

            [[sections]]
            id = "footer"
            height = 400
            footer = true

            [dialogue.captions]
            hero = { text = "Welcome to my garden!", icon = "eco" }
            about = { text = "A little about me." }
            designs = { text = "Click any piece!", icon = "auto_awesome" }
            "#,
        )
        .expect("valid content")
    }

    fn dialogue() -> Dialogue {
        let content = content();
        Dialogue::new(&content, &PageLayout::from_content(&content)).expect("dialogue")
    }

    fn at(offset: f32) -> Viewport {
        Viewport::new(offset, 1000.0, 3400.0)
    }

    #[test]
    fn starts_with_hero_caption() {
        let dialogue = dialogue();
        assert_eq!(dialogue.current_section(), Some("hero"));
        assert!(dialogue.is_visible());
    }

    #[test]
    fn follows_sections_into_view() {
        let mut dialogue = dialogue();
        dialogue.observe(&at(0.0));
        dialogue.observe(&at(1000.0));
        assert_eq!(dialogue.current_section(), Some("about"));
        assert_eq!(
            dialogue.caption().map(|c| c.text.as_str()),
            Some("A little about me.")
        );
    }

    #[test]
    fn uncaptioned_sections_keep_previous_caption() {
        let mut dialogue = dialogue();
        dialogue.observe(&at(2000.0));
        dialogue.observe(&at(2400.0));
        assert_eq!(dialogue.current_section(), Some("designs"));
    }

    #[test]
    fn dismissed_narrator_ignores_scrolling() {
        let mut dialogue = dialogue();
        dialogue.observe(&at(0.0));
        dialogue.dismiss();
        dialogue.observe(&at(1000.0));
        assert!(!dialogue.is_visible());
        assert_eq!(dialogue.current_section(), Some("hero"));
    }

    #[test]
    fn nav_click_brings_back_current_caption_after_delay() {
        let mut dialogue = dialogue();
        let t0 = Instant::now();
        dialogue.observe(&at(0.0));
        dialogue.dismiss();
        dialogue.observe(&at(2000.0));

        dialogue.nav_clicked(t0);
        dialogue.tick(t0 + Duration::from_millis(50));
        assert!(!dialogue.is_visible());

        dialogue.tick(t0 + REENABLE_DELAY);
        assert!(dialogue.is_visible());
        assert_eq!(dialogue.current_section(), Some("designs"));
        assert!(!dialogue.is_animating());
    }

    #[test]
    fn missing_block_skips_component() {
        let content = Content::default();
        assert!(Dialogue::new(&content, &PageLayout::from_content(&content)).is_none());
    }
}
