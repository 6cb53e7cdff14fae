// SPDX-License-Identifier: MPL-2.0
//! Certificate "desktop": one icon per certificate and a single pop-up window.
//!
//! Opening an icon while the window is already up swaps its content in place
//! and replays the pop-in, so every open is visibly animated. The window sits
//! inside the decorative monitor frame when the content declares one with a
//! usable size, otherwise it floats centred over the page.

use crate::content::{AccentColor, Certificate, Content, MonitorFrame, SectionId};
use crate::domain::timeline::ease_out_quad;
use crate::domain::{EffectState, Timeline};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, Column, Container, Row, Stack, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};
use std::time::{Duration, Instant};

pub const POP_IN: Duration = Duration::from_millis(350);

/// Window scale at the start of the pop-in.
const POP_IN_FROM: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Inside the monitor frame of the given size.
    InMonitor { width: f32, height: f32 },
    Centered,
}

impl Placement {
    fn for_monitor(monitor: Option<MonitorFrame>) -> Self {
        match monitor {
            Some(frame)
                if frame.width.is_finite()
                    && frame.height.is_finite()
                    && frame.width > 0.0
                    && frame.height > 0.0 =>
            {
                Placement::InMonitor {
                    width: frame.width,
                    height: frame.height,
                }
            }
            _ => Placement::Centered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopIn {
    Growing,
}

#[derive(Debug, Clone)]
pub enum Message {
    IconPressed(usize),
    ViewDocument,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Hand the document path or URL to the system handler.
    OpenDocument(String),
}

#[derive(Debug, Clone)]
pub struct Certificates {
    section: SectionId,
    items: Vec<Certificate>,
    placement: Placement,
    open: Option<usize>,
    pop_in: Timeline<PopIn>,
}

impl Certificates {
    /// `None` when the content has no certificates.
    #[must_use]
    pub fn new(content: &Content) -> Option<Self> {
        let block = content.certificates.as_ref()?;
        if block.items.is_empty() {
            return None;
        }
        Some(Self {
            section: block.section.clone(),
            items: block.items.clone(),
            placement: Placement::for_monitor(block.monitor),
            open: None,
            pop_in: Timeline::new(vec![(PopIn::Growing, POP_IN)]),
        })
    }

    /// Shows certificate `index`, replacing whatever the window showed.
    ///
    /// Returns `false` for an unknown index.
    pub fn open(&mut self, index: usize, now: Instant) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        log::debug!("Opening certificate window: {}", item.name);
        self.open = Some(index);
        self.pop_in.trigger(now);
        true
    }

    pub fn close(&mut self) {
        self.open = None;
        self.pop_in.cancel();
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    #[must_use]
    pub fn window(&self) -> Option<&Certificate> {
        self.items.get(self.open?)
    }

    #[must_use]
    pub fn items(&self) -> &[Certificate] {
        &self.items
    }

    /// Pop-in progress in `[0, 1]`; 1 once settled.
    #[must_use]
    pub fn pop_in_progress(&self, now: Instant) -> f32 {
        match self.pop_in.state(now) {
            EffectState::Transitioning { progress, .. } => ease_out_quad(progress),
            EffectState::Idle | EffectState::Settled => 1.0,
        }
    }

    /// Generation of the latest pop-in run; bumps on every open.
    #[must_use]
    pub fn pop_in_generation(&self) -> u64 {
        self.pop_in.generation()
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.open.is_some() && self.pop_in.is_running(now)
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::IconPressed(index) => {
                self.open(index, now);
                Event::None
            }
            Message::ViewDocument => match self.window().and_then(|c| c.document.clone()) {
                Some(document) => Event::OpenDocument(document),
                None => Event::None,
            },
            Message::Close => {
                self.close();
                Event::None
            }
        }
    }

    /// Desktop icons, with the window inside the monitor when there is one.
    pub fn view<'a>(&'a self, i18n: &'a I18n, now: Instant) -> Element<'a, Message> {
        let mut icons = Row::new().spacing(spacing::MD);
        for (index, item) in self.items.iter().enumerate() {
            let accent = accent_of(item);
            let icon = Column::new()
                .spacing(spacing::XXS)
                .align_x(alignment::Horizontal::Center)
                .width(Length::Fixed(sizing::DESKTOP_ICON))
                .push(Text::new("📜").size(typography::TITLE_LG).color(accent))
                .push(
                    Text::new(item.name.as_str())
                        .size(typography::CAPTION)
                        .align_x(alignment::Horizontal::Center),
                );
            icons = icons.push(
                button(icon)
                    .on_press(Message::IconPressed(index))
                    .padding(spacing::XS)
                    .style(styles::button::bare),
            );
        }

        let Placement::InMonitor { width, height } = self.placement else {
            return icons.into();
        };

        let mut screen = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(Container::new(icons).padding(spacing::MD));
        if let Some(window) = self.view_window(i18n, now) {
            screen = screen.push(
                Container::new(window)
                    .center_x(Length::Fill)
                    .center_y(Length::Fill),
            );
        }

        Container::new(screen)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .clip(true)
            .style(monitor_style)
            .into()
    }

    /// The window floating over the page, for the centred placement.
    pub fn view_overlay<'a>(&'a self, i18n: &'a I18n, now: Instant) -> Option<Element<'a, Message>> {
        if self.placement != Placement::Centered {
            return None;
        }
        let window = self.view_window(i18n, now)?;
        Some(
            Container::new(window)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        )
    }

    fn view_window<'a>(&'a self, i18n: &'a I18n, now: Instant) -> Option<Element<'a, Message>> {
        let item = self.window()?;
        let accent = accent_of(item);
        let progress = self.pop_in_progress(now);
        let scale = POP_IN_FROM + (1.0 - POP_IN_FROM) * progress;

        let title_bar = Row::new()
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(item.name.as_str())
                    .size(typography::TITLE_SM)
                    .width(Length::Fill),
            )
            .push(
                button(Text::new("×").size(typography::BODY_LG))
                    .on_press(Message::Close)
                    .padding(spacing::XXS)
                    .style(styles::button::ghost),
            );

        let mut body = Column::new()
            .spacing(spacing::SM)
            .push(title_bar)
            .push(
                Text::new(i18n.tr_with_args("certificate-issued-by", &[("issuer", &item.issuer)]))
                    .size(typography::BODY)
                    .color(accent),
            );
        if !item.description.is_empty() {
            body = body.push(Text::new(item.description.as_str()).size(typography::BODY));
        }
        if item.document.is_some() {
            body = body.push(
                button(Text::new(i18n.tr("certificate-view-document")))
                    .on_press(Message::ViewDocument)
                    .style(styles::button::pill),
            );
        }

        Some(
            Container::new(body)
                .padding(spacing::MD)
                .width(Length::Fixed(sizing::CERT_WINDOW_WIDTH * scale))
                .max_height(sizing::CERT_WINDOW_HEIGHT * scale)
                .style(move |theme: &Theme| container::Style {
                    border: Border {
                        color: Color {
                            a: progress,
                            ..accent
                        },
                        width: border::WIDTH_MD,
                        radius: radius::MD.into(),
                    },
                    shadow: shadow::LG,
                    ..styles::container::card(theme)
                })
                .into(),
        )
    }
}

fn accent_of(item: &Certificate) -> Color {
    item.color
        .as_deref()
        .and_then(AccentColor::parse)
        .map_or(palette::SAGE_500, AccentColor::color)
}

fn monitor_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::STONE_800
        })),
        border: Border {
            color: palette::STONE_600,
            width: border::WIDTH_LG,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(monitor: &str) -> Content {
        Content::from_toml_str(&format!(
            r##"
            [certificates]
            {monitor}
            items = [
                {{ name = "UX Design", issuer = "Google", document = "certs/ux.pdf" }},
                {{ name = "Botany", issuer = "Kew", color = "#6b8f71" }},
            ]
            "##
        ))
        .expect("valid content")
    }

    #[test]
    fn measurable_monitor_hosts_the_window() {
        let certs =
            Certificates::new(&content("monitor = { width = 640, height = 400 }")).expect("certs");
        assert_eq!(
            certs.placement(),
            Placement::InMonitor {
                width: 640.0,
                height: 400.0
            }
        );
    }

    #[test]
    fn zero_sized_or_missing_monitor_centres_the_window() {
        let zero =
            Certificates::new(&content("monitor = { width = 0, height = 400 }")).expect("certs");
        assert_eq!(zero.placement(), Placement::Centered);
        let none = Certificates::new(&content("")).expect("certs");
        assert_eq!(none.placement(), Placement::Centered);
    }

    #[test]
    fn opening_another_certificate_replaces_in_place() {
        let mut certs = Certificates::new(&content("")).expect("certs");
        let t0 = Instant::now();
        certs.update(Message::IconPressed(0), t0);
        assert_eq!(certs.window().map(|c| c.name.as_str()), Some("UX Design"));

        certs.update(Message::IconPressed(1), t0 + Duration::from_millis(100));
        assert_eq!(certs.open_index(), Some(1));
        assert_eq!(certs.window().map(|c| c.name.as_str()), Some("Botany"));
    }

    #[test]
    fn every_open_replays_pop_in() {
        let mut certs = Certificates::new(&content("")).expect("certs");
        let t0 = Instant::now();
        certs.open(0, t0);
        let first = certs.pop_in_generation();
        assert!(certs.pop_in_progress(t0) < 0.01);
        assert!(!certs.is_animating(t0 + POP_IN));

        let t1 = t0 + Duration::from_secs(2);
        certs.open(0, t1);
        assert!(certs.pop_in_generation() > first);
        assert!(certs.is_animating(t1));
        assert!(certs.pop_in_progress(t1) < 0.01);
    }

    #[test]
    fn view_document_only_with_a_document() {
        let mut certs = Certificates::new(&content("")).expect("certs");
        let now = Instant::now();
        assert_eq!(certs.update(Message::ViewDocument, now), Event::None);

        certs.open(0, now);
        assert_eq!(
            certs.update(Message::ViewDocument, now),
            Event::OpenDocument("certs/ux.pdf".into())
        );
        certs.open(1, now);
        assert_eq!(certs.update(Message::ViewDocument, now), Event::None);
    }

    #[test]
    fn close_button_closes_and_unknown_index_is_ignored() {
        let mut certs = Certificates::new(&content("")).expect("certs");
        let now = Instant::now();
        assert!(!certs.open(7, now));
        assert!(certs.window().is_none());

        certs.open(1, now);
        certs.update(Message::Close, now);
        assert!(certs.window().is_none());
        assert!(!certs.is_animating(now));
    }

    #[test]
    fn empty_list_skips_component() {
        let content = Content::from_toml_str("[certificates]\nitems = []").expect("valid");
        assert!(Certificates::new(&content).is_none());
    }
}
