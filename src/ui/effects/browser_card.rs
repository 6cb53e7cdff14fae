// SPDX-License-Identifier: MPL-2.0
//! Mock browser window: tilts towards the pointer and types out the URL of
//! the open case study.

use crate::content::{Content, SectionId};
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::widget::{container, mouse_area, Column, Container, Row, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Point, Shadow, Theme, Vector};
use std::time::{Duration, Instant};

pub const MAX_TILT_DEG: f32 = 8.0;
pub const TYPE_INTERVAL: Duration = Duration::from_millis(60);
const CARD_HEIGHT: f32 = 260.0;

#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer position relative to the card.
    PointerMoved(Point),
    PointerLeft,
}

/// Rotation around each axis, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

impl Tilt {
    /// Tilt for a pointer at `point` over a card of `width` × `height`.
    #[must_use]
    pub fn towards(point: Point, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        let nx = (point.x / width).clamp(0.0, 1.0) - 0.5;
        let ny = (point.y / height).clamp(0.0, 1.0) - 0.5;
        Self {
            x: -ny * 2.0 * MAX_TILT_DEG,
            y: nx * 2.0 * MAX_TILT_DEG,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserCard {
    section: SectionId,
    tilt: Tilt,
    pending: Option<Point>,
    /// A frame has been requested and not yet applied.
    in_flight: bool,
    url: String,
    typing_since: Option<Instant>,
}

impl BrowserCard {
    #[must_use]
    pub fn new(content: &Content) -> Option<Self> {
        let block = content.browser_card.as_ref()?;
        Some(Self {
            section: block.section.clone(),
            tilt: Tilt::default(),
            pending: None,
            in_flight: false,
            url: String::new(),
            typing_since: None,
        })
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn tilt(&self) -> Tilt {
        self.tilt
    }

    /// Records a pointer move. Returns `true` when a new frame is needed;
    /// moves arriving while one is in flight only replace the pending point.
    pub fn pointer_moved(&mut self, point: Point) -> bool {
        self.pending = Some(point);
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn pointer_left(&mut self) {
        self.pending = None;
        self.in_flight = false;
        self.tilt = Tilt::default();
    }

    /// Applies the latest pointer position, once per frame.
    pub fn on_frame(&mut self) {
        if let Some(point) = self.pending.take() {
            self.tilt = Tilt::towards(point, sizing::BROWSER_CARD_WIDTH, CARD_HEIGHT);
        }
        self.in_flight = false;
    }

    /// Switches the address bar to `url`, restarting the typewriter.
    pub fn set_url(&mut self, url: Option<&str>, now: Instant) {
        let url = url.unwrap_or_default();
        if url == self.url {
            return;
        }
        self.url = url.to_string();
        self.typing_since = (!self.url.is_empty()).then_some(now);
    }

    /// The part of the URL typed so far.
    #[must_use]
    pub fn typed(&self, now: Instant) -> &str {
        let Some(since) = self.typing_since else {
            return &self.url;
        };
        let elapsed = now.saturating_duration_since(since);
        let count = (elapsed.as_millis() / TYPE_INTERVAL.as_millis()) as usize;
        match self.url.char_indices().nth(count) {
            Some((end, _)) => &self.url[..end],
            None => &self.url,
        }
    }

    #[must_use]
    pub fn is_typing(&self, now: Instant) -> bool {
        self.typing_since.is_some_and(|since| {
            let total = TYPE_INTERVAL * self.url.chars().count() as u32;
            now.saturating_duration_since(since) < total
        })
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.in_flight || self.is_typing(now)
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::PointerMoved(point) => {
                self.pointer_moved(point);
            }
            Message::PointerLeft => self.pointer_left(),
        }
    }

    pub fn view<'a>(&'a self, now: Instant) -> Element<'a, Message> {
        let dot = |color: Color| {
            Container::new(Text::new("●").size(typography::CAPTION).color(color))
        };
        let mut address = self.typed(now).to_string();
        if self.is_typing(now) {
            address.push('▏');
        }

        let chrome = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(dot(palette::ERROR_500))
            .push(dot(palette::WARNING_500))
            .push(dot(palette::SUCCESS_500))
            .push(
                Container::new(Text::new(address).size(typography::CAPTION))
                    .padding([spacing::XXS, spacing::SM])
                    .width(Length::Fill)
                    .style(|_theme: &Theme| container::Style {
                        background: Some(Background::Color(palette::STONE_100)),
                        text_color: Some(palette::STONE_600),
                        border: Border {
                            radius: radius::FULL.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }),
            );

        let tilt = self.tilt;
        let card = Container::new(Column::new().spacing(spacing::MD).push(chrome))
            .padding(spacing::SM)
            .width(Length::Fixed(sizing::BROWSER_CARD_WIDTH))
            .height(Length::Fixed(CARD_HEIGHT))
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(palette::PAPER)),
                text_color: Some(palette::INK),
                border: Border {
                    color: palette::STONE_200,
                    width: 1.0,
                    radius: radius::MD.into(),
                },
                shadow: Shadow {
                    color: Color {
                        a: 0.25,
                        ..palette::INK
                    },
                    offset: Vector::new(-tilt.y, tilt.x + 4.0),
                    blur_radius: 18.0 + tilt.x.abs().max(tilt.y.abs()),
                },
                ..Default::default()
            });

        mouse_area(card)
            .on_move(Message::PointerMoved)
            .on_exit(Message::PointerLeft)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn card() -> BrowserCard {
        let content =
            Content::from_toml_str("[browser_card]\nsection = \"websites\"").expect("valid");
        BrowserCard::new(&content).expect("card")
    }

    #[test]
    fn tilt_is_bounded_by_max() {
        let corner = Tilt::towards(Point::new(0.0, 0.0), 400.0, 200.0);
        assert_abs_diff_eq!(corner.x, MAX_TILT_DEG);
        assert_abs_diff_eq!(corner.y, -MAX_TILT_DEG);

        let outside = Tilt::towards(Point::new(900.0, -50.0), 400.0, 200.0);
        assert!(outside.x.abs() <= MAX_TILT_DEG && outside.y.abs() <= MAX_TILT_DEG);

        let centre = Tilt::towards(Point::new(200.0, 100.0), 400.0, 200.0);
        assert_abs_diff_eq!(centre.x, 0.0);
        assert_abs_diff_eq!(centre.y, 0.0);
    }

    #[test]
    fn moves_are_coalesced_per_frame() {
        let mut card = card();
        assert!(card.pointer_moved(Point::new(10.0, 10.0)));
        assert!(!card.pointer_moved(Point::new(20.0, 20.0)));
        assert!(!card.pointer_moved(Point::new(sizing::BROWSER_CARD_WIDTH, 0.0)));

        card.on_frame();
        assert_abs_diff_eq!(card.tilt().y, MAX_TILT_DEG);
        assert!(card.pointer_moved(Point::new(0.0, 0.0)));
    }

    #[test]
    fn leaving_resets_tilt() {
        let mut card = card();
        card.pointer_moved(Point::new(0.0, 0.0));
        card.on_frame();
        card.pointer_left();
        assert_eq!(card.tilt(), Tilt::default());
    }

    #[test]
    fn typewriter_restarts_on_new_url() {
        let mut card = card();
        let t0 = Instant::now();
        card.set_url(Some("https://fern.dev"), t0);
        assert_eq!(card.typed(t0), "");
        assert_eq!(card.typed(t0 + TYPE_INTERVAL * 5), "https");
        assert!(card.is_typing(t0 + TYPE_INTERVAL * 5));
        assert_eq!(card.typed(t0 + TYPE_INTERVAL * 100), "https://fern.dev");
        assert!(!card.is_typing(t0 + TYPE_INTERVAL * 16));

        let t1 = t0 + Duration::from_secs(5);
        card.set_url(Some("https://moss.shop"), t1);
        assert_eq!(card.typed(t1 + TYPE_INTERVAL * 2), "ht");

        card.set_url(Some("https://moss.shop"), t1 + Duration::from_secs(1));
        assert_eq!(card.typed(t1 + TYPE_INTERVAL * 2), "ht");
    }
}
