// SPDX-License-Identifier: MPL-2.0
//! Endless artwork marquee with speed controls.
//!
//! The track loops at a configurable number of seconds per pass. Hovering
//! the track holds it still unless it was already paused with the pause
//! button, in which case only the play or reset buttons start it again.
//! Each control press chimes and flashes a short confirmation next to the
//! controls. A soft spotlight follows the pointer over the section.

use crate::config::defaults::{
    DEFAULT_GALLERY_SPEED_SECS, GALLERY_SPEED_STEP_SECS, MAX_GALLERY_SPEED_SECS,
    MIN_GALLERY_SPEED_SECS,
};
use crate::content::{AccentColor, Artwork, Content};
use crate::domain::{ElementBox, PageLayout, Viewport};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, opacity, palette, radius, sizing, spacing, typography};
use crate::ui::modal::ModalImage;
use crate::ui::styles;
use iced::widget::{
    button, container, image, mouse_area, Column, Container, Row, Space, Stack, Text,
};
use iced::{alignment, Background, Border, Color, Element, Length, Padding, Point, Shadow,
    Theme, Vector};
use std::time::{Duration, Instant};

/// How long a control confirmation stays fully visible.
pub const FEEDBACK_VISIBLE: Duration = Duration::from_millis(1000);
/// Fade-out after [`FEEDBACK_VISIBLE`]; the text is then removed.
pub const FEEDBACK_FADE: Duration = Duration::from_millis(200);

const SPOTLIGHT_RADIUS: f32 = 140.0;

/// Longest frame gap the marquee advances by; longer gaps mean ticking
/// was suspended.
const MAX_FRAME_GAP: Duration = Duration::from_millis(250);

/// Seconds per marquee loop; lower is faster.
///
/// Always within `MIN_GALLERY_SPEED_SECS..=MAX_GALLERY_SPEED_SECS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GallerySpeed(u32);

impl GallerySpeed {
    /// Creates a speed, clamping to the valid range.
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self(seconds.clamp(MIN_GALLERY_SPEED_SECS, MAX_GALLERY_SPEED_SECS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }

    /// One step faster (shorter loop).
    #[must_use]
    pub fn faster(self) -> Self {
        Self::new(self.0.saturating_sub(GALLERY_SPEED_STEP_SECS))
    }

    /// One step slower (longer loop).
    #[must_use]
    pub fn slower(self) -> Self {
        Self::new(self.0 + GALLERY_SPEED_STEP_SECS)
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_GALLERY_SPEED_SECS
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_GALLERY_SPEED_SECS
    }
}

impl Default for GallerySpeed {
    fn default() -> Self {
        Self(DEFAULT_GALLERY_SPEED_SECS)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    SpeedUp,
    SpeedDown,
    Pause,
    Play,
    Reset,
    TrackEntered,
    TrackExited,
    ArtworkPressed(usize),
    PointerMoved(Point),
    PointerLeft,
}

#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// A control was pressed; the app plays the chime.
    Acknowledge,
    OpenArtwork(ModalImage),
}

/// A control confirmation on its way out.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub key: &'static str,
    pub shown_at: Instant,
}

impl Feedback {
    /// 1 while fully visible, then fading to 0.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.shown_at);
        if age <= FEEDBACK_VISIBLE {
            1.0
        } else {
            let fading = (age - FEEDBACK_VISIBLE).as_secs_f32() / FEEDBACK_FADE.as_secs_f32();
            (1.0 - fading).clamp(0.0, 1.0)
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= FEEDBACK_VISIBLE + FEEDBACK_FADE
    }
}

/// First tile and width of the partially visible leading tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeWindow {
    pub first: usize,
    pub lead: f32,
}

/// Maps loop progress to the tiles on screen.
#[must_use]
pub fn marquee_window(phase: f32, tiles: usize, step: f32) -> MarqueeWindow {
    if tiles == 0 || step <= 0.0 {
        return MarqueeWindow {
            first: 0,
            lead: 0.0,
        };
    }
    let offset = phase.rem_euclid(1.0) * tiles as f32 * step;
    let shifted = (offset / step).floor();
    MarqueeWindow {
        first: (shifted as usize) % tiles,
        lead: step - (offset - shifted * step),
    }
}

#[derive(Debug, Clone)]
pub struct Gallery {
    artworks: Vec<Artwork>,
    section: ElementBox,
    speed: GallerySpeed,
    paused_by_button: bool,
    hovered: bool,
    /// Loop progress in `[0, 1)`.
    phase: f32,
    last_tick: Option<Instant>,
    in_view: bool,
    feedback: Vec<Feedback>,
    spotlight: Option<Point>,
}

impl Gallery {
    #[must_use]
    pub fn new(content: &Content, layout: &PageLayout) -> Option<Self> {
        let gallery = content.gallery.as_ref()?;
        if gallery.artworks.is_empty() {
            return None;
        }
        Some(Self {
            artworks: gallery.artworks.clone(),
            section: layout.section(&gallery.section)?,
            speed: GallerySpeed::default(),
            paused_by_button: false,
            hovered: false,
            phase: 0.0,
            last_tick: None,
            in_view: false,
            feedback: Vec::new(),
            spotlight: None,
        })
    }

    #[must_use]
    pub fn speed(&self) -> GallerySpeed {
        self.speed
    }

    #[must_use]
    pub fn is_paused_by_button(&self) -> bool {
        self.paused_by_button
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.paused_by_button && !self.hovered
    }

    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[must_use]
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    #[must_use]
    pub fn spotlight(&self) -> Option<Point> {
        self.spotlight
    }

    /// Tracks whether the section is on screen; the marquee only animates then.
    pub fn on_scroll(&mut self, viewport: &Viewport) {
        self.in_view = self.section.visible_ratio(viewport.offset_y, viewport.bottom()) > 0.0;
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_tick.replace(now) {
            if self.is_running() {
                let dt = now
                    .saturating_duration_since(last)
                    .min(MAX_FRAME_GAP)
                    .as_secs_f32();
                self.phase = (self.phase + dt / self.speed.as_duration().as_secs_f32())
                    .rem_euclid(1.0);
            }
        }
        self.feedback.retain(|f| !f.is_expired(now));
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        (self.in_view && self.is_running()) || !self.feedback.is_empty()
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        let feedback = match message {
            Message::SpeedUp => {
                self.speed = self.speed.faster();
                "gallery-feedback-faster"
            }
            Message::SpeedDown => {
                self.speed = self.speed.slower();
                "gallery-feedback-slower"
            }
            Message::Pause => {
                self.paused_by_button = true;
                "gallery-feedback-paused"
            }
            Message::Play => {
                self.paused_by_button = false;
                "gallery-feedback-playing"
            }
            Message::Reset => {
                self.speed = GallerySpeed::default();
                self.paused_by_button = false;
                "gallery-feedback-reset"
            }
            Message::TrackEntered => {
                self.hovered = true;
                return Event::None;
            }
            Message::TrackExited => {
                self.hovered = false;
                return Event::None;
            }
            Message::ArtworkPressed(index) => {
                return match self.artworks.get(index) {
                    Some(artwork) => Event::OpenArtwork(ModalImage {
                        title: artwork.title.clone(),
                        path: artwork.image.clone(),
                        color: artwork.color.as_deref().and_then(AccentColor::parse),
                    }),
                    None => Event::None,
                };
            }
            Message::PointerMoved(point) => {
                self.spotlight = Some(point);
                return Event::None;
            }
            Message::PointerLeft => {
                self.spotlight = None;
                return Event::None;
            }
        };

        self.feedback.push(Feedback {
            key: feedback,
            shown_at: now,
        });
        Event::Acknowledge
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, now: Instant) -> Element<'a, Message> {
        let step = sizing::GALLERY_TILE + spacing::MD;
        let window = marquee_window(self.phase, self.artworks.len(), step);
        let count = self.artworks.len();

        let mut track = Row::new().spacing(spacing::MD);
        track = track.push(
            Container::new(self.tile(window.first))
                .width(Length::Fixed((window.lead - spacing::MD).max(0.0)))
                .align_x(alignment::Horizontal::Right)
                .clip(true),
        );
        for offset in 1..=count * 2 {
            track = track.push(self.tile((window.first + offset) % count));
        }

        let track = mouse_area(
            Container::new(track)
                .width(Length::Fill)
                .height(Length::Fixed(sizing::GALLERY_TILE + spacing::XL))
                .clip(true),
        )
        .on_enter(Message::TrackEntered)
        .on_exit(Message::TrackExited);

        let control = |label: &'static str, message: Message| {
            button(Text::new(label).size(typography::BODY))
                .on_press(message)
                .style(styles::button::pill)
        };
        let controls = Row::new()
            .spacing(spacing::XS)
            .push(control("⏩", Message::SpeedUp))
            .push(control("⏪", Message::SpeedDown))
            .push(control("⏸", Message::Pause))
            .push(control("▶", Message::Play))
            .push(control("↺", Message::Reset))
            .push(
                Text::new(i18n.tr_with_args(
                    "gallery-speed-label",
                    &[("seconds", &self.speed.value().to_string())],
                ))
                .size(typography::CAPTION),
            );

        let mut feedback_column = Column::new().spacing(spacing::XXS);
        for item in &self.feedback {
            let alpha = item.opacity(now);
            feedback_column = feedback_column.push(
                Container::new(Text::new(i18n.tr(item.key)).size(typography::CAPTION))
                    .padding(Padding::from([spacing::XS, spacing::MD]))
                    .style(move |_theme: &Theme| feedback_style(alpha)),
            );
        }

        let body = Column::new()
            .spacing(spacing::MD)
            .push(track)
            .push(
                Row::new()
                    .spacing(spacing::MD)
                    .align_y(alignment::Vertical::Center)
                    .push(controls)
                    .push(Space::new().width(Length::Fill))
                    .push(feedback_column),
            );

        let layered: Element<'a, Message> = match self.spotlight {
            Some(point) => Stack::new()
                .push(body)
                .push(
                Container::new(
                    Container::new(Space::new())
                        .width(Length::Fixed(SPOTLIGHT_RADIUS * 2.0))
                        .height(Length::Fixed(SPOTLIGHT_RADIUS * 2.0))
                        .style(spotlight_style),
                )
                .padding(Padding {
                    top: (point.y - SPOTLIGHT_RADIUS).max(0.0),
                    left: (point.x - SPOTLIGHT_RADIUS).max(0.0),
                    ..Padding::ZERO
                }),
                )
                .into(),
            None => body.into(),
        };

        mouse_area(layered)
            .on_move(Message::PointerMoved)
            .on_exit(Message::PointerLeft)
            .into()
    }

    fn tile(&self, index: usize) -> Element<'_, Message> {
        let Some(artwork) = self.artworks.get(index) else {
            return Space::new().into();
        };
        let fill = artwork
            .color
            .as_deref()
            .and_then(AccentColor::parse)
            .map_or(palette::SAGE_300, AccentColor::color);

        let face: Element<'_, Message> = match &artwork.image {
            Some(path) => image(image::Handle::from_path(path))
                .width(Length::Fixed(sizing::GALLERY_TILE))
                .height(Length::Fixed(sizing::GALLERY_TILE))
                .into(),
            None => Container::new(
                Text::new(artwork.title.as_str())
                    .size(typography::BODY_LG)
                    .color(palette::PAPER),
            )
            .center(Length::Fixed(sizing::GALLERY_TILE))
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(fill)),
                border: Border {
                    color: palette::GOLD,
                    width: border::WIDTH_MD,
                    radius: radius::MD.into(),
                },
                ..Default::default()
            })
            .into(),
        };

        button(face)
            .padding(0)
            .on_press(Message::ArtworkPressed(index))
            .style(styles::button::bare)
            .into()
    }
}

fn feedback_style(alpha: f32) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG * alpha,
            ..palette::INK
        })),
        text_color: Some(Color { a: alpha, ..palette::GOLD }),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_MEDIUM * alpha,
                ..palette::GOLD
            },
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

fn spotlight_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.08,
            ..palette::GOLD
        })),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GOLD
            },
            offset: Vector::new(0.0, 0.0),
            blur_radius: SPOTLIGHT_RADIUS,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn gallery() -> Gallery {
        let content = Content::from_toml_str(
            r##"
            [[sections]]
            id = "designs"
            height = 600

            [[gallery.artworks]]
            title = "Fern study"
            color = "#6b8f71"

            [[gallery.artworks]]
            title = "Moss"
            "##,
        )
        .expect("valid content");
        Gallery::new(&content, &PageLayout::from_content(&content)).expect("gallery")
    }

    #[test]
    fn speed_stays_in_bounds() {
        let mut speed = GallerySpeed::default();
        for _ in 0..20 {
            speed = speed.faster();
        }
        assert_eq!(speed.value(), MIN_GALLERY_SPEED_SECS);
        assert!(speed.is_min());

        for _ in 0..20 {
            speed = speed.slower();
        }
        assert_eq!(speed.value(), MAX_GALLERY_SPEED_SECS);
        assert!(speed.is_max());
        assert_eq!(GallerySpeed::new(0).value(), MIN_GALLERY_SPEED_SECS);
    }

    #[test]
    fn reset_restores_default_and_resumes() {
        let mut gallery = gallery();
        let now = Instant::now();
        gallery.update(Message::SpeedUp, now);
        gallery.update(Message::Pause, now);
        assert!(!gallery.is_running());

        gallery.update(Message::Reset, now);
        assert_eq!(gallery.speed().value(), DEFAULT_GALLERY_SPEED_SECS);
        assert!(!gallery.is_paused_by_button());
        assert!(gallery.is_running());
    }

    #[test]
    fn hover_pauses_without_overriding_button() {
        let mut gallery = gallery();
        let now = Instant::now();

        gallery.update(Message::TrackEntered, now);
        assert!(!gallery.is_running());
        gallery.update(Message::TrackExited, now);
        assert!(gallery.is_running());

        gallery.update(Message::Pause, now);
        gallery.update(Message::TrackEntered, now);
        gallery.update(Message::TrackExited, now);
        assert!(!gallery.is_running());
    }

    #[test]
    fn controls_acknowledge_and_show_feedback() {
        let mut gallery = gallery();
        let t0 = Instant::now();
        assert!(matches!(gallery.update(Message::Pause, t0), Event::Acknowledge));
        assert!(matches!(gallery.update(Message::TrackEntered, t0), Event::None));
        assert_eq!(gallery.feedback().len(), 1);
        assert_eq!(gallery.feedback()[0].key, "gallery-feedback-paused");

        let feedback = gallery.feedback()[0].clone();
        assert_abs_diff_eq!(feedback.opacity(t0 + FEEDBACK_VISIBLE), 1.0);
        assert_abs_diff_eq!(
            feedback.opacity(t0 + FEEDBACK_VISIBLE + FEEDBACK_FADE / 2),
            0.5,
            epsilon = 1e-3
        );

        gallery.tick(t0 + FEEDBACK_VISIBLE + FEEDBACK_FADE);
        assert!(gallery.feedback().is_empty());
    }

    #[test]
    fn marquee_advances_one_loop_per_speed() {
        let mut gallery = gallery();
        let t0 = Instant::now();
        for frame in 0..=50 {
            gallery.tick(t0 + Duration::from_millis(100) * frame);
        }
        assert_abs_diff_eq!(gallery.phase(), 0.25, epsilon = 1e-4);

        gallery.update(Message::Pause, t0);
        gallery.tick(t0 + Duration::from_millis(5100));
        assert_abs_diff_eq!(gallery.phase(), 0.25, epsilon = 1e-4);
    }

    #[test]
    fn suspended_ticking_does_not_jump() {
        let mut gallery = gallery();
        let t0 = Instant::now();
        gallery.tick(t0);
        gallery.tick(t0 + Duration::from_secs(30));
        assert!(gallery.phase() < 0.02);
    }

    #[test]
    fn marquee_window_wraps() {
        let window = marquee_window(0.0, 4, 100.0);
        assert_eq!(window.first, 0);
        assert_abs_diff_eq!(window.lead, 100.0);

        let window = marquee_window(0.3, 4, 100.0);
        assert_eq!(window.first, 1);
        assert_abs_diff_eq!(window.lead, 80.0, epsilon = 1e-3);
    }

    #[test]
    fn artwork_click_opens_viewer() {
        let mut gallery = gallery();
        match gallery.update(Message::ArtworkPressed(0), Instant::now()) {
            Event::OpenArtwork(image) => {
                assert_eq!(image.title, "Fern study");
                assert!(image.color.is_some());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn spotlight_follows_pointer() {
        let mut gallery = gallery();
        let now = Instant::now();
        gallery.update(Message::PointerMoved(Point::new(10.0, 20.0)), now);
        assert_eq!(gallery.spotlight(), Some(Point::new(10.0, 20.0)));
        gallery.update(Message::PointerLeft, now);
        assert_eq!(gallery.spotlight(), None);
    }
}
