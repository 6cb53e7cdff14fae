// SPDX-License-Identifier: MPL-2.0
//! Toy camera: a shot flashes, ejects a polaroid and lets it develop.

use crate::content::{Content, Photo, SectionId};
use crate::domain::{EffectState, Timeline};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, Column, Container, Space, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};
use std::time::{Duration, Instant};

pub const FLASH: Duration = Duration::from_millis(150);
pub const EJECT: Duration = Duration::from_millis(900);
pub const DEVELOP: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    Flash,
    Eject,
    Develop,
}

#[derive(Debug, Clone)]
pub enum Message {
    Shoot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// A new shot started; play the shutter chime.
    Shot,
}

#[derive(Debug, Clone)]
pub struct Camera {
    section: SectionId,
    photos: Vec<Photo>,
    /// Photo shown by the latest shot.
    current: Option<usize>,
    timeline: Timeline<Shot>,
}

impl Camera {
    #[must_use]
    pub fn new(content: &Content) -> Option<Self> {
        let block = content.camera.as_ref()?;
        let photos = block.photos.clone();
        if photos.is_empty() {
            return None;
        }
        Some(Self {
            section: block.section.clone(),
            photos,
            current: None,
            timeline: Timeline::new(vec![
                (Shot::Flash, FLASH),
                (Shot::Eject, EJECT),
                (Shot::Develop, DEVELOP),
            ]),
        })
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Takes the next photo unless a shot is still running.
    pub fn shoot(&mut self, now: Instant) -> bool {
        if self.timeline.is_running(now) {
            log::trace!("Camera busy, shot ignored");
            return false;
        }
        let next = self.current.map_or(0, |index| (index + 1) % self.photos.len());
        self.current = Some(next);
        self.timeline.trigger(now);
        true
    }

    #[must_use]
    pub fn state(&self, now: Instant) -> EffectState<Shot> {
        self.timeline.state(now)
    }

    #[must_use]
    pub fn photo(&self) -> Option<&Photo> {
        self.photos.get(self.current?)
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.timeline.is_running(now)
    }

    /// Flash overlay opacity; fades out across the flash phase.
    #[must_use]
    pub fn flash_opacity(&self, now: Instant) -> f32 {
        match self.state(now) {
            EffectState::Transitioning {
                phase: Shot::Flash,
                progress,
            } => 1.0 - progress,
            _ => 0.0,
        }
    }

    /// How far the polaroid has slid out, `0..=1`.
    #[must_use]
    pub fn eject_progress(&self, now: Instant) -> f32 {
        match self.state(now) {
            EffectState::Idle => 0.0,
            EffectState::Transitioning {
                phase: Shot::Flash, ..
            } => 0.0,
            EffectState::Transitioning {
                phase: Shot::Eject,
                progress,
            } => progress,
            _ => 1.0,
        }
    }

    /// Image clarity while developing, `0..=1`.
    #[must_use]
    pub fn develop_progress(&self, now: Instant) -> f32 {
        match self.state(now) {
            EffectState::Transitioning {
                phase: Shot::Develop,
                progress,
            } => progress,
            EffectState::Settled => 1.0,
            _ => 0.0,
        }
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::Shoot => {
                if self.shoot(now) {
                    Event::Shot
                } else {
                    Event::None
                }
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, now: Instant) -> Element<'a, Message> {
        let flash = self.flash_opacity(now);
        let body = Container::new(Text::new("📷").size(typography::DISPLAY))
            .center(Length::Fixed(sizing::POLAROID_SIZE))
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(Color {
                    a: flash,
                    ..palette::PAPER
                })),
                border: Border {
                    color: palette::STONE_600,
                    width: border::WIDTH_MD,
                    radius: radius::LG.into(),
                },
                ..Default::default()
            });

        let mut column = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(
                button(body)
                    .on_press(Message::Shoot)
                    .padding(0)
                    .style(styles::button::bare),
            );

        let eject = self.eject_progress(now);
        if let (Some(photo), true) = (self.photo(), eject > 0.0) {
            let clarity = self.develop_progress(now);
            let picture: Element<'a, Message> = match &photo.image {
                Some(path) => image(image::Handle::from_path(path))
                    .width(Length::Fixed(sizing::POLAROID_SIZE - spacing::MD))
                    .opacity(clarity)
                    .into(),
                None => Space::new()
                    .width(Length::Fixed(sizing::POLAROID_SIZE - spacing::MD))
                    .height(Length::Fixed(sizing::POLAROID_SIZE - spacing::MD))
                    .into(),
            };
            let polaroid = Column::new()
                .spacing(spacing::XS)
                .push(Container::new(picture).style(move |_theme: &Theme| {
                    container::Style {
                        background: Some(Background::Color(Color {
                            a: 1.0 - clarity * 0.5,
                            ..palette::STONE_800
                        })),
                        ..Default::default()
                    }
                }))
                .push(Text::new(photo.caption.as_str()).size(typography::CAPTION));

            column = column.push(
                Container::new(polaroid)
                    .padding(spacing::XS)
                    .height(Length::Fixed(sizing::POLAROID_SIZE * 1.2 * eject))
                    .clip(true)
                    .style(|_theme: &Theme| container::Style {
                        background: Some(Background::Color(palette::PAPER)),
                        text_color: Some(palette::INK),
                        ..Default::default()
                    }),
            );
        } else {
            column = column.push(Text::new(i18n.tr("camera-hint")).size(typography::CAPTION));
        }

        column.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        let content = Content::from_toml_str(
            r#"
            [camera]
            photos = [{ caption = "Fern" }, { caption = "Moss" }]
            "#,
        )
        .expect("valid content");
        Camera::new(&content).expect("camera")
    }

    #[test]
    fn shot_runs_flash_eject_develop() {
        let mut camera = camera();
        let t0 = Instant::now();
        assert_eq!(camera.update(Message::Shoot, t0), Event::Shot);

        assert_eq!(camera.state(t0).phase(), Some(Shot::Flash));
        assert_eq!(camera.state(t0 + FLASH).phase(), Some(Shot::Eject));
        assert_eq!(camera.state(t0 + FLASH + EJECT).phase(), Some(Shot::Develop));
        assert_eq!(
            camera.state(t0 + FLASH + EJECT + DEVELOP),
            EffectState::Settled
        );
        assert_eq!(camera.develop_progress(t0 + FLASH + EJECT + DEVELOP), 1.0);
    }

    #[test]
    fn busy_camera_ignores_shots() {
        let mut camera = camera();
        let t0 = Instant::now();
        camera.shoot(t0);
        assert_eq!(
            camera.update(Message::Shoot, t0 + Duration::from_millis(500)),
            Event::None
        );
        assert_eq!(camera.photo().map(|p| p.caption.as_str()), Some("Fern"));
    }

    #[test]
    fn photos_cycle_between_shots() {
        let mut camera = camera();
        let t0 = Instant::now();
        let cycle = FLASH + EJECT + DEVELOP;
        camera.shoot(t0);
        camera.shoot(t0 + cycle);
        assert_eq!(camera.photo().map(|p| p.caption.as_str()), Some("Moss"));
        camera.shoot(t0 + cycle * 2);
        assert_eq!(camera.photo().map(|p| p.caption.as_str()), Some("Fern"));
    }
}
