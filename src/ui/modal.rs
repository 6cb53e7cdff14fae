// SPDX-License-Identifier: MPL-2.0
//! Full-size image viewer over a dimmed backdrop.
//!
//! While open the page scroll is locked: the app restores the locked offset
//! on every scroll event and ignores navigation.

use crate::content::AccentColor;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::{center, container, image, mouse_area, opaque, Column, Container, Text};
use iced::{Background, Border, Color, Element, Length, Theme};
use std::path::PathBuf;

/// The image being viewed.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalImage {
    pub title: String,
    pub path: Option<PathBuf>,
    /// Placeholder fill when there is no image file.
    pub color: Option<AccentColor>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum State {
    #[default]
    Closed,
    Open {
        image: ModalImage,
        /// Page offset to hold while open.
        locked_offset: f32,
    },
}

#[derive(Debug, Clone)]
pub enum Message {
    BackdropPressed,
    /// Clicks on the image itself must not close the viewer.
    ImagePressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct Modal {
    state: State,
}

impl Modal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `image`, locking the page at `offset`.
    pub fn open(&mut self, image: ModalImage, offset: f32) {
        log::debug!("Opening image viewer: {}", image.title);
        self.state = State::Open {
            image,
            locked_offset: offset,
        };
    }

    pub fn close(&mut self) -> Event {
        match std::mem::take(&mut self.state) {
            State::Open { .. } => Event::Closed,
            State::Closed => Event::None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    /// Offset the page must stay at, while open.
    #[must_use]
    pub fn locked_offset(&self) -> Option<f32> {
        match self.state {
            State::Open { locked_offset, .. } => Some(locked_offset),
            State::Closed => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::BackdropPressed => self.close(),
            Message::ImagePressed => Event::None,
        }
    }

    pub fn view(&self) -> Option<Element<'_, Message>> {
        let State::Open { image: shown, .. } = &self.state else {
            return None;
        };

        let picture: Element<'_, Message> = match &shown.path {
            Some(path) => image(image::Handle::from_path(path))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into(),
            None => {
                let fill = shown.color.map_or(palette::SAGE_500, AccentColor::color);
                Container::new(Text::new(shown.title.as_str()).size(typography::TITLE_LG))
                    .center(Length::Fixed(sizing::GALLERY_TILE * 2.5))
                    .style(move |_theme: &Theme| container::Style {
                        background: Some(Background::Color(fill)),
                        text_color: Some(palette::PAPER),
                        border: Border {
                            radius: radius::LG.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    })
                    .into()
            }
        };

        let framed = Column::new()
            .spacing(spacing::SM)
            .align_x(iced::Alignment::Center)
            .push(mouse_area(picture).on_press(Message::ImagePressed))
            .push(
                Text::new(shown.title.as_str())
                    .size(typography::BODY_LG)
                    .color(palette::PAPER),
            );

        let backdrop = center(framed).style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::INK
            })),
            ..Default::default()
        });

        Some(opaque(mouse_area(backdrop).on_press(Message::BackdropPressed)))
    }
}
