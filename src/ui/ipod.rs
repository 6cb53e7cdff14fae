// SPDX-License-Identifier: MPL-2.0
//! Click-wheel navigator: a scrolling list with a detail screen.

use crate::content::{Content, IpodItem, SectionId};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::scrollable::{RelativeOffset, Scrollbar};
use iced::widget::{button, container, operation, Column, Container, Id, Row, Scrollable, Text};
use iced::{alignment, Background, Border, Element, Length, Task, Theme};

/// Id of the list scrollable inside the screen.
pub const LIST_ID: &str = "ipod-list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Browsing { index: usize },
    Detail { index: usize },
}

impl Screen {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Screen::Browsing { index } | Screen::Detail { index } => index,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Next,
    Previous,
    Select,
    Menu,
    ItemPressed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The highlighted row moved; keep it in view.
    IndexChanged(usize),
    /// Screen changed without moving the highlight.
    ScreenChanged,
}

#[derive(Debug, Clone)]
pub struct Ipod {
    section: SectionId,
    items: Vec<IpodItem>,
    screen: Screen,
}

impl Ipod {
    #[must_use]
    pub fn new(content: &Content) -> Option<Self> {
        let block = content.ipod.as_ref()?;
        let items = block.items.clone();
        if items.is_empty() {
            return None;
        }
        Some(Self {
            section: block.section.clone(),
            items,
            screen: Screen::Browsing { index: 0 },
        })
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn current(&self) -> Option<&IpodItem> {
        self.items.get(self.screen.index())
    }

    fn step(&mut self, forward: bool) -> Event {
        let Screen::Browsing { index } = self.screen else {
            return Event::None;
        };
        let len = self.items.len();
        let index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.screen = Screen::Browsing { index };
        Event::IndexChanged(index)
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Next => self.step(true),
            Message::Previous => self.step(false),
            Message::Select => match self.screen {
                Screen::Browsing { index } => {
                    self.screen = Screen::Detail { index };
                    Event::ScreenChanged
                }
                Screen::Detail { .. } => Event::None,
            },
            Message::Menu => match self.screen {
                Screen::Detail { index } => {
                    self.screen = Screen::Browsing { index };
                    Event::IndexChanged(index)
                }
                Screen::Browsing { .. } => Event::None,
            },
            Message::ItemPressed(index) => match self.screen {
                Screen::Browsing { .. } if index < self.items.len() => {
                    self.screen = Screen::Browsing { index };
                    Event::IndexChanged(index)
                }
                _ => Event::None,
            },
        }
    }

    /// Relative offset that keeps row `index` in view.
    #[must_use]
    pub fn relative_offset(&self, index: usize) -> f32 {
        match self.items.len() {
            0 | 1 => 0.0,
            len => index.min(len - 1) as f32 / (len - 1) as f32,
        }
    }

    /// Scrolls the list so the active row is visible.
    pub fn snap_to_active<T: Send + 'static>(&self) -> Task<T> {
        operation::snap_to(
            Id::new(LIST_ID),
            RelativeOffset {
                x: 0.0,
                y: self.relative_offset(self.screen.index()),
            },
        )
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let screen: Element<'a, Message> = match self.screen {
            Screen::Browsing { index: active } => {
                let mut list = Column::new();
                for (index, item) in self.items.iter().enumerate() {
                    let selected = index == active;
                    list = list.push(
                        button(
                            Text::new(item.title.as_str())
                                .size(typography::BODY)
                                .color(if selected { palette::PAPER } else { palette::INK }),
                        )
                        .width(Length::Fill)
                        .height(Length::Fixed(sizing::IPOD_ROW_HEIGHT))
                        .padding([0.0, spacing::XS])
                        .on_press(Message::ItemPressed(index))
                        .style(move |theme, status| {
                            if selected {
                                styles::button::selected(theme, status)
                            } else {
                                styles::button::bare(theme, status)
                            }
                        }),
                    );
                }
                Scrollable::new(list)
                    .id(Id::new(LIST_ID))
                    .direction(iced::widget::scrollable::Direction::Vertical(
                        Scrollbar::hidden(),
                    ))
                    .height(Length::Fill)
                    .into()
            }
            Screen::Detail { index } => {
                let item = &self.items[index.min(self.items.len() - 1)];
                Column::new()
                    .spacing(spacing::XXS)
                    .padding(spacing::XS)
                    .push(Text::new(item.title.as_str()).size(typography::TITLE_SM))
                    .push(Text::new(item.subtitle.as_str()).size(typography::CAPTION))
                    .push(Text::new(item.detail.as_str()).size(typography::BODY))
                    .into()
            }
        };

        let display = Container::new(screen)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::IPOD_SCREEN_HEIGHT))
            .style(|_theme: &Theme| container::Style {
                background: Some(Background::Color(palette::STONE_100)),
                text_color: Some(palette::INK),
                border: Border {
                    color: palette::STONE_400,
                    width: 1.0,
                    radius: radius::SM.into(),
                },
                ..Default::default()
            });

        let wheel_button = |label: String, message: Message| {
            button(Text::new(label).size(typography::CAPTION))
                .on_press(message)
                .padding(spacing::XS)
                .style(styles::button::ghost)
        };
        let wheel = Column::new()
            .align_x(alignment::Horizontal::Center)
            .spacing(spacing::XXS)
            .push(wheel_button(i18n.tr("ipod-menu"), Message::Menu))
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .align_y(alignment::Vertical::Center)
                    .push(wheel_button("⏮".to_string(), Message::Previous))
                    .push(wheel_button(i18n.tr("ipod-select"), Message::Select))
                    .push(wheel_button("⏭".to_string(), Message::Next)),
            );

        Container::new(
            Column::new()
                .spacing(spacing::MD)
                .align_x(alignment::Horizontal::Center)
                .push(display)
                .push(wheel),
        )
        .width(Length::Fixed(sizing::IPOD_WIDTH))
        .padding(spacing::MD)
        .style(|theme: &Theme| container::Style {
            border: Border {
                radius: radius::LG.into(),
                ..Default::default()
            },
            ..styles::container::card(theme)
        })
        .into()
    }
}
