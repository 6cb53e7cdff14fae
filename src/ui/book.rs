// SPDX-License-Identifier: MPL-2.0
//! Book whose pages are turned strictly in order.
//!
//! Only the next unopened page may be turned forward and only the last
//! turned page may be turned back. A flip animation blocks further flips
//! until it finishes. Turning the final page closes the book from the back
//! once the flip has played.

use crate::content::{Book as BookContent, BookPage, Content, SectionId};
use crate::domain::Deadline;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, palette, radius, sizing, spacing, typography};
use iced::widget::{container, mouse_area, Container, Row, Text};
use iced::{alignment, Background, Border, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Length of one page flip, also the delay before the back cover closes.
pub const FLIP_DURATION: Duration = Duration::from_millis(800);

/// Visual state of the covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cover {
    #[default]
    Closed,
    Open,
    /// Every page turned and the book shut from the back.
    ClosedBack,
}

#[derive(Debug, Clone)]
pub enum Message {
    PagePressed(usize),
}

#[derive(Debug, Clone)]
pub struct Book {
    section: SectionId,
    title: String,
    pages: Vec<BookPage>,
    /// Pages `[0, open_count)` are turned.
    open_count: usize,
    cover: Cover,
    flip_lock: Deadline,
    back_cover: Deadline,
}

impl Book {
    #[must_use]
    pub fn new(content: &Content) -> Option<Self> {
        let BookContent {
            section,
            title,
            pages,
        } = content.book.clone()?;
        if pages.is_empty() {
            return None;
        }
        Some(Self {
            section,
            title,
            pages,
            open_count: 0,
            cover: Cover::Closed,
            flip_lock: Deadline::default(),
            back_cover: Deadline::default(),
        })
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn cover(&self) -> Cover {
        self.cover
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    #[must_use]
    pub fn is_open(&self, page: usize) -> bool {
        page < self.open_count
    }

    #[must_use]
    pub fn is_flipping(&self) -> bool {
        self.flip_lock.is_armed()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.flip_lock.is_armed() || self.back_cover.is_armed()
    }

    /// Turns `page` forward or back when the order allows it.
    ///
    /// Returns `false` (state unchanged) for an ineligible page or while a
    /// flip is still playing.
    pub fn flip(&mut self, page: usize, now: Instant) -> bool {
        self.tick(now);
        if self.flip_lock.is_armed() || page >= self.pages.len() {
            return false;
        }
        let last = self.pages.len() - 1;

        if page == self.open_count {
            self.open_count += 1;
            if page == 0 {
                self.cover = Cover::Open;
            }
            if page == last {
                self.back_cover.arm(now, FLIP_DURATION);
            }
        } else if page + 1 == self.open_count {
            self.open_count -= 1;
            if page == last {
                self.back_cover.disarm();
                self.cover = Cover::Open;
            }
            if page == 0 {
                self.cover = Cover::Closed;
            }
        } else {
            log::trace!("Page {page} cannot flip with {} open", self.open_count);
            return false;
        }

        self.flip_lock.arm(now, FLIP_DURATION);
        true
    }

    pub fn tick(&mut self, now: Instant) {
        self.flip_lock.fire(now);
        if self.back_cover.fire(now) {
            self.cover = Cover::ClosedBack;
        }
    }

    pub fn update(&mut self, message: Message, now: Instant) {
        match message {
            Message::PagePressed(page) => {
                self.flip(page, now);
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let cover_label = match self.cover {
            Cover::Closed => i18n.tr("book-cover-closed"),
            Cover::Open => i18n.tr("book-cover-open"),
            Cover::ClosedBack => i18n.tr("book-cover-back"),
        };

        let mut spread = Row::new().spacing(spacing::XS);
        for (index, page) in self.pages.iter().enumerate() {
            let turned = self.is_open(index);
            let face = if turned && !page.back.is_empty() {
                page.back.as_str()
            } else {
                page.front.as_str()
            };
            let sheet = Container::new(Text::new(face).size(typography::BODY))
                .padding(spacing::MD)
                .width(Length::Fixed(sizing::BOOK_PAGE_WIDTH))
                .height(Length::Fixed(sizing::BOOK_PAGE_HEIGHT))
                .style(move |_theme: &Theme| page_style(turned));
            spread = spread.push(mouse_area(sheet).on_press(Message::PagePressed(index)));
        }

        iced::widget::Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new(self.title.as_str()).size(typography::TITLE_MD))
            .push(Text::new(cover_label).size(typography::CAPTION))
            .push(spread)
            .into()
    }
}

fn page_style(turned: bool) -> container::Style {
    let (background, text) = if turned {
        (palette::STONE_100, palette::INK)
    } else {
        (palette::MOSS_700, palette::PAPER)
    };
    container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text),
        border: Border {
            color: palette::GOLD,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}
