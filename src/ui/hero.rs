// SPDX-License-Identifier: MPL-2.0
//! Hero banner with a staged fade-in, plus the page-wide scroll progress bar.

use crate::content::Hero as HeroContent;
use crate::domain::timeline::ease_out_quad;
use crate::domain::Viewport;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::widget::{container, Column, Container, Row, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Fade-in schedule of one hero element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub delay: Duration,
    pub duration: Duration,
}

impl Stage {
    const fn millis(delay: u64, duration: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay),
            duration: Duration::from_millis(duration),
        }
    }

    fn end(self) -> Duration {
        self.delay + self.duration
    }

    /// Opacity at `elapsed` since the page appeared.
    #[must_use]
    pub fn opacity(self, elapsed: Duration) -> f32 {
        if elapsed <= self.delay {
            return 0.0;
        }
        let t = (elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32();
        ease_out_quad(t)
    }
}

/// Section the hero and its ambient particles occupy.
pub const HERO_SECTION: &str = "hero";

pub const SUBTITLE: Stage = Stage::millis(300, 1000);
const NAME_LINE_DELAYS: [u64; 2] = [500, 700];
const NAME_LINE_DURATION: u64 = 1000;
const BADGE_FIRST_DELAY: u64 = 900;
const BADGE_STAGGER: u64 = 200;
const BADGE_DURATION: u64 = 600;
pub const SCROLL_HINT: Stage = Stage::millis(1600, 1000);

/// Stage of the `index`-th name line; extra lines keep the stagger.
#[must_use]
pub fn name_line_stage(index: usize) -> Stage {
    let delay = NAME_LINE_DELAYS
        .get(index)
        .copied()
        .unwrap_or_else(|| NAME_LINE_DELAYS[1] + 200 * (index as u64 - 1));
    Stage::millis(delay, NAME_LINE_DURATION)
}

#[must_use]
pub fn badge_stage(index: usize) -> Stage {
    Stage::millis(BADGE_FIRST_DELAY + BADGE_STAGGER * index as u64, BADGE_DURATION)
}

#[derive(Debug, Clone)]
pub struct Hero {
    content: HeroContent,
    shown_at: Instant,
}

impl Hero {
    #[must_use]
    pub fn new(content: HeroContent, now: Instant) -> Self {
        Self {
            content,
            shown_at: now,
        }
    }

    /// End of the last stage.
    fn finished_after(&self) -> Duration {
        let names = (0..self.content.name_lines.len()).map(|i| name_line_stage(i).end());
        let badges = (0..self.content.badges.len()).map(|i| badge_stage(i).end());
        names
            .chain(badges)
            .chain([SUBTITLE.end(), SCROLL_HINT.end()])
            .max()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.finished_after()
    }

    pub fn view<'a, M: 'a>(&'a self, now: Instant) -> Element<'a, M> {
        let elapsed = now.saturating_duration_since(self.shown_at);
        let faded = |color: Color, stage: Stage| Color {
            a: color.a * stage.opacity(elapsed),
            ..color
        };

        let mut column = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(
                Text::new(self.content.subtitle.as_str())
                    .size(typography::TITLE_SM)
                    .color(faded(palette::STONE_600, SUBTITLE)),
            );

        for (index, line) in self.content.name_lines.iter().enumerate() {
            column = column.push(
                Text::new(line.as_str())
                    .size(typography::DISPLAY)
                    .color(faded(palette::MOSS_700, name_line_stage(index))),
            );
        }

        if !self.content.badges.is_empty() {
            let mut badges = Row::new().spacing(spacing::XS);
            for (index, badge) in self.content.badges.iter().enumerate() {
                let alpha = badge_stage(index).opacity(elapsed);
                badges = badges.push(
                    Container::new(
                        Text::new(badge.as_str())
                            .size(typography::CAPTION)
                            .color(Color { a: alpha, ..palette::PAPER }),
                    )
                    .padding([spacing::XXS, spacing::SM])
                    .style(move |_theme: &Theme| container::Style {
                        background: Some(Background::Color(Color {
                            a: alpha,
                            ..palette::SAGE_500
                        })),
                        border: Border {
                            radius: radius::FULL.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }),
                );
            }
            column = column.push(badges);
        }

        if !self.content.scroll_hint.is_empty() {
            column = column.push(
                Text::new(self.content.scroll_hint.as_str())
                    .size(typography::CAPTION)
                    .color(faded(palette::STONE_400, SCROLL_HINT)),
            );
        }

        column.into()
    }
}

/// Thin bar at the top of the window showing how far the page is scrolled.
pub fn progress_bar<'a, M: 'a>(viewport: &Viewport) -> Element<'a, M> {
    let progress = viewport.progress();
    let filled = Container::new(iced::widget::Space::new())
        .width(Length::FillPortion(portion(progress)))
        .height(Length::Fixed(sizing::PROGRESS_BAR_HEIGHT))
        .style(|theme: &Theme| container::Style {
            background: Some(Background::Color(theme.extended_palette().primary.base.color)),
            ..Default::default()
        });
    let rest = iced::widget::Space::new()
        .width(Length::FillPortion(portion(1.0 - progress)))
        .height(Length::Fixed(sizing::PROGRESS_BAR_HEIGHT));

    let mut bar = Row::new().width(Length::Fill);
    if progress > 0.0 {
        bar = bar.push(filled);
    }
    if progress < 1.0 {
        bar = bar.push(rest);
    }
    bar.into()
}

fn portion(fraction: f32) -> u16 {
    (fraction.clamp(0.0, 1.0) * 1000.0).round().max(1.0) as u16
}

/// Plays the chime on the very first click anywhere on the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstInteraction {
    done: bool,
}

impl FirstInteraction {
    /// True exactly once.
    pub fn take(&mut self) -> bool {
        !std::mem::replace(&mut self.done, true)
    }
}
