// SPDX-License-Identifier: MPL-2.0
//! Stat counters that count up once their section is revealed.

use crate::content::{Content, Counter, SectionId};
use crate::domain::timeline::ease_out_quad;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{Column, Row, Text};
use iced::{alignment, Element};
use std::time::{Duration, Instant};

pub const COUNT_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct Counters {
    section: SectionId,
    items: Vec<Counter>,
    started_at: Option<Instant>,
}

impl Counters {
    #[must_use]
    pub fn new(content: &Content) -> Option<Self> {
        let block = content.counters.as_ref()?;
        if block.items.is_empty() {
            return None;
        }
        Some(Self {
            section: block.section.clone(),
            items: block.items.clone(),
            started_at: None,
        })
    }

    /// Section whose reveal starts the count.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Starts counting; later calls are ignored.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    #[must_use]
    pub fn value(&self, index: usize, now: Instant) -> u32 {
        let (Some(item), Some(started_at)) = (self.items.get(index), self.started_at) else {
            return 0;
        };
        let t = now.saturating_duration_since(started_at).as_secs_f32()
            / COUNT_DURATION.as_secs_f32();
        (item.target as f32 * ease_out_quad(t)).round() as u32
    }

    /// Displayed value with its suffix.
    #[must_use]
    pub fn label(&self, index: usize, now: Instant) -> String {
        let value = self.value(index, now);
        match self.items.get(index).and_then(|item| item.suffix.as_deref()) {
            Some(suffix) => format!("{value}{suffix}"),
            None => value.to_string(),
        }
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|started_at| now.saturating_duration_since(started_at) < COUNT_DURATION)
    }

    pub fn view<'a, M: 'a>(&'a self, now: Instant) -> Element<'a, M> {
        let mut row = Row::new().spacing(spacing::XL);
        for (index, item) in self.items.iter().enumerate() {
            row = row.push(
                Column::new()
                    .align_x(alignment::Horizontal::Center)
                    .push(
                        Text::new(self.label(index, now))
                            .size(typography::TITLE_LG)
                            .color(palette::SAGE_500),
                    )
                    .push(Text::new(item.label.as_str()).size(typography::CAPTION)),
            );
        }
        row.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters() -> Counters {
        let content = Content::from_toml_str(
            r#"
            [counters]
            items = [
                { label = "Projects", target = 40, suffix = "+" },
                { label = "Plants", target = 12 },
            ]
            "#,
        )
        .expect("valid content");
        Counters::new(&content).expect("counters")
    }

    #[test]
    fn idle_until_started() {
        let counters = counters();
        assert_eq!(counters.section(), "about");
        assert_eq!(counters.label(0, Instant::now()), "0+");
        assert!(!counters.is_animating(Instant::now()));
    }

    #[test]
    fn counts_up_to_target() {
        let mut counters = counters();
        let t0 = Instant::now();
        counters.start(t0);

        let midway = counters.value(0, t0 + Duration::from_secs(1));
        assert!(midway > 20 && midway < 40, "midway {midway}");
        assert_eq!(counters.label(0, t0 + COUNT_DURATION), "40+");
        assert_eq!(counters.label(1, t0 + Duration::from_secs(10)), "12");
        assert!(!counters.is_animating(t0 + COUNT_DURATION));
    }

    #[test]
    fn second_start_does_not_restart() {
        let mut counters = counters();
        let t0 = Instant::now();
        counters.start(t0);
        counters.start(t0 + Duration::from_secs(5));
        assert_eq!(counters.value(1, t0 + COUNT_DURATION), 12);
    }
}
