// SPDX-License-Identifier: MPL-2.0
//! Flower pots that bloom on click and a tree that grows with scrolling.

use crate::content::{AccentColor, Content, Pot, SectionId, TreeStage};
use crate::domain::timeline::ease_out_quad;
use crate::domain::{PageLayout, Viewport};
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, Column, Container, Row, Stack, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Padding, Theme};
use std::time::{Duration, Instant};

pub const PETAL_COUNT: usize = 8;
pub const PETAL_BURST: Duration = Duration::from_millis(800);
/// Distance petals travel, as a fraction of the pot size.
const PETAL_REACH: f32 = 0.6;

#[derive(Debug, Clone)]
pub enum Message {
    PotPressed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    Bloomed(usize),
    Closed(usize),
}

#[derive(Debug, Clone, Copy, Default)]
struct PotState {
    bloomed: bool,
    burst_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct Garden {
    section: SectionId,
    pots: Vec<Pot>,
    states: Vec<PotState>,
    stages: Vec<TreeStage>,
    /// How far the section has scrolled through the viewport, `0..=1`.
    growth: f32,
}

impl Garden {
    #[must_use]
    pub fn new(content: &Content) -> Option<Self> {
        let block = content.garden.as_ref()?;
        if block.pots.is_empty() && block.tree_stages.is_empty() {
            return None;
        }
        Some(Self {
            section: block.section.clone(),
            states: vec![PotState::default(); block.pots.len()],
            pots: block.pots.clone(),
            stages: block.tree_stages.clone(),
            growth: 0.0,
        })
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn is_bloomed(&self, pot: usize) -> bool {
        self.states.get(pot).is_some_and(|state| state.bloomed)
    }

    /// Blooms a closed pot with a petal burst, or closes a bloomed one.
    pub fn press(&mut self, pot: usize, now: Instant) -> Event {
        let Some(state) = self.states.get_mut(pot) else {
            return Event::None;
        };
        if state.bloomed {
            *state = PotState::default();
            Event::Closed(pot)
        } else {
            state.bloomed = true;
            state.burst_at = Some(now);
            Event::Bloomed(pot)
        }
    }

    /// Petal offsets from the pot centre, in pot sizes, or empty when idle.
    #[must_use]
    pub fn petals(&self, pot: usize, now: Instant) -> Vec<(f32, f32, f32)> {
        let Some(burst_at) = self.states.get(pot).and_then(|state| state.burst_at) else {
            return Vec::new();
        };
        let elapsed = now.saturating_duration_since(burst_at);
        if elapsed >= PETAL_BURST {
            return Vec::new();
        }
        let t = ease_out_quad(elapsed.as_secs_f32() / PETAL_BURST.as_secs_f32());
        (0..PETAL_COUNT)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / PETAL_COUNT as f32;
                let reach = PETAL_REACH * t;
                (angle.cos() * reach, angle.sin() * reach, 1.0 - t)
            })
            .collect()
    }

    pub fn tick(&mut self, now: Instant) {
        for state in &mut self.states {
            if state
                .burst_at
                .is_some_and(|at| now.saturating_duration_since(at) >= PETAL_BURST)
            {
                state.burst_at = None;
            }
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.states.iter().any(|state| state.burst_at.is_some())
    }

    /// Tracks how far the garden section has travelled through the viewport.
    pub fn on_scroll(&mut self, layout: &PageLayout, viewport: &Viewport) {
        let Some(section) = layout.section(&self.section) else {
            return;
        };
        let travel = section.height + viewport.height;
        if travel <= 0.0 {
            return;
        }
        self.growth = ((viewport.bottom() - section.top) / travel).clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn growth(&self) -> f32 {
        self.growth
    }

    /// Labels of the tree stages reached so far.
    pub fn visible_stages(&self) -> impl Iterator<Item = &str> {
        self.stages
            .iter()
            .filter(|stage| self.growth >= stage.at)
            .map(|stage| stage.label.as_str())
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::PotPressed(pot) => self.press(pot, now),
        }
    }

    pub fn view<'a>(&'a self, now: Instant) -> Element<'a, Message> {
        let mut pots = Row::new().spacing(spacing::LG);
        for (index, pot) in self.pots.iter().enumerate() {
            let bloomed = self.is_bloomed(index);
            let color = pot
                .color
                .as_deref()
                .and_then(AccentColor::parse)
                .map_or(palette::BLOSSOM, AccentColor::color);
            let flower = if bloomed { "🌸" } else { "🌱" };

            let mut layers = Stack::new()
                .width(Length::Fixed(sizing::FLOWER_POT))
                .height(Length::Fixed(sizing::FLOWER_POT))
                .push(
                    button(
                        Container::new(Text::new(flower).size(typography::TITLE_LG))
                            .center(Length::Fixed(sizing::FLOWER_POT)),
                    )
                    .on_press(Message::PotPressed(index))
                    .padding(0)
                    .style(styles::button::bare),
                );
            for (dx, dy, alpha) in self.petals(index, now) {
                let half = sizing::FLOWER_POT / 2.0;
                layers = layers.push(
                    Container::new(Text::new("•").size(typography::TITLE_SM).color(Color {
                        a: alpha,
                        ..color
                    }))
                    .padding(Padding {
                        top: (half + dy * sizing::FLOWER_POT).max(0.0),
                        left: (half + dx * sizing::FLOWER_POT).max(0.0),
                        ..Padding::ZERO
                    }),
                );
            }

            pots = pots.push(
                Column::new()
                    .align_x(alignment::Horizontal::Center)
                    .spacing(spacing::XXS)
                    .push(layers)
                    .push(Text::new(pot.name.as_str()).size(typography::CAPTION)),
            );
        }

        let mut tree = Column::new().spacing(spacing::XS);
        for label in self.visible_stages() {
            tree = tree.push(
                Container::new(Text::new(label).size(typography::BODY))
                    .padding([spacing::XXS, spacing::SM])
                    .style(|_theme: &Theme| container::Style {
                        background: Some(Background::Color(palette::SAGE_300)),
                        text_color: Some(palette::MOSS_700),
                        border: Border {
                            radius: radius::FULL.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }),
            );
        }

        Row::new()
            .spacing(spacing::XL)
            .align_y(alignment::Vertical::Center)
            .push(pots)
            .push(tree)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn content() -> Content {
        Content::from_toml_str(
            r##"
            [[sections]]
            id = "hero"
            height = 1000

            [[sections]]
            id = "wisdom"
            height = 1000

            [garden]
            pots = [{ name = "Rose", color = "#e39fb3" }, { name = "Tulip" }]
            tree_stages = [
                { label = "Seed", at = 0.0 },
                { label = "Sapling", at = 0.4 },
                { label = "Tree", at = 0.8 },
            ]
            "##,
        )
        .expect("valid content")
    }

    #[test]
    fn pot_blooms_then_closes() {
        let mut garden = Garden::new(&content()).expect("garden");
        let t0 = Instant::now();
        assert_eq!(garden.update(Message::PotPressed(0), t0), Event::Bloomed(0));
        assert!(garden.is_bloomed(0));
        assert!(!garden.is_bloomed(1));

        assert_eq!(garden.update(Message::PotPressed(0), t0), Event::Closed(0));
        assert!(!garden.is_bloomed(0));
        assert_eq!(garden.update(Message::PotPressed(9), t0), Event::None);
    }

    #[test]
    fn petal_burst_spreads_and_ends() {
        let mut garden = Garden::new(&content()).expect("garden");
        let t0 = Instant::now();
        garden.press(1, t0);

        let start = garden.petals(1, t0);
        assert_eq!(start.len(), PETAL_COUNT);
        assert_abs_diff_eq!(start[0].0, 0.0);

        let mid = garden.petals(1, t0 + PETAL_BURST / 2);
        assert!(mid[0].0 > 0.0 && mid[0].2 < 1.0);

        garden.tick(t0 + PETAL_BURST);
        assert!(garden.petals(1, t0 + PETAL_BURST).is_empty());
        assert!(!garden.is_animating());
        assert!(garden.is_bloomed(1));
    }

    #[test]
    fn tree_grows_as_section_scrolls_through() {
        let content = content();
        let layout = PageLayout::from_content(&content);
        let mut garden = Garden::new(&content).expect("garden");

        garden.on_scroll(&layout, &Viewport::new(0.0, 1000.0, 2000.0));
        assert_eq!(garden.visible_stages().collect::<Vec<_>>(), vec!["Seed"]);

        garden.on_scroll(&layout, &Viewport::new(1000.0, 1000.0, 2000.0));
        assert_abs_diff_eq!(garden.growth(), 0.5);
        assert_eq!(
            garden.visible_stages().collect::<Vec<_>>(),
            vec!["Seed", "Sapling"]
        );
    }
}
