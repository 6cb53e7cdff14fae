// SPDX-License-Identifier: MPL-2.0
//! Particle systems drawn on a canvas: hero dust, footer fireflies and the
//! confetti burst that celebrates a sent message.
//!
//! Positions are normalised to the canvas (`0..1` on both axes) so a system
//! does not care how large it is drawn. Every system steps from the elapsed
//! time between ticks, capped so a suspended window does not teleport
//! particles.

use crate::ui::design_tokens::palette;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Renderer, Theme, Vector};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};
use std::time::{Duration, Instant};

/// Longest step a single tick may simulate.
const MAX_STEP: Duration = Duration::from_millis(100);

pub const FIREFLY_COUNT: usize = 18;

pub const CONFETTI_COUNT: usize = 100;
/// Cone of the burst, in degrees, centred on straight up.
pub const CONFETTI_SPREAD_DEG: f32 = 70.0;
/// Burst origin as a fraction of the canvas height.
pub const CONFETTI_ORIGIN_Y: f32 = 0.6;
pub const CONFETTI_LIFETIME: Duration = Duration::from_millis(3000);
const GRAVITY: f32 = 1.2;
const DRAG: f32 = 0.9;

const CONFETTI_COLORS: [Color; 5] = [
    palette::SAGE_500,
    palette::GOLD,
    palette::BLOSSOM,
    palette::CLAY,
    palette::SAGE_300,
];

/// One circle to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub position: Point,
    pub radius: f32,
    pub color: Color,
}

/// Elapsed time since the previous tick, capped at [`MAX_STEP`].
#[derive(Debug, Clone, Copy, Default)]
struct Clock {
    last: Option<Instant>,
}

impl Clock {
    fn step(&mut self, now: Instant) -> f32 {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last))
            .min(MAX_STEP);
        self.last = Some(now);
        dt.as_secs_f32()
    }

    fn pause(&mut self) {
        self.last = None;
    }
}

#[derive(Debug, Clone, Copy)]
struct Mote {
    position: Point,
    speed: f32,
    radius: f32,
    sway_phase: f32,
}

/// Dust slowly rising behind the hero, wrapping to the bottom.
#[derive(Debug, Clone)]
pub struct Ambient {
    motes: Vec<Mote>,
    clock: Clock,
    elapsed: f32,
}

impl Ambient {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, &mut SmallRng::from_os_rng())
    }

    #[must_use]
    pub fn with_seed(count: usize, seed: u64) -> Self {
        Self::with_rng(count, &mut SmallRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, rng: &mut SmallRng) -> Self {
        let motes = (0..count)
            .map(|_| Mote {
                position: Point::new(rng.random::<f32>(), rng.random::<f32>()),
                speed: rng.random_range(0.02..0.06),
                radius: rng.random_range(1.0..3.0),
                sway_phase: rng.random_range(0.0..TAU),
            })
            .collect();
        Self {
            motes,
            clock: Clock::default(),
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let dt = self.clock.step(now);
        self.elapsed += dt;
        for mote in &mut self.motes {
            mote.position.y -= mote.speed * dt;
            if mote.position.y < 0.0 {
                mote.position.y += 1.0;
            }
        }
    }

    /// Call when the hero scrolls out of view.
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    #[must_use]
    pub fn dots(&self) -> Vec<Dot> {
        self.motes
            .iter()
            .map(|mote| Dot {
                position: Point::new(
                    mote.position.x + 0.01 * (self.elapsed + mote.sway_phase).sin(),
                    mote.position.y,
                ),
                radius: mote.radius,
                color: Color {
                    a: 0.35,
                    ..palette::SAGE_300
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Firefly {
    position: Point,
    heading: f32,
    speed: f32,
    pulse_phase: f32,
    pulse_rate: f32,
}

/// Fireflies wandering over the footer with a pulsing glow.
#[derive(Debug, Clone)]
pub struct Fireflies {
    flies: Vec<Firefly>,
    rng: SmallRng,
    clock: Clock,
    elapsed: f32,
}

impl Fireflies {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: SmallRng) -> Self {
        let flies = (0..FIREFLY_COUNT)
            .map(|_| Firefly {
                position: Point::new(rng.random::<f32>(), rng.random::<f32>()),
                heading: rng.random_range(0.0..TAU),
                speed: rng.random_range(0.02..0.05),
                pulse_phase: rng.random_range(0.0..TAU),
                pulse_rate: rng.random_range(1.5..3.0),
            })
            .collect();
        Self {
            flies,
            rng,
            clock: Clock::default(),
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let dt = self.clock.step(now);
        self.elapsed += dt;
        for fly in &mut self.flies {
            fly.heading += self.rng.random_range(-1.5..1.5) * dt;
            fly.position.x += fly.heading.cos() * fly.speed * dt;
            fly.position.y += fly.heading.sin() * fly.speed * dt;
            fly.position.x = fly.position.x.rem_euclid(1.0);
            fly.position.y = fly.position.y.rem_euclid(1.0);
        }
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Glow of fly `index` in `[0.2, 1.0]`.
    #[must_use]
    pub fn glow(&self, index: usize) -> f32 {
        self.flies.get(index).map_or(0.0, |fly| {
            0.6 + 0.4 * (self.elapsed * fly.pulse_rate + fly.pulse_phase).sin()
        })
    }

    #[must_use]
    pub fn dots(&self) -> Vec<Dot> {
        self.flies
            .iter()
            .enumerate()
            .flat_map(|(index, fly)| {
                let glow = self.glow(index);
                [
                    Dot {
                        position: fly.position,
                        radius: 6.0,
                        color: Color {
                            a: 0.15 * glow,
                            ..palette::FIREFLY
                        },
                    },
                    Dot {
                        position: fly.position,
                        radius: 2.0,
                        color: Color {
                            a: glow,
                            ..palette::FIREFLY
                        },
                    },
                ]
            })
            .collect()
    }
}

impl Default for Fireflies {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    position: Point,
    velocity: Vector,
    age: f32,
    color: Color,
    radius: f32,
}

/// Short celebratory burst from below the middle of the window.
#[derive(Debug, Clone)]
pub struct Confetti {
    pieces: Vec<Piece>,
    rng: SmallRng,
    clock: Clock,
}

impl Confetti {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            pieces: Vec::new(),
            rng,
            clock: Clock::default(),
        }
    }

    /// Launches a new burst on top of any pieces still falling.
    pub fn burst(&mut self) {
        let half_spread = CONFETTI_SPREAD_DEG.to_radians() / 2.0;
        for _ in 0..CONFETTI_COUNT {
            let angle = -PI / 2.0 + self.rng.random_range(-half_spread..half_spread);
            let speed = self.rng.random_range(0.6..1.2);
            let color = CONFETTI_COLORS[self.rng.random_range(0..CONFETTI_COLORS.len())];
            self.pieces.push(Piece {
                position: Point::new(0.5, CONFETTI_ORIGIN_Y),
                velocity: Vector::new(angle.cos() * speed, angle.sin() * speed),
                age: 0.0,
                color,
                radius: self.rng.random_range(2.0..4.0),
            });
        }
        self.clock.pause();
    }

    pub fn tick(&mut self, now: Instant) {
        let dt = self.clock.step(now);
        let lifetime = CONFETTI_LIFETIME.as_secs_f32();
        for piece in &mut self.pieces {
            piece.velocity.y += GRAVITY * dt;
            piece.velocity = piece.velocity * (1.0 - (1.0 - DRAG) * dt);
            piece.position = piece.position + piece.velocity * dt;
            piece.age += dt;
        }
        self.pieces
            .retain(|piece| piece.age < lifetime && piece.position.y < 1.2);
        if self.pieces.is_empty() {
            self.clock.pause();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.pieces.is_empty()
    }

    #[must_use]
    pub fn dots(&self) -> Vec<Dot> {
        let lifetime = CONFETTI_LIFETIME.as_secs_f32();
        self.pieces
            .iter()
            .map(|piece| Dot {
                position: piece.position,
                radius: piece.radius,
                color: Color {
                    a: (1.0 - piece.age / lifetime).clamp(0.0, 1.0),
                    ..piece.color
                },
            })
            .collect()
    }
}

impl Default for Confetti {
    fn default() -> Self {
        Self::new()
    }
}

/// Canvas drawing a set of dots scaled to its bounds.
struct DotLayer {
    dots: Vec<Dot>,
}

impl<Message> canvas::Program<Message> for DotLayer {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        for dot in &self.dots {
            let center = Point::new(
                dot.position.x * bounds.width,
                dot.position.y * bounds.height,
            );
            frame.fill(&Path::circle(center, dot.radius), dot.color);
        }
        vec![frame.into_geometry()]
    }
}

/// Fills the available space with `dots`.
pub fn view<'a, Message: 'a>(dots: Vec<Dot>) -> Element<'a, Message> {
    Canvas::new(DotLayer { dots })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_motes_rise_and_wrap() {
        let mut ambient = Ambient::with_seed(20, 7);
        let t0 = Instant::now();
        ambient.tick(t0);
        let before = ambient.dots();
        for step in 1..=600 {
            ambient.tick(t0 + Duration::from_millis(100 * step));
        }
        let after = ambient.dots();
        assert_eq!(before.len(), after.len());
        assert!(after
            .iter()
            .all(|dot| (0.0..=1.0).contains(&dot.position.y)));
    }

    #[test]
    fn fireflies_stay_on_canvas_and_pulse() {
        let mut flies = Fireflies::with_seed(3);
        let t0 = Instant::now();
        for step in 0..200 {
            flies.tick(t0 + Duration::from_millis(50 * step));
        }
        assert_eq!(flies.dots().len(), FIREFLY_COUNT * 2);
        for dot in flies.dots() {
            assert!((0.0..=1.0).contains(&dot.position.x));
            assert!((0.0..=1.0).contains(&dot.position.y));
        }
        for index in 0..FIREFLY_COUNT {
            let glow = flies.glow(index);
            assert!((0.2..=1.0).contains(&glow), "glow {glow}");
        }
    }

    #[test]
    fn confetti_bursts_upward_then_dies() {
        let mut confetti = Confetti::with_seed(11);
        confetti.burst();
        assert_eq!(confetti.len(), CONFETTI_COUNT);

        let t0 = Instant::now();
        confetti.tick(t0);
        confetti.tick(t0 + Duration::from_millis(100));
        let risen = confetti
            .dots()
            .iter()
            .filter(|dot| dot.position.y < CONFETTI_ORIGIN_Y)
            .count();
        assert_eq!(risen, CONFETTI_COUNT);

        for step in 2..=40 {
            confetti.tick(t0 + Duration::from_millis(100 * step));
        }
        assert!(confetti.is_empty());
        assert!(!confetti.is_animating());
    }

    #[test]
    fn burst_stays_inside_spread() {
        let mut confetti = Confetti::with_seed(5);
        confetti.burst();
        let limit = (CONFETTI_SPREAD_DEG / 2.0).to_radians().sin();
        for piece in &confetti.pieces {
            let speed = (piece.velocity.x.powi(2) + piece.velocity.y.powi(2)).sqrt();
            assert!(piece.velocity.y < 0.0);
            assert!((piece.velocity.x / speed).abs() <= limit + 1e-4);
        }
    }
}
