// SPDX-License-Identifier: MPL-2.0
//! Fade-and-slide entrance for sections as they first scroll into view.

use crate::content::{Content, SectionId};
use crate::domain::{ElementBox, IntersectionObserver, PageLayout, Viewport};
use crate::domain::timeline::ease_out_quad;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Fraction of a section that must be visible before it reveals.
pub const REVEAL_THRESHOLD: f32 = 0.1;
/// Shrinks the viewport so sections reveal slightly after their edge shows.
pub const REVEAL_ROOT_MARGIN: f32 = -30.0;
pub const REVEAL_DURATION: Duration = Duration::from_millis(700);
/// Distance a section slides up while fading in.
pub const REVEAL_OFFSET: f32 = 30.0;

/// Tracks which sections have been revealed and when.
///
/// A revealed section stays revealed for the rest of the session.
#[derive(Debug, Clone)]
pub struct Reveal {
    observer: IntersectionObserver<SectionId>,
    watched: Vec<(SectionId, ElementBox)>,
    revealed: HashMap<SectionId, Instant>,
}

impl Reveal {
    /// Watches every section flagged `reveal`. `None` when there is none.
    #[must_use]
    pub fn new(content: &Content, layout: &PageLayout) -> Option<Self> {
        let watched: Vec<_> = content
            .sections
            .iter()
            .filter(|section| section.reveal)
            .filter_map(|section| Some((section.id.clone(), layout.section(&section.id)?)))
            .collect();

        if watched.is_empty() {
            return None;
        }

        Some(Self {
            observer: IntersectionObserver::new(REVEAL_THRESHOLD, REVEAL_ROOT_MARGIN),
            watched,
            revealed: HashMap::new(),
        })
    }

    /// Returns the sections revealed by this viewport.
    pub fn observe(&mut self, viewport: &Viewport, now: Instant) -> Vec<SectionId> {
        let pending = self
            .watched
            .iter()
            .filter(|(id, _)| !self.revealed.contains_key(id))
            .map(|(id, element)| (id, element));

        let entered: Vec<SectionId> = self
            .observer
            .observe(pending, viewport)
            .into_iter()
            .filter(|crossing| crossing.entering)
            .map(|crossing| crossing.key)
            .collect();

        for id in &entered {
            log::trace!("Revealed section {id}");
            self.revealed.insert(id.clone(), now);
        }
        entered
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains_key(id)
    }

    fn is_watched(&self, id: &str) -> bool {
        self.watched.iter().any(|(watched, _)| watched == id)
    }

    /// Eased entrance progress in `[0, 1]`; unwatched sections are always 1.
    #[must_use]
    pub fn progress(&self, id: &str, now: Instant) -> f32 {
        if !self.is_watched(id) {
            return 1.0;
        }
        match self.revealed.get(id) {
            Some(at) => ease_out_quad(
                now.saturating_duration_since(*at).as_secs_f32() / REVEAL_DURATION.as_secs_f32(),
            ),
            None => 0.0,
        }
    }

    #[must_use]
    pub fn opacity(&self, id: &str, now: Instant) -> f32 {
        self.progress(id, now)
    }

    /// Remaining downward offset of the section content.
    #[must_use]
    pub fn offset(&self, id: &str, now: Instant) -> f32 {
        REVEAL_OFFSET * (1.0 - self.progress(id, now))
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.revealed
            .values()
            .any(|at| now.saturating_duration_since(*at) < REVEAL_DURATION)
    }
}
