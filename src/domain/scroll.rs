// SPDX-License-Identifier: MPL-2.0
//! Viewport geometry, intersection observation and scroll-band triggers.
//!
//! Everything here is expressed in page coordinates (logical pixels from the
//! top of the scrollable content). Observers keep the previous observation
//! and only report changes, mirroring how visibility callbacks behave in a
//! browser.

use std::collections::HashMap;
use std::hash::Hash;

/// Visible window over the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Scroll offset of the top edge.
    pub offset_y: f32,
    /// Visible height.
    pub height: f32,
    /// Height of the whole scrollable content.
    pub content_height: f32,
}

impl Viewport {
    pub fn new(offset_y: f32, height: f32, content_height: f32) -> Self {
        Self {
            offset_y,
            height,
            content_height,
        }
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.offset_y + self.height
    }

    /// Largest offset the page can scroll to.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }

    /// Fraction of the page scrolled, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max <= 0.0 {
            0.0
        } else {
            (self.offset_y / max).clamp(0.0, 1.0)
        }
    }

    /// Relative offset for an absolute target, as expected by `snap_to`.
    #[must_use]
    pub fn relative_offset_for(&self, target_y: f32) -> f32 {
        let max = self.max_offset();
        if max <= 0.0 {
            0.0
        } else {
            (target_y / max).clamp(0.0, 1.0)
        }
    }
}

/// Vertical extent of an element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBox {
    pub top: f32,
    pub height: f32,
}

impl ElementBox {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Fraction of this box visible inside `[root_top, root_bottom]`.
    #[must_use]
    pub fn visible_ratio(&self, root_top: f32, root_bottom: f32) -> f32 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let visible = self.bottom().min(root_bottom) - self.top.max(root_top);
        (visible / self.height).clamp(0.0, 1.0)
    }
}

/// A visibility change reported by [`IntersectionObserver::observe`].
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing<K> {
    pub key: K,
    pub entering: bool,
}

/// Reports boxes crossing a visibility threshold.
///
/// `root_margin` grows (positive) or shrinks (negative) the viewport on
/// both edges before computing ratios.
#[derive(Debug, Clone)]
pub struct IntersectionObserver<K> {
    threshold: f32,
    root_margin: f32,
    intersecting: HashMap<K, bool>,
}

impl<K: Clone + Eq + Hash> IntersectionObserver<K> {
    pub fn new(threshold: f32, root_margin: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin,
            intersecting: HashMap::new(),
        }
    }

    fn is_intersecting(&self, element: &ElementBox, viewport: &Viewport) -> bool {
        let root_top = viewport.offset_y - self.root_margin;
        let root_bottom = viewport.bottom() + self.root_margin;
        let ratio = element.visible_ratio(root_top, root_bottom);
        // A zero threshold still needs some overlap.
        if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }

    /// Compares each box against its previous state and returns the crossings.
    ///
    /// The first observation of a box reports it only if it is intersecting.
    pub fn observe<'a, I>(&mut self, elements: I, viewport: &Viewport) -> Vec<Crossing<K>>
    where
        I: IntoIterator<Item = (&'a K, &'a ElementBox)>,
        K: 'a,
    {
        let mut crossings = Vec::new();
        for (key, element) in elements {
            let now = self.is_intersecting(element, viewport);
            let before = self.intersecting.insert(key.clone(), now);
            let changed = match before {
                Some(previous) => previous != now,
                None => now,
            };
            if changed {
                crossings.push(Crossing {
                    key: key.clone(),
                    entering: now,
                });
            }
        }
        crossings
    }

    /// Keys intersecting as of the last observation.
    pub fn currently_intersecting(&self) -> impl Iterator<Item = &K> {
        self.intersecting
            .iter()
            .filter(|(_, intersecting)| **intersecting)
            .map(|(key, _)| key)
    }

    #[must_use]
    pub fn is_key_intersecting(&self, key: &K) -> bool {
        self.intersecting.get(key).copied().unwrap_or(false)
    }
}

/// Element edge used by an [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// "When `edge` of the element reaches `viewport_fraction` of the viewport".
///
/// `Anchor::new(Edge::Top, 0.55)` reads as "top 55%".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub edge: Edge,
    pub viewport_fraction: f32,
}

impl Anchor {
    pub const fn new(edge: Edge, viewport_fraction: f32) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Scroll offset at which this anchor is reached.
    #[must_use]
    pub fn scroll_position(&self, element: &ElementBox, viewport_height: f32) -> f32 {
        let edge_y = match self.edge {
            Edge::Top => element.top,
            Edge::Bottom => element.bottom(),
        };
        edge_y - viewport_height * self.viewport_fraction
    }
}

/// Direction-aware band events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Scrolling down past the start.
    Enter,
    /// Scrolling down past the end.
    Leave,
    /// Scrolling up past the end.
    EnterBack,
    /// Scrolling up past the start.
    LeaveBack,
}

/// Where the scroll offset sits relative to a trigger band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BandPosition {
    Before,
    Inside,
    After,
}

/// A scroll band between `start` and `end` anchors.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    start: Anchor,
    end: Anchor,
    position: Option<BandPosition>,
}

impl ScrollTrigger {
    pub fn new(start: Anchor, end: Anchor) -> Self {
        Self {
            start,
            end,
            position: None,
        }
    }

    fn locate(&self, element: &ElementBox, viewport: &Viewport) -> BandPosition {
        let start = self.start.scroll_position(element, viewport.height);
        let end = self.end.scroll_position(element, viewport.height);
        if viewport.offset_y < start {
            BandPosition::Before
        } else if viewport.offset_y <= end {
            BandPosition::Inside
        } else {
            BandPosition::After
        }
    }

    /// Scroll offsets of the band's start and end for `element`.
    #[must_use]
    pub fn band(&self, element: &ElementBox, viewport_height: f32) -> (f32, f32) {
        (
            self.start.scroll_position(element, viewport_height),
            self.end.scroll_position(element, viewport_height),
        )
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.position == Some(BandPosition::Inside)
    }

    /// Updates the trigger for the current viewport and returns the events
    /// crossed since the last update, in scroll order.
    ///
    /// The first update only establishes the position, except that starting
    /// inside or past the band counts as entering it (and leaving it).
    pub fn update(&mut self, element: &ElementBox, viewport: &Viewport) -> Vec<TriggerEvent> {
        use BandPosition::*;
        use TriggerEvent::*;

        let now = self.locate(element, viewport);
        let before = self.position.replace(now);

        match (before.unwrap_or(Before), now) {
            (Before, Inside) => vec![Enter],
            (Before, After) => vec![Enter, Leave],
            (Inside, After) => vec![Leave],
            (After, Inside) => vec![EnterBack],
            (After, Before) => vec![EnterBack, LeaveBack],
            (Inside, Before) => vec![LeaveBack],
            _ => Vec::new(),
        }
    }
}
