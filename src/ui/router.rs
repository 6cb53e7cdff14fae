// SPDX-License-Identifier: MPL-2.0
//! Smooth scrolling to in-page anchors.

use crate::domain::timeline::ease_in_out_cubic;
use crate::domain::{PageLayout, Viewport};
use std::time::{Duration, Instant};

pub const SCROLL_DURATION: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
}

/// Animates the page offset towards a section's top edge.
#[derive(Debug, Clone, Default)]
pub struct Router {
    animation: Option<ScrollAnimation>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts scrolling to `target`; replaces any scroll in flight.
    ///
    /// Returns `false` for an unknown section.
    pub fn navigate(
        &mut self,
        target: &str,
        layout: &PageLayout,
        viewport: &Viewport,
        now: Instant,
    ) -> bool {
        let Some(section) = layout.section(target) else {
            log::debug!("Navigation to unknown section {target}");
            return false;
        };
        let to = section.top.clamp(0.0, viewport.max_offset());
        self.animation = Some(ScrollAnimation {
            from: viewport.offset_y,
            to,
            started: now,
        });
        true
    }

    /// Offset for this frame while a scroll is running.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let animation = self.animation?;
        let t = now.saturating_duration_since(animation.started).as_secs_f32()
            / SCROLL_DURATION.as_secs_f32();
        if t >= 1.0 {
            self.animation = None;
            return Some(animation.to);
        }
        Some(animation.from + (animation.to - animation.from) * ease_in_out_cubic(t))
    }

    pub fn cancel(&mut self) {
        self.animation = None;
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::test_utils::assert_abs_diff_eq;

    fn layout() -> PageLayout {
        let content = Content::from_toml_str(
            r#"
            [[sections]]
            id = "hero"
            height = 1000

            [[sections]]
            id = "about"
            height = 1000

            [[sections]]
            id = "contact"
            height = 500
            "#,
        )
        .expect("valid content");
        PageLayout::from_content(&content)
    }

    #[test]
    fn scrolls_to_section_top_with_easing() {
        let layout = layout();
        let viewport = Viewport::new(0.0, 800.0, layout.content_height());
        let mut router = Router::new();
        let t0 = Instant::now();

        assert!(router.navigate("about", &layout, &viewport, t0));
        assert_abs_diff_eq!(router.tick(t0).expect("running"), 0.0);
        assert_abs_diff_eq!(
            router.tick(t0 + SCROLL_DURATION / 2).expect("running"),
            500.0,
            epsilon = 1e-2
        );
        assert_abs_diff_eq!(router.tick(t0 + SCROLL_DURATION).expect("final"), 1000.0);
        assert!(router.tick(t0 + SCROLL_DURATION).is_none());
    }

    #[test]
    fn target_is_clamped_to_scroll_range() {
        let layout = layout();
        let viewport = Viewport::new(0.0, 800.0, layout.content_height());
        let mut router = Router::new();
        let t0 = Instant::now();
        router.navigate("contact", &layout, &viewport, t0);
        assert_abs_diff_eq!(router.tick(t0 + SCROLL_DURATION).expect("final"), 1700.0);
    }

    #[test]
    fn new_navigation_replaces_running_one() {
        let layout = layout();
        let mut router = Router::new();
        let t0 = Instant::now();
        router.navigate("contact", &layout, &Viewport::new(0.0, 800.0, 2500.0), t0);

        let t1 = t0 + Duration::from_millis(300);
        let midway = router.tick(t1).expect("running");
        router.navigate("hero", &layout, &Viewport::new(midway, 800.0, 2500.0), t1);

        assert_abs_diff_eq!(router.tick(t1).expect("running"), midway);
        assert_abs_diff_eq!(router.tick(t1 + SCROLL_DURATION).expect("final"), 0.0);
    }

    #[test]
    fn unknown_target_is_ignored() {
        let mut router = Router::new();
        let viewport = Viewport::new(0.0, 800.0, 2500.0);
        assert!(!router.navigate("nowhere", &layout(), &viewport, Instant::now()));
        assert!(!router.is_animating());
    }
}
