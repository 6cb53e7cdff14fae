// SPDX-License-Identifier: MPL-2.0
//! Cancellable timed sequences for multi-step visual transitions.
//!
//! A [`Timeline`] is a fixed list of phases, each lasting a fixed duration.
//! Triggering it again restarts from the first phase and invalidates the
//! previous run, so a superseded sequence can never overwrite a newer one.
//! Time is always passed in explicitly; nothing here reads the clock.

use std::time::{Duration, Instant};

/// Where a timeline stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectState<P> {
    /// Never triggered, or cancelled.
    Idle,
    /// Inside `phase`, `progress` in `[0, 1]`.
    Transitioning { phase: P, progress: f32 },
    /// Every phase has elapsed.
    Settled,
}

impl<P: Copy> EffectState<P> {
    /// Returns the current phase, if any.
    pub fn phase(&self) -> Option<P> {
        match self {
            EffectState::Transitioning { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

/// An ordered list of timed phases.
#[derive(Debug, Clone)]
pub struct Timeline<P> {
    steps: Vec<(P, Duration)>,
    started_at: Option<Instant>,
    generation: u64,
}

impl<P: Copy + PartialEq> Timeline<P> {
    pub fn new(steps: impl Into<Vec<(P, Duration)>>) -> Self {
        Self {
            steps: steps.into(),
            started_at: None,
            generation: 0,
        }
    }

    /// Starts (or restarts) the sequence at `now`.
    ///
    /// Returns the generation of the new run.
    pub fn trigger(&mut self, now: Instant) -> u64 {
        self.generation += 1;
        self.started_at = Some(now);
        self.generation
    }

    /// Abandons the current run.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.started_at = None;
    }

    /// Generation of the latest trigger or cancel.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total duration of all phases.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|(_, duration)| *duration).sum()
    }

    #[must_use]
    pub fn state(&self, now: Instant) -> EffectState<P> {
        let Some(started_at) = self.started_at else {
            return EffectState::Idle;
        };

        let mut elapsed = now.saturating_duration_since(started_at);
        for (phase, duration) in &self.steps {
            if elapsed < *duration {
                let progress = if duration.is_zero() {
                    1.0
                } else {
                    elapsed.as_secs_f32() / duration.as_secs_f32()
                };
                return EffectState::Transitioning {
                    phase: *phase,
                    progress: progress.clamp(0.0, 1.0),
                };
            }
            elapsed -= *duration;
        }

        EffectState::Settled
    }

    /// True while a phase is in progress.
    #[must_use]
    pub fn is_running(&self, now: Instant) -> bool {
        matches!(self.state(now), EffectState::Transitioning { .. })
    }

    /// True once the sequence has completed at least once since the last trigger.
    #[must_use]
    pub fn is_settled(&self, now: Instant) -> bool {
        matches!(self.state(now), EffectState::Settled)
    }

    /// True if `phase` has fully elapsed in the current run.
    #[must_use]
    pub fn has_passed(&self, phase: P, now: Instant) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started_at);
        let mut end = Duration::ZERO;
        for (step, duration) in &self.steps {
            end += *duration;
            if *step == phase {
                return elapsed >= end;
            }
        }
        false
    }
}

/// A single deadline that can be armed, re-armed and disarmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// Arms the deadline `delay` after `now`, replacing any previous one.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.0 = Some(now + delay);
    }

    pub fn disarm(&mut self) {
        self.0 = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }

    /// Returns true exactly once, when `now` reaches the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.0 {
            Some(at) if now >= at => {
                self.0 = None;
                true
            }
            _ => false,
        }
    }
}

/// Cubic ease-in-out on `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic ease-out on `[0, 1]`.
#[must_use]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Step {
        Out,
        Swap,
        In,
    }

    fn fade() -> Timeline<Step> {
        Timeline::new(vec![
            (Step::Out, Duration::from_millis(200)),
            (Step::Swap, Duration::from_millis(50)),
            (Step::In, Duration::from_millis(300)),
        ])
    }

    #[test]
    fn untriggered_timeline_is_idle() {
        assert_eq!(fade().state(Instant::now()), EffectState::Idle);
    }

    #[test]
    fn phases_follow_durations() {
        let mut timeline = fade();
        let t0 = Instant::now();
        timeline.trigger(t0);

        assert_eq!(timeline.state(t0).phase(), Some(Step::Out));
        assert_eq!(
            timeline.state(t0 + Duration::from_millis(210)).phase(),
            Some(Step::Swap)
        );
        assert_eq!(
            timeline.state(t0 + Duration::from_millis(260)).phase(),
            Some(Step::In)
        );
        assert_eq!(
            timeline.state(t0 + Duration::from_millis(600)),
            EffectState::Settled
        );
    }

    #[test]
    fn progress_is_fraction_of_phase() {
        let mut timeline = fade();
        let t0 = Instant::now();
        timeline.trigger(t0);

        match timeline.state(t0 + Duration::from_millis(100)) {
            EffectState::Transitioning { phase, progress } => {
                assert_eq!(phase, Step::Out);
                assert_abs_diff_eq!(progress, 0.5, epsilon = 1e-3);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn retrigger_cancels_previous_run() {
        let mut timeline = fade();
        let t0 = Instant::now();
        let first = timeline.trigger(t0);

        // Mid fade-in of the first run, a new trigger restarts from fade-out.
        let t1 = t0 + Duration::from_millis(400);
        let second = timeline.trigger(t1);

        assert_ne!(first, second);
        assert_eq!(timeline.state(t1).phase(), Some(Step::Out));
        // The first run would have settled here; the second is still running.
        assert!(timeline.is_running(t0 + Duration::from_millis(600)));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut timeline = fade();
        let t0 = Instant::now();
        timeline.trigger(t0);
        timeline.cancel();
        assert_eq!(timeline.state(t0), EffectState::Idle);
    }

    #[test]
    fn has_passed_tracks_phase_ends() {
        let mut timeline = fade();
        let t0 = Instant::now();
        timeline.trigger(t0);
        assert!(!timeline.has_passed(Step::Out, t0 + Duration::from_millis(199)));
        assert!(timeline.has_passed(Step::Out, t0 + Duration::from_millis(200)));
        assert!(!timeline.has_passed(Step::Swap, t0 + Duration::from_millis(200)));
    }

    #[test]
    fn deadline_fires_once() {
        let mut deadline = Deadline::default();
        let t0 = Instant::now();
        deadline.arm(t0, Duration::from_millis(100));

        assert!(!deadline.fire(t0 + Duration::from_millis(50)));
        assert!(deadline.fire(t0 + Duration::from_millis(100)));
        assert!(!deadline.fire(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn rearming_deadline_replaces_previous() {
        let mut deadline = Deadline::default();
        let t0 = Instant::now();
        deadline.arm(t0, Duration::from_millis(100));
        deadline.arm(t0 + Duration::from_millis(90), Duration::from_millis(100));

        assert!(!deadline.fire(t0 + Duration::from_millis(120)));
        assert!(deadline.fire(t0 + Duration::from_millis(190)));
    }

    #[test]
    fn easing_endpoints() {
        assert_abs_diff_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_abs_diff_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_abs_diff_eq!(ease_in_out_cubic(0.5), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(ease_out_quad(1.0), 1.0);
    }
}
