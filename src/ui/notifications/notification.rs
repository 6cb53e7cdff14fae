// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// How long a toast stays on screen once shown.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// A warning toast: something degraded but the page carries on.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    /// The i18n key for the message, resolved at render time.
    message_key: String,
    message_args: Vec<(String, String)>,
    /// Set when the notification becomes visible.
    shown_at: Option<Instant>,
}

impl Notification {
    pub fn warning(message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            message_key: message_key.into(),
            message_args: Vec::new(),
            shown_at: None,
        }
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    pub(super) fn mark_shown(&mut self, now: Instant) {
        self.shown_at.get_or_insert(now);
    }

    /// Whether the notification has been visible long enough to go away.
    #[must_use]
    pub fn should_auto_dismiss(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|shown_at| now.saturating_duration_since(shown_at) >= DISPLAY_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::warning("test");
        let n2 = Notification::warning("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn dismissal_counts_from_when_shown() {
        let t0 = Instant::now();
        let mut notification = Notification::warning("test");
        assert!(!notification.should_auto_dismiss(t0 + Duration::from_secs(60)));

        notification.mark_shown(t0);
        assert!(!notification.should_auto_dismiss(t0 + Duration::from_secs(4)));
        assert!(notification.should_auto_dismiss(t0 + DISPLAY_DURATION));
    }

    #[test]
    fn builder_collects_args() {
        let notification = Notification::warning("notification-open-failed")
            .with_arg("target", "https://example.com");

        assert_eq!(notification.message_key(), "notification-open-failed");
        assert_eq!(
            notification.message_args(),
            &[("target".to_string(), "https://example.com".to_string())]
        );
    }
}
