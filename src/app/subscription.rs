// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events (keyboard, mouse, window) are mapped to page-level
//! messages. The frame clock only runs while something on the page moves.

use super::Message;
use iced::{event, keyboard, mouse, time, window, Subscription};
use std::time::Duration;

/// Frame interval while animating (about 60 frames per second).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Interval for toast expiry when nothing else animates.
const IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// Routes native events to the page.
///
/// Escape closes the topmost overlay, a resize re-arms the settle timer and
/// any mouse press counts as a page interaction.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) => Some(Message::EscapePressed),
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        // Presses captured by a widget still count as an interaction.
        event::Event::Mouse(mouse::Event::ButtonPressed(_)) => Some(Message::PagePressed),
        _ => None,
    })
}

/// Frame ticks while animating; slow ticks while only toasts are pending.
pub fn create_tick_subscription(animating: bool, has_notifications: bool) -> Subscription<Message> {
    if animating {
        time::every(FRAME_INTERVAL).map(Message::Tick)
    } else if has_notifications {
        time::every(IDLE_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
