// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for non-blocking feedback.
//!
//! Used for warnings: unreadable settings or content, failed theme
//! persistence, and links the system could not open.
//!
//! # Components
//!
//! - [`notification`] - `Notification` warnings and their display time
//! - [`manager`] - `Manager` for queuing and lifecycle
//! - [`toast`] - Toast widget rendering
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::new();
//! manager.push(Notification::warning("notification-config-load-error"), now);
//!
//! // In the view, render toasts
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```
//!
//! - Toast duration: 5s from when it becomes visible
//! - Max visible toasts: 3 (others are queued)
//! - Position: bottom-right corner

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::Notification;
pub use toast::Toast;
