// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Gallery**: Marquee loop duration bounds
//! - **Audio**: Acknowledgement chime volume
//! - **Contact**: Delivery endpoints and status message lifetime
//! - **Window**: Initial size and resize settling

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Default marquee loop duration in seconds (lower = faster).
pub const DEFAULT_GALLERY_SPEED_SECS: u32 = 20;

/// Fastest allowed marquee loop duration in seconds.
pub const MIN_GALLERY_SPEED_SECS: u32 = 5;

/// Slowest allowed marquee loop duration in seconds.
pub const MAX_GALLERY_SPEED_SECS: u32 = 60;

/// Change applied by one speed-up / speed-down press.
pub const GALLERY_SPEED_STEP_SECS: u32 = 5;

// ==========================================================================
// Audio Defaults
// ==========================================================================

/// Default chime volume (0.0 to 1.0).
pub const DEFAULT_CHIME_VOLUME: f32 = 0.3;

/// Minimum chime volume.
pub const MIN_CHIME_VOLUME: f32 = 0.0;

/// Maximum chime volume.
pub const MAX_CHIME_VOLUME: f32 = 1.0;

// ==========================================================================
// Contact Defaults
// ==========================================================================

/// Hosted form-relay endpoint used as the primary transport.
pub const DEFAULT_FORM_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Email-relay API endpoint used when a secondary relay is configured.
pub const DEFAULT_EMAIL_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Address used by the mail-client handoff when nothing else is configured.
pub const DEFAULT_CONTACT_RECIPIENT: &str = "constancadcunha@gmail.com";

/// Seconds before the form status message clears itself.
pub const FORM_STATUS_CLEAR_SECS: u64 = 5;

/// Per-request timeout for network transports.
pub const CONTACT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ==========================================================================
// Window Defaults
// ==========================================================================

/// Initial window width in logical pixels.
pub const WINDOW_WIDTH: f32 = 1280.0;

/// Initial window height in logical pixels.
pub const WINDOW_HEIGHT: f32 = 800.0;

/// Smallest window the page layout still fits.
pub const MIN_WINDOW_WIDTH: f32 = 720.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Quiet period after the last resize before observers are re-run.
pub const RESIZE_SETTLE_MS: u64 = 250;
