// SPDX-License-Identifier: MPL-2.0
//! Accent colours written as CSS-style hex strings.

use iced::Color;

/// A colour parsed from `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentColor(Color);

impl AccentColor {
    /// Parses a hex colour; the leading `#` is optional.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let hex = raw.trim().trim_start_matches('#');
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        let (r, g, b) = match hex.len() {
            3 => {
                let mut digits = hex.chars().map(|c| c.to_digit(16));
                let mut next = || digits.next().flatten().map(|d| (d * 17) as u8);
                (next()?, next()?, next()?)
            }
            6 => (
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
            ),
            _ => return None,
        };

        Some(Self(Color::from_rgb8(r, g, b)))
    }

    #[must_use]
    pub fn color(self) -> Color {
        self.0
    }

    /// Same colour at `alpha`, used for the glow around the preview frame.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Color {
        Color { a: alpha, ..self.0 }
    }
}
