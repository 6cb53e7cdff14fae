// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Raised surface for panels and pop-ups.
///
/// Derived from the theme background so it reads in light and dark mode.
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        text_color: Some(palette.background.weak.text),
        border: Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Translucent strip behind the navigation links.
pub fn navbar(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..base
        })),
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Full page background.
pub fn page(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        text_color: Some(palette.background.base.text),
        ..Default::default()
    }
}

/// Page-colored cover over a section that is still fading in.
///
/// `alpha` is the cover opacity: 1.0 hides the section, 0.0 shows it.
pub fn veil(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let base = theme.extended_palette().background.base.color;
        container::Style {
            background: Some(Background::Color(Color {
                a: alpha.clamp(0.0, 1.0),
                ..base
            })),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_follows_theme_background() {
        let light = card(&Theme::Light);
        let dark = card(&Theme::Dark);
        assert_ne!(light.background, dark.background);
    }

    #[test]
    fn veil_opacity_is_clamped() {
        let style = veil(1.5)(&Theme::Dark);
        match style.background {
            Some(Background::Color(color)) => assert!((color.a - 1.0).abs() < f32::EPSILON),
            other => panic!("unexpected background {other:?}"),
        }
    }
}
