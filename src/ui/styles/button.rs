// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Filled call-to-action, used for the contact form submit.
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, shadow) = match status {
        button::Status::Active | button::Status::Pressed => (palette::MOSS_700, shadow::SM),
        button::Status::Hovered => (palette::SAGE_500, shadow::MD),
        button::Status::Disabled => (palette::STONE_400, shadow::NONE),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::PAPER,
        border: Border {
            color: palette::MOSS_700,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow,
        snap: true,
    }
}

/// Rounded outline button for secondary actions and gallery controls.
pub fn pill(theme: &Theme, status: button::Status) -> button::Style {
    let accent = theme.extended_palette().primary.base.color;
    let text = theme.palette().text;
    let (background, text_color) = match status {
        button::Status::Hovered | button::Status::Pressed => {
            (Color { a: opacity::OVERLAY_SUBTLE, ..accent }, text)
        }
        button::Status::Disabled => (Color::TRANSPARENT, Color { a: 0.4, ..text }),
        button::Status::Active => (Color::TRANSPARENT, text),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: accent,
            width: border::WIDTH_SM,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Borderless button that only shows a tint on hover.
pub fn ghost(theme: &Theme, status: button::Status) -> button::Style {
    let text = theme.palette().text;
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..text
        })),
        _ => None,
    };
    button::Style {
        background,
        text_color: text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// No chrome at all; the content is the button.
pub fn bare(theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: theme.palette().text,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Highlighted row or active toggle.
pub fn selected(theme: &Theme, status: button::Status) -> button::Style {
    let accent = theme.extended_palette().primary.base.color;
    let background = match status {
        button::Status::Hovered => Color { a: 0.85, ..accent },
        _ => accent,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::PAPER,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Navigation bar link; underlined in the accent colour on hover.
pub fn nav_link(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.extended_palette();
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette.primary.base.color,
        _ => theme.palette().text,
    };
    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}
