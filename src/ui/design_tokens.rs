// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Shared visual constants for the portfolio page.

## Organization

- **Palette**: Garden colors (sage, moss, clay, gold accents)
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use iced_folio::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let scrim = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::INK
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Neutrals
    pub const INK: Color = Color::from_rgb(0.09, 0.10, 0.09);
    pub const PAPER: Color = Color::from_rgb(0.98, 0.97, 0.94);
    pub const STONE_800: Color = Color::from_rgb(0.16, 0.17, 0.15);
    pub const STONE_600: Color = Color::from_rgb(0.32, 0.33, 0.30);
    pub const STONE_400: Color = Color::from_rgb(0.52, 0.53, 0.50);
    pub const STONE_200: Color = Color::from_rgb(0.82, 0.81, 0.77);
    pub const STONE_100: Color = Color::from_rgb(0.92, 0.91, 0.87);

    // Garden greens
    pub const SAGE_300: Color = Color::from_rgb(0.67, 0.76, 0.62);
    pub const SAGE_500: Color = Color::from_rgb(0.45, 0.58, 0.42);
    pub const MOSS_700: Color = Color::from_rgb(0.24, 0.35, 0.22);

    // Accents
    pub const GOLD: Color = Color::from_rgb(0.788, 0.663, 0.431);
    pub const CLAY: Color = Color::from_rgb(0.76, 0.45, 0.33);
    pub const BLOSSOM: Color = Color::from_rgb(0.93, 0.62, 0.70);
    pub const FIREFLY: Color = Color::from_rgb(0.98, 0.92, 0.45);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const WARNING_500: Color = Color::from_rgb(1.0, 0.6, 0.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.8;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
    pub const XXL: f32 = 48.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const NAVBAR_HEIGHT: f32 = 56.0;
    pub const PROGRESS_BAR_HEIGHT: f32 = 3.0;

    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const INPUT_HEIGHT: f32 = 40.0;

    /// Width of the dialogue narrator panel.
    pub const DIALOGUE_WIDTH: f32 = 340.0;

    /// Studio phone preview frame.
    pub const PHONE_WIDTH: f32 = 240.0;
    pub const PHONE_HEIGHT: f32 = 480.0;

    /// Gallery marquee tile.
    pub const GALLERY_TILE: f32 = 220.0;

    /// Certificate window on the simulated desktop.
    pub const CERT_WINDOW_WIDTH: f32 = 420.0;
    pub const CERT_WINDOW_HEIGHT: f32 = 280.0;

    /// iPod body.
    pub const IPOD_WIDTH: f32 = 220.0;
    pub const IPOD_SCREEN_HEIGHT: f32 = 160.0;
    pub const IPOD_ROW_HEIGHT: f32 = 24.0;

    pub const POLAROID_SIZE: f32 = 140.0;

    pub const TOAST_WIDTH: f32 = 320.0;
    pub const FLOWER_POT: f32 = 96.0;
    pub const BROWSER_CARD_WIDTH: f32 = 420.0;
    pub const BOOK_PAGE_WIDTH: f32 = 180.0;
    pub const BOOK_PAGE_HEIGHT: f32 = 240.0;
    pub const DESKTOP_ICON: f32 = 88.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Hero display name.
    pub const DISPLAY: f32 = 56.0;

    /// Section headings.
    pub const TITLE_LG: f32 = 32.0;
    pub const TITLE_MD: f32 = 22.0;
    pub const TITLE_SM: f32 = 18.0;

    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Widths
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
    pub const WIDTH_LG: f32 = 3.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 16.0;
    pub const PHONE: f32 = 36.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const SM: Shadow = Shadow {
        color: palette::INK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const NONE: Shadow = Shadow {
        color: iced::Color::TRANSPARENT,
        offset: Vector { x: 0.0, y: 0.0 },
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::INK,
        offset: Vector { x: 0.0, y: 6.0 },
        blur_radius: 12.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::INK,
        offset: Vector { x: 0.0, y: 12.0 },
        blur_radius: 24.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);
    assert!(spacing::XL > spacing::LG);
    assert!(opacity::OVERLAY_SUBTLE < opacity::OVERLAY_MEDIUM);
    assert!(opacity::OVERLAY_MEDIUM < opacity::OVERLAY_STRONG);
};
