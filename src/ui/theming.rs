// SPDX-License-Identifier: MPL-2.0
//! Light/dark theming and the persisted theme switch.

use crate::app::persisted_state::AppState;
use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub surface_primary: Color,
    pub surface_secondary: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub overlay_background: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::PAPER,
            surface_secondary: palette::STONE_100,
            text_primary: palette::STONE_800,
            text_secondary: palette::STONE_600,
            accent: palette::MOSS_700,
            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::INK
            },
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::INK,
            surface_secondary: palette::STONE_800,
            text_primary: palette::STONE_100,
            text_secondary: palette::STONE_200,
            accent: palette::SAGE_300,
            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::INK
            },
        }
    }
}

/// The single persisted preference: `"dark"` or `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Reads the operating system preference; light on detection failure.
    #[must_use]
    pub fn from_system() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn colors(self) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::light(),
            ThemeMode::Dark => ColorScheme::dark(),
        }
    }

    #[must_use]
    pub fn iced_theme(self) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
        }
    }
}

/// Owns the current theme and writes every change through to the state file.
///
/// The OS preference is consulted once at startup only.
#[derive(Debug, Clone)]
pub struct ThemeSwitcher {
    mode: ThemeMode,
    store_dir: Option<PathBuf>,
}

impl ThemeSwitcher {
    /// Uses the persisted flag when present, otherwise asks `system`.
    pub fn init(
        state: &AppState,
        store_dir: Option<PathBuf>,
        system: impl FnOnce() -> ThemeMode,
    ) -> Self {
        let mode = state.theme.unwrap_or_else(system);
        Self { mode, store_dir }
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flips the theme and persists it immediately.
    ///
    /// Returns a notification key when the state file could not be written.
    pub fn toggle(&mut self, state: &mut AppState) -> Option<String> {
        self.mode = self.mode.toggled();
        state.theme = Some(self.mode);
        state.save_to(self.store_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn light_scheme_has_light_surface() {
        assert!(ColorScheme::light().surface_primary.r > 0.9);
    }

    #[test]
    fn dark_scheme_has_dark_surface() {
        assert!(ColorScheme::dark().surface_primary.r < 0.2);
    }

    #[test]
    fn toggled_flips_mode() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn persisted_flag_wins_over_system() {
        let state = AppState {
            theme: Some(ThemeMode::Dark),
        };
        let switcher = ThemeSwitcher::init(&state, None, || ThemeMode::Light);
        assert_eq!(switcher.mode(), ThemeMode::Dark);
    }

    #[test]
    fn system_preference_used_when_nothing_persisted() {
        let switcher = ThemeSwitcher::init(&AppState::default(), None, || ThemeMode::Dark);
        assert_eq!(switcher.mode(), ThemeMode::Dark);
    }

    #[test]
    fn toggle_persists_immediately() {
        let dir = tempdir().expect("temp dir");
        let mut state = AppState::default();
        let mut switcher =
            ThemeSwitcher::init(&state, Some(dir.path().to_path_buf()), || ThemeMode::Light);

        assert!(switcher.toggle(&mut state).is_none());

        let (reloaded, warning) = AppState::load_from(Some(dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(reloaded.theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn theme_mode_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeMode::Dark).expect("serialize");
        assert_eq!(json, "\"dark\"");
    }
}
