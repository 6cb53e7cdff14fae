// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[audio]` - Acknowledgement chime
//! - `[contact]` - Contact form delivery chain
//! - `[content]` - Optional replacement for the embedded page content
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_FOLIO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_folio::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Acknowledgement chime settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    /// Whether the chime plays at all.
    #[serde(default = "default_audio_enabled", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Chime volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_audio_enabled(),
            volume: default_volume(),
        }
    }
}

/// Secondary email-relay service credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailRelayConfig {
    #[serde(default = "default_email_relay_endpoint")]
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// Contact form delivery chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactConfig {
    /// Primary form-relay endpoint.
    #[serde(default = "default_form_relay_endpoint")]
    pub endpoint: String,

    /// Access token for the primary relay. Without it the relay is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Address used for the mail-client handoff.
    #[serde(default = "default_recipient")]
    pub recipient: String,

    /// Optional secondary relay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_relay: Option<EmailRelayConfig>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_form_relay_endpoint(),
            access_key: None,
            recipient: default_recipient(),
            email_relay: None,
        }
    }
}

/// Page content source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentConfig {
    /// Path to a content document replacing the embedded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

impl Config {
    /// Effective chime volume, clamped to the supported range.
    #[must_use]
    pub fn chime_volume(&self) -> f32 {
        self.audio
            .volume
            .unwrap_or(DEFAULT_CHIME_VOLUME)
            .clamp(MIN_CHIME_VOLUME, MAX_CHIME_VOLUME)
    }

    /// Whether the chime is enabled.
    #[must_use]
    pub fn chime_enabled(&self) -> bool {
        self.audio.enabled.unwrap_or(true)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_audio_enabled() -> Option<bool> {
    Some(true)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_CHIME_VOLUME)
}

fn default_form_relay_endpoint() -> String {
    DEFAULT_FORM_RELAY_ENDPOINT.to_string()
}

fn default_email_relay_endpoint() -> String {
    DEFAULT_EMAIL_RELAY_ENDPOINT.to_string()
}

fn default_recipient() -> String {
    DEFAULT_CONTACT_RECIPIENT.to_string()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration into a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let path = get_config_path_with_override(base_dir)
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
    save_to_path(config, &path)
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.language, None);
        assert_eq!(config.audio.enabled, Some(true));
        assert_eq!(config.contact.endpoint, DEFAULT_FORM_RELAY_ENDPOINT);
        assert!(config.contact.access_key.is_none());
        assert!(config.contact.email_relay.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        config.contact.access_key = Some("token".to_string());
        config.contact.email_relay = Some(EmailRelayConfig {
            endpoint: DEFAULT_EMAIL_RELAY_ENDPOINT.to_string(),
            service_id: "svc".into(),
            template_id: "tpl".into(),
            public_key: "pk".into(),
        });

        save_to_path(&config, &path).expect("save");
        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[general]\nlanguage = \"en-US\"\n").expect("write");

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded.general.language.as_deref(), Some("en-US"));
        assert_eq!(loaded.contact, ContactConfig::default());
        assert_eq!(loaded.audio, AudioConfig::default());
    }

    #[test]
    fn invalid_file_yields_default_with_warning() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE), "not = [valid").expect("write");

        let (config, warning) = load_with_override(Some(dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn chime_volume_is_clamped() {
        let mut config = Config::default();
        config.audio.volume = Some(4.0);
        assert_eq!(config.chime_volume(), MAX_CHIME_VOLUME);
        config.audio.volume = Some(-1.0);
        assert_eq!(config.chime_volume(), MIN_CHIME_VOLUME);
    }
}
