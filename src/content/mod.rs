// SPDX-License-Identifier: MPL-2.0
//! Page content: everything the portfolio shows, described as a TOML document.
//!
//! The document names the page sections in order with their heights, and
//! carries one optional block per interactive component. A component whose
//! block is absent is simply not built.
//!
//! A default document is embedded in the binary. A user document can be
//! supplied with `--content` or the `[content] path` setting; relative media
//! paths inside it are resolved against the document's directory.

mod accent;

pub use accent::AccentColor;

use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "assets/content/"]
struct Asset;

const DEFAULT_DOCUMENT: &str = "portfolio.toml";

/// Identifier of a page section (`"hero"`, `"about"`, ...).
pub type SectionId = String;

/// Root of the content document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Content {
    pub nav: Vec<NavLink>,
    pub sections: Vec<Section>,
    pub hero: Option<Hero>,
    pub dialogue: Option<Dialogue>,
    pub studio: Option<Studio>,
    pub gallery: Option<Gallery>,
    pub contact: Option<ContactBlock>,
    pub counters: Option<Counters>,
    pub camera: Option<Camera>,
    pub garden: Option<Garden>,
    pub browser_card: Option<BrowserCard>,
    pub certificates: Option<Certificates>,
    pub book: Option<Book>,
    pub chapters: Option<Accordion>,
    pub case_studies: Option<CaseStudies>,
    pub ipod: Option<Ipod>,
}

/// Entry of the top navigation bar.
#[derive(Debug, Clone, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub target: SectionId,
}

/// A vertical slice of the page.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: SectionId,
    #[serde(default)]
    pub title: String,
    pub height: f32,
    /// Fades in the first time it scrolls into view.
    #[serde(default)]
    pub reveal: bool,
    /// Rendered as the page footer.
    #[serde(default)]
    pub footer: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hero {
    pub subtitle: String,
    pub name_lines: Vec<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub scroll_hint: String,
    /// Number of ambient particles drifting behind the hero.
    #[serde(default = "default_hero_particles")]
    pub particles: usize,
}

fn default_hero_particles() -> usize {
    40
}

/// Section captions shown by the narrator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dialogue {
    #[serde(default)]
    pub captions: BTreeMap<SectionId, Caption>,
}

/// Trusted static caption text with an optional icon name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Caption {
    pub text: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Caption {
    /// Glyph drawn after the caption text for known icon names.
    #[must_use]
    pub fn icon_glyph(&self) -> Option<&'static str> {
        let glyph = match self.icon.as_deref()? {
            "eco" => "🌿",
            "public" => "🌍",
            "grass" => "🌱",
            "phone_iphone" => "📱",
            "auto_awesome" => "✨",
            "spa" => "🌸",
            "verified" => "✔",
            "favorite" => "♥",
            _ => return None,
        };
        Some(glyph)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Project,
    /// Decorative gap between projects.
    Spacer,
    /// Marks the start of the archive region; hides the preview.
    Archive,
}

/// Case-study entry of the studio section.
#[derive(Debug, Clone, Deserialize)]
pub struct StudioEntry {
    #[serde(default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub color: Option<String>,
    pub height: f32,
}

impl StudioEntry {
    #[must_use]
    pub fn is_project(&self) -> bool {
        self.kind == EntryKind::Project
    }

    #[must_use]
    pub fn accent(&self) -> Option<AccentColor> {
        self.color.as_deref().and_then(AccentColor::parse)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Studio {
    /// Section id the studio lives in.
    #[serde(default = "default_studio_section")]
    pub section: SectionId,
    /// Space above the first entry.
    #[serde(default)]
    pub intro_height: f32,
    pub entries: Vec<StudioEntry>,
}

fn default_studio_section() -> SectionId {
    "studio".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artwork {
    pub title: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gallery {
    #[serde(default = "default_gallery_section")]
    pub section: SectionId,
    pub artworks: Vec<Artwork>,
}

fn default_gallery_section() -> SectionId {
    "designs".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactBlock {
    #[serde(default = "default_contact_section")]
    pub section: SectionId,
    #[serde(default)]
    pub intro: String,
}

fn default_contact_section() -> SectionId {
    "contact".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Counter {
    pub label: String,
    pub target: u32,
    #[serde(default)]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Counters {
    /// Counting starts once this section has been revealed.
    #[serde(default = "default_counters_section")]
    pub section: SectionId,
    pub items: Vec<Counter>,
}

fn default_counters_section() -> SectionId {
    "about".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub caption: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Camera {
    #[serde(default = "default_camera_section")]
    pub section: SectionId,
    pub photos: Vec<Photo>,
}

fn default_camera_section() -> SectionId {
    "about".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pot {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Tree growth marker: shown once the section has scrolled past `at`.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeStage {
    pub label: String,
    pub at: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Garden {
    #[serde(default = "default_garden_section")]
    pub section: SectionId,
    #[serde(default)]
    pub pots: Vec<Pot>,
    #[serde(default)]
    pub tree_stages: Vec<TreeStage>,
}

fn default_garden_section() -> SectionId {
    "wisdom".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserCard {
    #[serde(default = "default_browser_section")]
    pub section: SectionId,
}

fn default_browser_section() -> SectionId {
    "websites".to_string()
}

/// Size of the decorative monitor frame certificate windows open inside.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MonitorFrame {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certificates {
    #[serde(default = "default_certificates_section")]
    pub section: SectionId,
    #[serde(default)]
    pub monitor: Option<MonitorFrame>,
    pub items: Vec<Certificate>,
}

fn default_certificates_section() -> SectionId {
    "certificates".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookPage {
    pub front: String,
    #[serde(default)]
    pub back: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    #[serde(default = "default_journey_section")]
    pub section: SectionId,
    #[serde(default)]
    pub title: String,
    pub pages: Vec<BookPage>,
}

fn default_journey_section() -> SectionId {
    "artifacts".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Panel {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Accordion {
    #[serde(default = "default_journey_section")]
    pub section: SectionId,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseStudies {
    #[serde(default = "default_browser_section")]
    pub section: SectionId,
    pub panels: Vec<CaseStudy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpodItem {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ipod {
    #[serde(default = "default_ipod_section")]
    pub section: SectionId,
    pub items: Vec<IpodItem>,
}

fn default_ipod_section() -> SectionId {
    "wisdom".to_string()
}

impl Content {
    /// Parses a content document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Content`] on malformed TOML or an invalid section list.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let content: Content =
            toml::from_str(source).map_err(|err| Error::Content(err.to_string()))?;
        content.validate()?;
        Ok(content)
    }

    /// The document embedded in the binary.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded document is missing or malformed.
    pub fn embedded() -> Result<Self> {
        let file = Asset::get(DEFAULT_DOCUMENT)
            .ok_or_else(|| Error::Content(format!("{DEFAULT_DOCUMENT} not embedded")))?;
        let source = String::from_utf8_lossy(file.data.as_ref());
        Self::from_toml_str(&source)
    }

    /// Reads a document from disk and resolves its media paths.
    ///
    /// # Errors
    ///
    /// Returns an I/O or content error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let mut content = Self::from_toml_str(&source)?;
        if let Some(base) = path.parent() {
            content.resolve_media(base);
        }
        Ok(content)
    }

    /// Loads the user document when given, falling back to the embedded one.
    ///
    /// Returns `(content, optional_warning_key)`.
    pub fn load(path: Option<&Path>) -> (Self, Option<String>) {
        if let Some(path) = path {
            match Self::load_from_path(path) {
                Ok(content) => return (content, None),
                Err(err) => {
                    log::warn!("Falling back to built-in content: {err}");
                    let (content, _) = Self::load(None);
                    return (content, Some("notification-content-load-error".to_string()));
                }
            }
        }

        match Self::embedded() {
            Ok(content) => (content, None),
            Err(err) => {
                log::error!("Built-in content unusable: {err}");
                (
                    Self::default(),
                    Some("notification-content-load-error".to_string()),
                )
            }
        }
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    #[must_use]
    pub fn caption_for(&self, id: &str) -> Option<&Caption> {
        self.dialogue.as_ref()?.captions.get(id)
    }

    fn validate(&self) -> Result<()> {
        for (index, section) in self.sections.iter().enumerate() {
            if section.id.is_empty() {
                return Err(Error::Content(format!("section {index} has no id")));
            }
            if !section.height.is_finite() || section.height < 0.0 {
                return Err(Error::Content(format!(
                    "section '{}' has an invalid height",
                    section.id
                )));
            }
            if self.sections[..index].iter().any(|s| s.id == section.id) {
                return Err(Error::Content(format!(
                    "section '{}' declared twice",
                    section.id
                )));
            }
        }
        Ok(())
    }

    fn resolve_media(&mut self, base: &Path) {
        let resolve = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        };

        if let Some(studio) = self.studio.as_mut() {
            studio.entries.iter_mut().for_each(|e| resolve(&mut e.image));
        }
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.artworks.iter_mut().for_each(|a| resolve(&mut a.image));
        }
        if let Some(camera) = self.camera.as_mut() {
            camera.photos.iter_mut().for_each(|p| resolve(&mut p.image));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"
        [[sections]]
        id = "hero"
        height = 600.0

        [[sections]]
        id = "about"
        height = 400.0
        reveal = true
    "#;

    #[test]
    fn embedded_document_parses() {
        let content = Content::embedded().expect("embedded content");
        assert!(content.section("hero").is_some());
        assert!(content.studio.is_some());
        assert!(content.caption_for("contact").is_some());
    }

    #[test]
    fn missing_blocks_are_none() {
        let content = Content::from_toml_str(MINIMAL).expect("parse");
        assert_eq!(content.sections.len(), 2);
        assert!(content.studio.is_none());
        assert!(content.book.is_none());
        assert!(content.caption_for("hero").is_none());
    }

    #[test]
    fn duplicate_section_is_rejected() {
        let source = r#"
            [[sections]]
            id = "a"
            height = 10.0
            [[sections]]
            id = "a"
            height = 10.0
        "#;
        assert!(matches!(
            Content::from_toml_str(source),
            Err(Error::Content(_))
        ));
    }

    #[test]
    fn negative_height_is_rejected() {
        let source = r#"
            [[sections]]
            id = "a"
            height = -1.0
        "#;
        assert!(Content::from_toml_str(source).is_err());
    }

    #[test]
    fn caption_glyphs() {
        let caption = Caption {
            text: "hi".into(),
            icon: Some("eco".into()),
        };
        assert_eq!(caption.icon_glyph(), Some("🌿"));

        let unknown = Caption {
            text: "hi".into(),
            icon: Some("nope".into()),
        };
        assert_eq!(unknown.icon_glyph(), None);
    }

    #[test]
    fn relative_media_resolves_against_document() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("page.toml");
        std::fs::write(
            &path,
            r#"
            [[sections]]
            id = "designs"
            height = 500.0

            [gallery]
            artworks = [{ title = "Leaf", image = "img/leaf.png" }]
            "#,
        )
        .expect("write");

        let content = Content::load_from_path(&path).expect("load");
        let image = content.gallery.expect("gallery").artworks[0]
            .image
            .clone()
            .expect("image");
        assert_eq!(image, dir.path().join("img/leaf.png"));
    }

    #[test]
    fn unreadable_document_falls_back_with_warning() {
        let dir = tempdir().expect("temp dir");
        let (content, warning) = Content::load(Some(&dir.path().join("missing.toml")));
        assert!(!content.sections.is_empty());
        assert_eq!(warning.as_deref(), Some("notification-content-load-error"));
    }
}
