// SPDX-License-Identifier: MPL-2.0
//! Page geometry derived from the content document.
//!
//! Sections stack vertically in declaration order. Studio entries stack
//! inside their section below its intro block; the section grows when its
//! declared height is too small for them.

use super::scroll::ElementBox;
use crate::content::{Content, SectionId};

/// Vertical position of every section and studio entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    sections: Vec<(SectionId, ElementBox)>,
    studio_entries: Vec<ElementBox>,
    content_height: f32,
}

impl PageLayout {
    #[must_use]
    pub fn from_content(content: &Content) -> Self {
        let studio = content.studio.as_ref();
        let studio_height = studio.map(|studio| {
            studio.intro_height + studio.entries.iter().map(|e| e.height.max(0.0)).sum::<f32>()
        });

        let mut sections = Vec::with_capacity(content.sections.len());
        let mut studio_entries = Vec::new();
        let mut top = 0.0;

        for section in &content.sections {
            let mut height = section.height.max(0.0);

            if let (Some(studio), Some(needed)) = (studio, studio_height) {
                if studio.section == section.id {
                    height = height.max(needed);
                    let mut entry_top = top + studio.intro_height;
                    for entry in &studio.entries {
                        let entry_height = entry.height.max(0.0);
                        studio_entries.push(ElementBox::new(entry_top, entry_height));
                        entry_top += entry_height;
                    }
                }
            }

            sections.push((section.id.clone(), ElementBox::new(top, height)));
            top += height;
        }

        Self {
            sections,
            studio_entries,
            content_height: top,
        }
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<ElementBox> {
        self.sections
            .iter()
            .find(|(section_id, _)| section_id == id)
            .map(|(_, element)| *element)
    }

    /// Sections in page order.
    pub fn sections(&self) -> impl Iterator<Item = (&SectionId, &ElementBox)> {
        self.sections.iter().map(|(id, element)| (id, element))
    }

    /// Boxes of the studio entries, in the same order as the content.
    #[must_use]
    pub fn studio_entries(&self) -> &[ElementBox] {
        &self.studio_entries
    }

    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.content_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn content(source: &str) -> Content {
        Content::from_toml_str(source).expect("valid content")
    }

    #[test]
    fn sections_stack_in_order() {
        let layout = PageLayout::from_content(&content(
            r#"
            [[sections]]
            id = "hero"
            height = 700.0
            [[sections]]
            id = "about"
            height = 300.0
            "#,
        ));

        assert_eq!(layout.section("hero"), Some(ElementBox::new(0.0, 700.0)));
        assert_eq!(layout.section("about"), Some(ElementBox::new(700.0, 300.0)));
        assert_abs_diff_eq!(layout.content_height(), 1000.0);
        assert!(layout.section("missing").is_none());
    }

    #[test]
    fn studio_entries_sit_below_intro() {
        let layout = PageLayout::from_content(&content(
            r#"
            [[sections]]
            id = "hero"
            height = 500.0
            [[sections]]
            id = "studio"
            height = 100.0

            [studio]
            intro_height = 50.0
            entries = [
                { title = "a", height = 400.0 },
                { kind = "archive", height = 300.0 },
            ]
            "#,
        ));

        let entries = layout.studio_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ElementBox::new(550.0, 400.0));
        assert_eq!(entries[1], ElementBox::new(950.0, 300.0));
        // Declared height grows to fit the entries.
        assert_eq!(layout.section("studio"), Some(ElementBox::new(500.0, 750.0)));
    }

    #[test]
    fn empty_content_has_zero_height() {
        let layout = PageLayout::from_content(&Content::default());
        assert_abs_diff_eq!(layout.content_height(), 0.0);
        assert!(layout.studio_entries().is_empty());
    }
}
