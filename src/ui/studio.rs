// SPDX-License-Identifier: MPL-2.0
//! Scroll-linked phone preview for the studio case studies.
//!
//! A floating phone frame shows the screenshot of whichever project entry
//! currently owns the middle of the viewport. Scroll bands drive it:
//!
//! - the whole studio section (`top 40%` .. `bottom bottom`) shows the first
//!   project on entry and hides the phone when scrolled back above it;
//! - each project entry (`top 55%` .. `bottom 45%`) activates itself;
//! - the archive sentinel (`top 75%` .. `bottom top`) hides the phone, and
//!   scrolling back above it brings back the last real project.
//!
//! Switching projects cross-fades the screenshot: fade out and shrink, swap
//! the source, fade back in. The accent colour changes immediately.

use crate::content::{AccentColor, Content, EntryKind, StudioEntry};
use crate::domain::{Anchor, Edge, EffectState, ElementBox, PageLayout, ScrollTrigger, Timeline,
    TriggerEvent, Viewport};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, opacity, palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, Column, Container, Space, Text};
use iced::{Background, Border, Color, Element, Length, Shadow, Theme, Vector};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const FADE_OUT: Duration = Duration::from_millis(200);
pub const SWAP: Duration = Duration::from_millis(50);
pub const FADE_IN: Duration = Duration::from_millis(300);
/// Delay between the phone starting to fade and being removed.
pub const HIDE_DELAY: Duration = Duration::from_millis(200);

/// Screenshot scale at the bottom of the fade.
const SHRUNK_SCALE: f32 = 0.9;

const CONTAINER_BAND: (Anchor, Anchor) =
    (Anchor::new(Edge::Top, 0.4), Anchor::new(Edge::Bottom, 1.0));
const PROJECT_BAND: (Anchor, Anchor) =
    (Anchor::new(Edge::Top, 0.55), Anchor::new(Edge::Bottom, 0.45));
const ARCHIVE_BAND: (Anchor, Anchor) =
    (Anchor::new(Edge::Top, 0.75), Anchor::new(Edge::Bottom, 0.0));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Out,
    Swap,
    In,
}

/// Visibility of the phone preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Hidden,
    Showing { project: usize },
    /// Fading out; becomes `Hidden` after [`HIDE_DELAY`].
    Hiding { project: usize, since: Instant },
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenImage(usize),
}

#[derive(Debug, Clone)]
pub enum Event {
    None,
    OpenImage {
        title: String,
        image: Option<PathBuf>,
        color: Option<AccentColor>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Container,
    Entry(usize),
}

#[derive(Debug, Clone)]
struct Band {
    source: Source,
    element: ElementBox,
    trigger: ScrollTrigger,
}

/// What the phone frame should draw at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Entry whose screenshot is on screen.
    pub entry: usize,
    pub image_opacity: f32,
    pub image_scale: f32,
    /// Opacity of the whole phone.
    pub frame_opacity: f32,
    pub accent: Option<AccentColor>,
}

#[derive(Debug, Clone)]
pub struct Studio {
    entries: Vec<StudioEntry>,
    bands: Vec<Band>,
    preview: Preview,
    fade: Timeline<Fade>,
    /// Screenshot shown before the current fade swaps it.
    outgoing: Option<usize>,
    accent: Option<AccentColor>,
    last_offset: Option<f32>,
}

impl Studio {
    /// `None` without a studio block, its section, or any real project.
    #[must_use]
    pub fn new(content: &Content, layout: &PageLayout) -> Option<Self> {
        let studio = content.studio.as_ref()?;
        let section = layout.section(&studio.section)?;
        if !studio.entries.iter().any(StudioEntry::is_project) {
            return None;
        }

        let mut bands = vec![Band {
            source: Source::Container,
            element: section,
            trigger: ScrollTrigger::new(CONTAINER_BAND.0, CONTAINER_BAND.1),
        }];

        for (index, (entry, element)) in studio
            .entries
            .iter()
            .zip(layout.studio_entries())
            .enumerate()
        {
            let band = match entry.kind {
                EntryKind::Project => PROJECT_BAND,
                EntryKind::Archive => ARCHIVE_BAND,
                EntryKind::Spacer => continue,
            };
            bands.push(Band {
                source: Source::Entry(index),
                element: *element,
                trigger: ScrollTrigger::new(band.0, band.1),
            });
        }

        Some(Self {
            entries: studio.entries.clone(),
            bands,
            preview: Preview::Hidden,
            fade: Timeline::new(vec![(Fade::Out, FADE_OUT), (Fade::Swap, SWAP), (Fade::In, FADE_IN)]),
            outgoing: None,
            accent: None,
            last_offset: None,
        })
    }

    #[must_use]
    pub fn preview(&self) -> Preview {
        self.preview
    }

    /// The project currently shown, ignoring one that is fading away.
    #[must_use]
    pub fn active_project(&self) -> Option<usize> {
        match self.preview {
            Preview::Showing { project } => Some(project),
            _ => None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[StudioEntry] {
        &self.entries
    }

    /// Generation of the cross-fade; bumps on every project switch.
    #[must_use]
    pub fn fade_generation(&self) -> u64 {
        self.fade.generation()
    }

    /// Feeds a new scroll position through every band.
    ///
    /// Events fire in the order their band edges were crossed, so a fast
    /// jump replays the same sequence a slow scroll would.
    pub fn on_scroll(&mut self, viewport: &Viewport, now: Instant) {
        let scrolling_up = self
            .last_offset
            .is_some_and(|last| viewport.offset_y < last);
        self.last_offset = Some(viewport.offset_y);

        let mut fired: Vec<(f32, Source, TriggerEvent)> = Vec::new();
        for band in &mut self.bands {
            let (start, end) = band.trigger.band(&band.element, viewport.height);
            for event in band.trigger.update(&band.element, viewport) {
                let at = match event {
                    TriggerEvent::Enter | TriggerEvent::LeaveBack => start,
                    TriggerEvent::Leave | TriggerEvent::EnterBack => end,
                };
                fired.push((at, band.source, event));
            }
        }

        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        if scrolling_up {
            fired.reverse();
        }

        for (_, source, event) in fired {
            self.apply(source, event, now);
        }
    }

    fn apply(&mut self, source: Source, event: TriggerEvent, now: Instant) {
        match (source, event) {
            (Source::Container, TriggerEvent::Enter) => {
                if let Some(first) = self.entries.iter().position(StudioEntry::is_project) {
                    self.activate(first, now);
                }
            }
            (Source::Container, TriggerEvent::LeaveBack) => self.hide(now),
            (Source::Entry(index), event) if self.entries[index].kind == EntryKind::Archive => {
                match event {
                    TriggerEvent::Enter => self.hide(now),
                    TriggerEvent::LeaveBack => {
                        if let Some(previous) = self.entries[..index]
                            .iter()
                            .rposition(StudioEntry::is_project)
                        {
                            self.activate(previous, now);
                        }
                    }
                    _ => {}
                }
            }
            (Source::Entry(index), TriggerEvent::Enter | TriggerEvent::EnterBack) => {
                self.activate(index, now);
            }
            (Source::Entry(index), TriggerEvent::Leave) => {
                let next_is_archive = self
                    .entries
                    .get(index + 1)
                    .is_some_and(|next| next.kind == EntryKind::Archive);
                if next_is_archive {
                    self.hide(now);
                }
            }
            _ => {}
        }
    }

    fn activate(&mut self, project: usize, now: Instant) {
        match self.preview {
            Preview::Showing { project: shown } if shown == project => return,
            Preview::Hiding { project: shown, .. } if shown == project => {
                self.preview = Preview::Showing { project };
                return;
            }
            Preview::Showing { project: shown } | Preview::Hiding { project: shown, .. } => {
                self.outgoing = Some(shown);
            }
            Preview::Hidden => {}
        }

        log::trace!("Studio preview -> entry {project}");
        self.preview = Preview::Showing { project };
        self.accent = self.entries[project].accent();
        self.fade.trigger(now);
    }

    fn hide(&mut self, now: Instant) {
        if let Preview::Showing { project } = self.preview {
            self.preview = Preview::Hiding {
                project,
                since: now,
            };
        }
    }

    /// Completes a pending hide.
    pub fn tick(&mut self, now: Instant) {
        if let Preview::Hiding { project, since } = self.preview {
            if now.saturating_duration_since(since) >= HIDE_DELAY {
                self.preview = Preview::Hidden;
                self.outgoing = Some(project);
                self.fade.cancel();
            }
        }
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        matches!(self.preview, Preview::Hiding { .. }) || self.fade.is_running(now)
    }

    /// Phone frame contents at `now`; `None` while hidden.
    #[must_use]
    pub fn frame(&self, now: Instant) -> Option<Frame> {
        let (project, frame_opacity) = match self.preview {
            Preview::Hidden => return None,
            Preview::Showing { project } => (project, 1.0),
            Preview::Hiding { project, since } => (
                project,
                1.0 - now.saturating_duration_since(since).as_secs_f32()
                    / HIDE_DELAY.as_secs_f32(),
            ),
        };

        let (entry, image_opacity, image_scale) = match self.fade.state(now) {
            EffectState::Transitioning {
                phase: Fade::Out,
                progress,
            } => match self.outgoing {
                Some(outgoing) => (
                    outgoing,
                    1.0 - progress,
                    1.0 - (1.0 - SHRUNK_SCALE) * progress,
                ),
                None => (project, 0.0, SHRUNK_SCALE),
            },
            EffectState::Transitioning {
                phase: Fade::Swap, ..
            } => (project, 0.0, SHRUNK_SCALE),
            EffectState::Transitioning {
                phase: Fade::In,
                progress,
            } => (
                project,
                progress,
                SHRUNK_SCALE + (1.0 - SHRUNK_SCALE) * progress,
            ),
            EffectState::Idle | EffectState::Settled => (project, 1.0, 1.0),
        };

        Some(Frame {
            entry,
            image_opacity,
            image_scale,
            frame_opacity: frame_opacity.clamp(0.0, 1.0),
            accent: self.accent,
        })
    }

    pub fn update(&self, message: Message) -> Event {
        match message {
            Message::OpenImage(index) => match self.entries.get(index) {
                Some(entry) => Event::OpenImage {
                    title: entry.title.clone(),
                    image: entry.image.clone(),
                    color: entry.accent(),
                },
                None => Event::None,
            },
        }
    }

    /// Case-study column; every entry takes exactly its laid-out height.
    pub fn view_entries<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let mut column = Column::new().width(Length::Fill);
        for (index, entry) in self.entries.iter().enumerate() {
            let height = Length::Fixed(entry.height.max(0.0));
            let body: Element<'a, Message> = match entry.kind {
                EntryKind::Spacer => Space::new().height(height).into(),
                EntryKind::Archive => Container::new(
                    Text::new(entry.title.as_str()).size(typography::TITLE_LG),
                )
                .padding(spacing::XL)
                .height(height)
                .into(),
                EntryKind::Project => {
                    let card = Column::new()
                        .spacing(spacing::SM)
                        .push(Text::new(entry.title.as_str()).size(typography::TITLE_MD))
                        .push(Text::new(entry.summary.as_str()).size(typography::BODY_LG))
                        .push(
                            button(Text::new(i18n.tr("studio-view-screenshot")))
                                .on_press(Message::OpenImage(index))
                                .style(styles::button::pill),
                        );
                    Container::new(card)
                        .padding(spacing::XL)
                        .max_width(560.0)
                        .height(height)
                        .into()
                }
            };
            column = column.push(body);
        }
        column.into()
    }

    /// The floating phone, or `None` while hidden.
    pub fn view_preview<'a>(&'a self, now: Instant) -> Option<Element<'a, Message>> {
        let frame = self.frame(now)?;
        let entry = self.entries.get(frame.entry)?;
        let accent = frame.accent.map_or(palette::SAGE_500, AccentColor::color);

        let screen_width = (sizing::PHONE_WIDTH - spacing::LG) * frame.image_scale;
        let screen_height = (sizing::PHONE_HEIGHT - spacing::LG) * frame.image_scale;
        let screen: Element<'a, Message> = match &entry.image {
            Some(path) => image(image::Handle::from_path(path))
                .width(Length::Fixed(screen_width))
                .height(Length::Fixed(screen_height))
                .opacity(frame.image_opacity * frame.frame_opacity)
                .into(),
            None => {
                let fill = entry.accent().map_or(palette::STONE_200, AccentColor::color);
                let alpha = frame.image_opacity * frame.frame_opacity;
                Container::new(
                    Text::new(entry.title.as_str())
                        .size(typography::TITLE_SM)
                        .color(Color { a: alpha, ..palette::PAPER }),
                )
                .center(Length::Fixed(screen_width))
                .height(Length::Fixed(screen_height))
                .style(move |_theme: &Theme| container::Style {
                    background: Some(Background::Color(Color { a: alpha, ..fill })),
                    border: Border {
                        radius: radius::LG.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .into()
            }
        };

        let frame_opacity = frame.frame_opacity;
        Some(
            Container::new(screen)
                .center_x(Length::Fixed(sizing::PHONE_WIDTH))
                .center_y(Length::Fixed(sizing::PHONE_HEIGHT))
                .style(move |_theme: &Theme| phone_style(accent, frame_opacity))
                .into(),
        )
    }
}

/// Accent border with a coloured ring and glow.
fn phone_style(accent: Color, alpha: f32) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color { a: alpha, ..palette::INK })),
        border: Border {
            color: Color { a: alpha, ..accent },
            width: border::WIDTH_LG,
            radius: radius::PHONE.into(),
        },
        shadow: Shadow {
            color: Color {
                a: opacity::OVERLAY_MEDIUM * alpha,
                ..accent
            },
            offset: Vector::new(0.0, 0.0),
            blur_radius: 80.0,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const VH: f32 = 1000.0;

    fn content() -> Content {
        Content::from_toml_str(
            r##"
            [[sections]]
            id = "hero"
            height = 1000

            [[sections]]
            id = "studio"
            height = 2100

            [[sections]]
            id = "footer"
            height = 1000

            [studio]
            intro_height = 0

            [[studio.entries]]
            title = "Seedling"
            color = "#6b8f71"
            height = 700

            [[studio.entries]]
            title = "Canopy"
            color = "#c9a96e"
            height = 700

            [[studio.entries]]
            kind = "archive"
            title = "Archive"
            height = 700
            "##,
        )
        .expect("valid content")
    }

    fn studio() -> Studio {
        let content = content();
        Studio::new(&content, &PageLayout::from_content(&content)).expect("studio")
    }

    fn at(offset: f32) -> Viewport {
        Viewport::new(offset, VH, 4100.0)
    }

    #[test]
    fn missing_block_or_projects_skips_component() {
        let content = Content::from_toml_str("[[sections]]\nid = \"studio\"\nheight = 10\n")
            .expect("valid content");
        assert!(Studio::new(&content, &PageLayout::from_content(&content)).is_none());
    }

    #[test]
    fn scrolling_down_walks_through_projects() {
        let mut studio = studio();
        let t0 = Instant::now();

        studio.on_scroll(&at(0.0), t0);
        assert_eq!(studio.preview(), Preview::Hidden);

        studio.on_scroll(&at(700.0), t0);
        assert_eq!(studio.active_project(), Some(0));

        let first_fade = studio.fade_generation();
        studio.on_scroll(&at(1300.0), t0);
        assert_eq!(studio.active_project(), Some(1));
        assert_ne!(studio.fade_generation(), first_fade);

        studio.on_scroll(&at(2000.0), t0);
        assert!(matches!(studio.preview(), Preview::Hiding { project: 1, .. }));
        assert_eq!(studio.active_project(), None);

        studio.tick(t0 + HIDE_DELAY);
        assert_eq!(studio.preview(), Preview::Hidden);
        assert!(studio.frame(t0 + HIDE_DELAY).is_none());
    }

    #[test]
    fn reactivating_shown_project_is_noop() {
        let mut studio = studio();
        let t0 = Instant::now();
        studio.on_scroll(&at(700.0), t0);
        let generation = studio.fade_generation();

        studio.on_scroll(&at(800.0), t0);
        studio.on_scroll(&at(700.0), t0);
        assert_eq!(studio.fade_generation(), generation);
        assert_eq!(studio.active_project(), Some(0));
    }

    #[test]
    fn scrolling_back_above_archive_restores_last_project() {
        let mut studio = studio();
        let t0 = Instant::now();
        studio.on_scroll(&at(700.0), t0);
        studio.on_scroll(&at(2000.0), t0);
        studio.tick(t0 + HIDE_DELAY);

        studio.on_scroll(&at(1300.0), t0 + HIDE_DELAY);
        assert_eq!(studio.active_project(), Some(1));
    }

    #[test]
    fn leaving_the_section_upwards_hides() {
        let mut studio = studio();
        let t0 = Instant::now();
        studio.on_scroll(&at(700.0), t0);
        studio.on_scroll(&at(0.0), t0);
        assert!(matches!(studio.preview(), Preview::Hiding { .. }));
    }

    #[test]
    fn single_jump_lands_on_the_right_project() {
        let mut studio = studio();
        let t0 = Instant::now();
        studio.on_scroll(&at(0.0), t0);
        studio.on_scroll(&at(1300.0), t0);
        assert_eq!(studio.active_project(), Some(1));
    }

    #[test]
    fn cross_fade_swaps_source_midway() {
        let mut studio = studio();
        let t0 = Instant::now();
        studio.on_scroll(&at(700.0), t0);

        let t1 = t0 + Duration::from_secs(1);
        studio.on_scroll(&at(1300.0), t1);

        let fading_out = studio.frame(t1 + Duration::from_millis(100)).expect("frame");
        assert_eq!(fading_out.entry, 0);
        assert_abs_diff_eq!(fading_out.image_opacity, 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(fading_out.image_scale, 0.95, epsilon = 1e-3);
        // The accent is already the new project's.
        assert_eq!(fading_out.accent, AccentColor::parse("#c9a96e"));

        let swapped = studio.frame(t1 + FADE_OUT + SWAP).expect("frame");
        assert_eq!(swapped.entry, 1);

        let settled = studio.frame(t1 + FADE_OUT + SWAP + FADE_IN).expect("frame");
        assert_abs_diff_eq!(settled.image_opacity, 1.0);
        assert_abs_diff_eq!(settled.image_scale, 1.0);
    }

    #[test]
    fn open_image_reports_entry() {
        let studio = studio();
        match studio.update(Message::OpenImage(1)) {
            Event::OpenImage { title, .. } => assert_eq!(title, "Canopy"),
            Event::None => panic!("expected an image"),
        }
        assert!(matches!(studio.update(Message::OpenImage(9)), Event::None));
    }
}
