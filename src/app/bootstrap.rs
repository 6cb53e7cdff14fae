// SPDX-License-Identifier: MPL-2.0
//! Builds every page component exactly once, in a fixed order.
//!
//! Everything the components depend on at startup is passed in through
//! [`Capabilities`]: the page layout, the optional chime output and the
//! startup instant that anchors the hero entrance. Nothing is awaited, so
//! startup cannot stall.
//!
//! Each initializer sees only its own content block. A missing block leaves
//! the component out and logs a `skipped` line at debug level.

use crate::audio::ChimePlayer;
use crate::content::{Content, SectionId};
use crate::domain::PageLayout;
use crate::ui::accordion::Accordion;
use crate::ui::book::Book;
use crate::ui::certificates::Certificates;
use crate::ui::contact_form::ContactForm;
use crate::ui::dialogue::Dialogue;
use crate::ui::effects::{Ambient, BrowserCard, Camera, Confetti, Counters, Fireflies, Garden};
use crate::ui::gallery::Gallery;
use crate::ui::hero::{FirstInteraction, Hero};
use crate::ui::ipod::Ipod;
use crate::ui::modal::Modal;
use crate::ui::reveal::Reveal;
use crate::ui::router::Router;
use crate::ui::studio::Studio;
use std::fmt;
use std::time::Instant;

/// Startup dependencies handed to the initializers.
pub struct Capabilities {
    pub layout: PageLayout,
    pub audio: Option<ChimePlayer>,
    pub started_at: Instant,
    /// Address named in the contact form's failure message.
    pub contact_recipient: String,
}

/// One step of the startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    Hero,
    Progress,
    Reveal,
    Studio,
    Modal,
    Dialogue,
    Theme,
    Gallery,
    Contact,
    Router,
    Counters,
    Particles,
    Camera,
    Garden,
    BrowserCard,
    Certificates,
    Book,
    Chapters,
    CaseStudies,
    Ipod,
}

/// Order in which the initializers run.
pub const INIT_ORDER: [Initializer; 20] = [
    Initializer::Hero,
    Initializer::Progress,
    Initializer::Reveal,
    Initializer::Studio,
    Initializer::Modal,
    Initializer::Dialogue,
    Initializer::Theme,
    Initializer::Gallery,
    Initializer::Contact,
    Initializer::Router,
    Initializer::Counters,
    Initializer::Particles,
    Initializer::Camera,
    Initializer::Garden,
    Initializer::BrowserCard,
    Initializer::Certificates,
    Initializer::Book,
    Initializer::Chapters,
    Initializer::CaseStudies,
    Initializer::Ipod,
];

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Initializer::Hero => "hero",
            Initializer::Progress => "progress",
            Initializer::Reveal => "reveal",
            Initializer::Studio => "studio",
            Initializer::Modal => "modal",
            Initializer::Dialogue => "dialogue",
            Initializer::Theme => "theme",
            Initializer::Gallery => "gallery",
            Initializer::Contact => "contact",
            Initializer::Router => "router",
            Initializer::Counters => "counters",
            Initializer::Particles => "particles",
            Initializer::Camera => "camera",
            Initializer::Garden => "garden",
            Initializer::BrowserCard => "browser card",
            Initializer::Certificates => "certificates",
            Initializer::Book => "book",
            Initializer::Chapters => "chapters",
            Initializer::CaseStudies => "case studies",
            Initializer::Ipod => "ipod",
        };
        f.write_str(name)
    }
}

/// Every component of the page. Absent content leaves a field `None`.
#[derive(Debug)]
pub struct Components {
    pub layout: PageLayout,
    pub chime: Option<ChimePlayer>,
    pub first_interaction: FirstInteraction,

    pub hero: Option<Hero>,
    /// Scroll progress bar under the navbar.
    pub progress: bool,
    pub reveal: Option<Reveal>,
    pub studio: Option<Studio>,
    pub modal: Modal,
    pub dialogue: Option<Dialogue>,
    pub gallery: Option<Gallery>,
    pub contact: Option<ContactForm>,
    pub router: Router,
    pub counters: Option<Counters>,
    pub ambient: Option<Ambient>,
    pub fireflies: Option<Fireflies>,
    /// Section the fireflies drift in.
    pub footer: Option<SectionId>,
    pub confetti: Confetti,
    pub camera: Option<Camera>,
    pub garden: Option<Garden>,
    pub browser_card: Option<BrowserCard>,
    pub certificates: Option<Certificates>,
    pub book: Option<Book>,
    pub chapters: Option<Accordion>,
    pub case_studies: Option<Accordion>,
    pub ipod: Option<Ipod>,

    /// Initializers that built something, in the order they ran.
    pub initialized: Vec<Initializer>,
}

impl Components {
    fn empty(capabilities: Capabilities) -> Self {
        Self {
            layout: capabilities.layout,
            chime: capabilities.audio,
            first_interaction: FirstInteraction::default(),
            hero: None,
            progress: false,
            reveal: None,
            studio: None,
            modal: Modal::new(),
            dialogue: None,
            gallery: None,
            contact: None,
            router: Router::new(),
            counters: None,
            ambient: None,
            fireflies: None,
            footer: None,
            confetti: Confetti::new(),
            camera: None,
            garden: None,
            browser_card: None,
            certificates: None,
            book: None,
            chapters: None,
            case_studies: None,
            ipod: None,
            initialized: Vec::with_capacity(INIT_ORDER.len()),
        }
    }

    /// Plays the acknowledgement chime when audio is available.
    pub fn chime(&self) {
        if let Some(player) = &self.chime {
            player.play();
        }
    }
}

/// Runs every initializer in [`INIT_ORDER`].
#[must_use]
pub fn run(content: &Content, capabilities: Capabilities) -> Components {
    let started_at = capabilities.started_at;
    let recipient = capabilities.contact_recipient.clone();
    let mut components = Components::empty(capabilities);

    for step in INIT_ORDER {
        let built = initialize(step, content, &mut components, started_at, &recipient);
        if built {
            log::debug!("Initialized {step}");
            components.initialized.push(step);
        } else {
            log::debug!("Initializer {step} skipped");
        }
    }

    components
}

fn initialize(
    step: Initializer,
    content: &Content,
    c: &mut Components,
    started_at: Instant,
    recipient: &str,
) -> bool {
    fn keep<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
        *slot = value;
        slot.is_some()
    }

    let layout = &c.layout;
    match step {
        Initializer::Hero => keep(
            &mut c.hero,
            content.hero.clone().map(|hero| Hero::new(hero, started_at)),
        ),
        Initializer::Progress => {
            c.progress = layout.content_height() > 0.0;
            c.progress
        }
        Initializer::Reveal => keep(&mut c.reveal, Reveal::new(content, layout)),
        Initializer::Studio => keep(&mut c.studio, Studio::new(content, layout)),
        // Needs no content; built with the component set.
        Initializer::Modal | Initializer::Router => true,
        Initializer::Dialogue => keep(&mut c.dialogue, Dialogue::new(content, layout)),
        // Resolved before the window opens so the first frame has the right theme.
        Initializer::Theme => true,
        Initializer::Gallery => keep(&mut c.gallery, Gallery::new(content, layout)),
        Initializer::Contact => keep(
            &mut c.contact,
            content
                .contact
                .as_ref()
                .map(|block| ContactForm::new(block.intro.clone(), recipient.to_string())),
        ),
        Initializer::Counters => keep(&mut c.counters, Counters::new(content)),
        Initializer::Particles => {
            c.ambient = content
                .hero
                .as_ref()
                .filter(|hero| hero.particles > 0)
                .map(|hero| Ambient::new(hero.particles));
            c.footer = content
                .sections
                .iter()
                .find(|section| section.footer)
                .map(|section| section.id.clone());
            c.fireflies = c.footer.is_some().then(Fireflies::new);
            c.ambient.is_some() || c.fireflies.is_some()
        }
        Initializer::Camera => keep(&mut c.camera, Camera::new(content)),
        Initializer::Garden => keep(&mut c.garden, Garden::new(content)),
        Initializer::BrowserCard => keep(&mut c.browser_card, BrowserCard::new(content)),
        Initializer::Certificates => keep(&mut c.certificates, Certificates::new(content)),
        Initializer::Book => keep(&mut c.book, Book::new(content)),
        Initializer::Chapters => keep(&mut c.chapters, Accordion::chapters(content)),
        Initializer::CaseStudies => keep(&mut c.case_studies, Accordion::case_studies(content)),
        Initializer::Ipod => keep(&mut c.ipod, Ipod::new(content)),
    }
}
