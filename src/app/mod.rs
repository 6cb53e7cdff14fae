// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the page components.
//!
//! The `App` struct owns the content, the components built from it and the
//! shared services (localization, theme, delivery chain, toasts). It turns
//! top-level messages into component updates through [`update`] and renders
//! the page through [`view`].

pub mod bootstrap;
mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;
pub mod update;
mod view;

pub use message::{Flags, Message};

use crate::audio::ChimePlayer;
use crate::config::{self, defaults};
use crate::contact::ContactChain;
use crate::content::Content;
use crate::domain::{Deadline, PageLayout, Viewport};
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::{ThemeMode, ThemeSwitcher};
use bootstrap::{Capabilities, Components};
use iced::{window, Element, Subscription, Task, Theme};
use persisted_state::AppState;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use update::UpdateContext;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    content: Content,
    components: Components,
    /// Last known position of the page scrollable.
    viewport: Viewport,
    theme: ThemeSwitcher,
    /// Persisted application state (theme flag).
    app_state: AppState,
    contact_chain: ContactChain,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    /// Re-runs the scroll observers once resizing stops.
    resize_settle: Deadline,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("sections", &self.content.sections.len())
            .field("initialized", &self.components.initialized)
            .field("theme", &self.theme.mode())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(defaults::WINDOW_WIDTH, defaults::WINDOW_HEIGHT),
        min_size: Some(iced::Size::new(
            defaults::MIN_WINDOW_WIDTH,
            defaults::MIN_WINDOW_HEIGHT,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads settings, content and persisted state, then builds every component.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let content_path = flags
            .content_path
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config.content.path.clone());
        let (content, content_warning) = Content::load(content_path.as_deref());

        let (app_state, state_warning) = AppState::load();
        let theme = ThemeSwitcher::init(&app_state, None, ThemeMode::from_system);

        let chime = if config.chime_enabled() {
            match ChimePlayer::new(config.chime_volume()) {
                Ok(player) => Some(player),
                Err(err) => {
                    log::debug!("Chime disabled: {err}");
                    None
                }
            }
        } else {
            None
        };

        let now = Instant::now();
        let layout = PageLayout::from_content(&content);
        let viewport = Viewport::new(
            0.0,
            (defaults::WINDOW_HEIGHT - update::chrome_height()).max(0.0),
            layout.content_height(),
        );
        let components = bootstrap::run(
            &content,
            Capabilities {
                layout,
                audio: chime,
                started_at: now,
                contact_recipient: config.contact.recipient.clone(),
            },
        );
        log::info!(
            "Page ready: {} sections, {} components",
            content.sections.len(),
            components.initialized.len()
        );

        let mut app = App {
            i18n,
            content,
            components,
            viewport,
            theme,
            app_state,
            contact_chain: ContactChain::from_config(&config.contact),
            notifications: notifications::Manager::new(),
            resize_settle: Deadline::default(),
        };

        for key in [config_warning, content_warning, state_warning]
            .into_iter()
            .flatten()
        {
            app.notifications.push(Notification::warning(key), now);
        }

        update::observe_viewport(&mut app.update_context(), now);
        (app, Task::none())
    }

    fn update_context(&mut self) -> UpdateContext<'_> {
        UpdateContext {
            i18n: &self.i18n,
            components: &mut self.components,
            viewport: &mut self.viewport,
            theme: &mut self.theme,
            app_state: &mut self.app_state,
            contact_chain: &self.contact_chain,
            notifications: &mut self.notifications,
            resize_settle: &mut self.resize_settle,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme.mode().iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let animating = update::is_animating(&self.components, &self.viewport, Instant::now());
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(
                animating,
                self.notifications.has_notifications(),
            ),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();
        let mut ctx = self.update_context();

        match message {
            Message::Scrolled(page) => update::handle_scrolled(&mut ctx, page, now),
            Message::WindowResized(size) => update::handle_resized(&mut ctx, size, now),
            Message::Tick(instant) => update::handle_tick(&mut ctx, instant),
            Message::Navigate(target) => update::handle_navigation(&mut ctx, &target, false, now),
            Message::EscapePressed => update::handle_escape(&mut ctx),
            Message::PagePressed => update::handle_page_pressed(&mut ctx),
            Message::Navbar(message) => update::handle_navbar_message(&mut ctx, message, now),
            Message::Studio(message) => update::handle_studio_message(&mut ctx, message),
            Message::Gallery(message) => update::handle_gallery_message(&mut ctx, message, now),
            Message::Modal(message) => update::handle_modal_message(&mut ctx, message),
            Message::Dialogue(message) => update::handle_dialogue_message(&mut ctx, message),
            Message::Contact(message) => update::handle_contact_message(&mut ctx, message, now),
            Message::Camera(message) => update::handle_camera_message(&mut ctx, message, now),
            Message::Garden(message) => update::handle_garden_message(&mut ctx, message, now),
            Message::BrowserCard(message) => update::handle_browser_card_message(&mut ctx, message),
            Message::Certificates(message) => {
                update::handle_certificates_message(&mut ctx, message, now)
            }
            Message::Book(message) => update::handle_book_message(&mut ctx, message, now),
            Message::Accordion(group, message) => {
                update::handle_accordion_message(&mut ctx, group, message, now)
            }
            Message::Ipod(message) => update::handle_ipod_message(&mut ctx, message),
            Message::Notification(message) => {
                ctx.notifications.handle_message(&message, now);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            content: &self.content,
            components: &self.components,
            viewport: &self.viewport,
            theme_mode: self.theme.mode(),
            notifications: &self.notifications,
            now: Instant::now(),
        })
    }
}
