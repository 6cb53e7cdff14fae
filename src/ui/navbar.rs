// SPDX-License-Identifier: MPL-2.0
//! Navigation bar: one link per section and the theme toggle.
//!
//! The bar sits above the page scrollable with the scroll progress bar under
//! it. Link presses bubble up as [`Event::Navigate`]; the app decides whether
//! navigation is allowed (it is not while the image viewer is open).

use crate::content::{NavLink, SectionId};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::{
    alignment::Vertical,
    widget::{button, Container, Row, Space, Text},
    Element, Length,
};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub links: &'a [NavLink],
    pub theme_mode: ThemeMode,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    LinkPressed(SectionId),
    ToggleTheme,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Navigate(SectionId),
    ToggleTheme,
}

pub fn update(message: Message) -> Event {
    match message {
        Message::LinkPressed(target) => Event::Navigate(target),
        Message::ToggleTheme => Event::ToggleTheme,
    }
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut links = Row::new().spacing(spacing::XS).align_y(Vertical::Center);
    for link in ctx.links {
        links = links.push(
            button(Text::new(link.label.as_str()).size(typography::BODY))
                .on_press(Message::LinkPressed(link.target.clone()))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::button::nav_link),
        );
    }

    // Label names the theme the toggle switches to.
    let toggle_label = if ctx.theme_mode.is_dark() {
        ctx.i18n.tr("navbar-theme-light")
    } else {
        ctx.i18n.tr("navbar-theme-dark")
    };
    let toggle = button(Text::new(toggle_label).size(typography::CAPTION))
        .on_press(Message::ToggleTheme)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::pill);

    let row = Row::new()
        .spacing(spacing::SM)
        .padding([0.0, spacing::MD])
        .align_y(Vertical::Center)
        .push(links)
        .push(Space::new().width(Length::Fill))
        .push(toggle);

    Container::new(row)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::NAVBAR_HEIGHT))
        .center_y(Length::Fixed(sizing::NAVBAR_HEIGHT))
        .style(styles::container::navbar)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<NavLink> {
        vec![
            NavLink {
                label: "About".into(),
                target: "about".into(),
            },
            NavLink {
                label: "Contact".into(),
                target: "contact".into(),
            },
        ]
    }

    #[test]
    fn navbar_view_renders_in_both_themes() {
        let i18n = I18n::default();
        let links = links();
        for theme_mode in [ThemeMode::Light, ThemeMode::Dark] {
            let _element = view(ViewContext {
                i18n: &i18n,
                links: &links,
                theme_mode,
            });
        }
    }

    #[test]
    fn link_press_navigates_to_its_section() {
        assert_eq!(
            update(Message::LinkPressed("contact".into())),
            Event::Navigate("contact".into())
        );
        assert_eq!(update(Message::ToggleTheme), Event::ToggleTheme);
    }
}
