// SPDX-License-Identifier: MPL-2.0
//! Single-open accordions for the journey chapters and website case studies.

use crate::content::{Content, SectionId};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, palette, radius, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, Column, Container, Row, Text};
use iced::{alignment, Border, Element, Length, Theme};

/// Which accordion a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Chapters,
    CaseStudies,
}

#[derive(Debug, Clone)]
pub enum Message {
    Toggle(usize),
    /// Open a case study's site.
    Visit(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// The open panel changed; carries the new one.
    Changed(Option<usize>),
    OpenUrl(String),
}

#[derive(Debug, Clone)]
pub struct PanelView {
    pub title: String,
    pub body: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Accordion {
    group: Group,
    section: SectionId,
    panels: Vec<PanelView>,
    open: Option<usize>,
}

impl Accordion {
    #[must_use]
    pub fn chapters(content: &Content) -> Option<Self> {
        let block = content.chapters.as_ref()?;
        let panels = block
            .panels
            .iter()
            .map(|panel| PanelView {
                title: panel.title.clone(),
                body: panel.body.clone(),
                url: None,
            })
            .collect();
        Self::from_panels(Group::Chapters, block.section.clone(), panels)
    }

    #[must_use]
    pub fn case_studies(content: &Content) -> Option<Self> {
        let block = content.case_studies.as_ref()?;
        let panels = block
            .panels
            .iter()
            .map(|study| PanelView {
                title: study.title.clone(),
                body: study.body.clone(),
                url: Some(study.url.clone()),
            })
            .collect();
        Self::from_panels(Group::CaseStudies, block.section.clone(), panels)
    }

    fn from_panels(group: Group, section: SectionId, panels: Vec<PanelView>) -> Option<Self> {
        if panels.is_empty() {
            return None;
        }
        Some(Self {
            group,
            section,
            panels,
            open: None,
        })
    }

    #[must_use]
    pub fn group(&self) -> Group {
        self.group
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn open_panel(&self) -> Option<usize> {
        self.open
    }

    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&PanelView> {
        self.panels.get(index)
    }

    /// Closes every panel, then opens `index` unless it was the open one.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.panels.len() {
            return;
        }
        let was_open = self.open == Some(index);
        self.open = None;
        if !was_open {
            self.open = Some(index);
        }
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Toggle(index) => {
                let before = self.open;
                self.toggle(index);
                if before == self.open {
                    Event::None
                } else {
                    Event::Changed(self.open)
                }
            }
            Message::Visit(index) => self
                .panels
                .get(index)
                .and_then(|panel| panel.url.clone())
                .map_or(Event::None, Event::OpenUrl),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let mut column = Column::new().spacing(spacing::XS).width(Length::Fill);
        for (index, panel) in self.panels.iter().enumerate() {
            let open = self.open == Some(index);
            let header = button(
                Row::new()
                    .align_y(alignment::Vertical::Center)
                    .push(
                        Text::new(panel.title.as_str())
                            .size(typography::TITLE_SM)
                            .width(Length::Fill),
                    )
                    .push(Text::new(if open { "−" } else { "+" }).size(typography::TITLE_SM)),
            )
            .width(Length::Fill)
            .padding(spacing::SM)
            .on_press(Message::Toggle(index))
            .style(styles::button::ghost);

            let mut item = Column::new().push(header);
            if open {
                let mut body = Column::new()
                    .spacing(spacing::SM)
                    .push(Text::new(panel.body.as_str()).size(typography::BODY));
                if panel.url.is_some() {
                    body = body.push(
                        button(Text::new(i18n.tr("case-study-visit")))
                            .on_press(Message::Visit(index))
                            .style(styles::button::pill),
                    );
                }
                item = item.push(Container::new(body).padding(spacing::SM));
            }

            column = column.push(Container::new(item).width(Length::Fill).style(
                move |theme: &Theme| container::Style {
                    border: Border {
                        color: if open { palette::SAGE_500 } else { palette::STONE_200 },
                        width: border::WIDTH_SM,
                        radius: radius::MD.into(),
                    },
                    ..styles::container::card(theme)
                },
            ));
        }
        column.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters() -> Accordion {
        let content = Content::from_toml_str(
            r#"
            [chapters]
            panels = [
                { title = "Seed", body = "Where it started." },
                { title = "Sprout", body = "First projects." },
                { title = "Bloom", body = "Today." },
            ]
            "#,
        )
        .expect("valid content");
        Accordion::chapters(&content).expect("chapters")
    }

    #[test]
    fn opening_another_panel_closes_the_first() {
        let mut accordion = chapters();
        accordion.toggle(0);
        assert_eq!(accordion.open_panel(), Some(0));
        accordion.toggle(2);
        assert_eq!(accordion.open_panel(), Some(2));
    }

    #[test]
    fn reclicking_open_panel_closes_it() {
        let mut accordion = chapters();
        assert_eq!(accordion.update(Message::Toggle(1)), Event::Changed(Some(1)));
        assert_eq!(accordion.update(Message::Toggle(1)), Event::Changed(None));
        assert_eq!(accordion.open_panel(), None);
    }

    #[test]
    fn out_of_range_toggle_is_ignored() {
        let mut accordion = chapters();
        accordion.toggle(1);
        assert_eq!(accordion.update(Message::Toggle(9)), Event::None);
        assert_eq!(accordion.open_panel(), Some(1));
    }

    #[test]
    fn groups_are_independent() {
        let content = Content::from_toml_str(
            r#"
            [chapters]
            panels = [{ title = "Seed" }, { title = "Sprout" }]

            [case_studies]
            panels = [{ title = "Florist", url = "https://florist.example" }]
            "#,
        )
        .expect("valid content");
        let mut chapters = Accordion::chapters(&content).expect("chapters");
        let mut studies = Accordion::case_studies(&content).expect("case studies");

        chapters.toggle(1);
        studies.toggle(0);
        assert_eq!(chapters.open_panel(), Some(1));
        assert_eq!(studies.open_panel(), Some(0));
        assert_eq!(studies.group(), Group::CaseStudies);
        assert_eq!(
            studies.update(Message::Visit(0)),
            Event::OpenUrl("https://florist.example".into())
        );
        assert_eq!(chapters.update(Message::Visit(0)), Event::None);
    }
}
