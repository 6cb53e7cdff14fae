// SPDX-License-Identifier: MPL-2.0
//! Contact form: field state, submit lifecycle and status line.
//!
//! Delivery itself lives in [`crate::contact`]; this component only emits
//! [`Event::Send`] and waits for [`Message::Finished`].

use crate::config::defaults::FORM_STATUS_CLEAR_SECS;
use crate::contact::{ContactError, Delivery, Submission, TransportKind};
use crate::domain::Deadline;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Text};
use iced::{Element, Length};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    EmailChanged(String),
    SubjectChanged(String),
    MessageChanged(String),
    Submit,
    Finished(Result<Delivery, ContactError>),
}

#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// Start the delivery chain.
    Send(Submission),
    /// Celebrate: chime and confetti.
    Delivered(Delivery),
    Failed(ContactError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Sent,
    /// Handed to the visitor's mail client.
    HandedOff,
    Failed,
    Incomplete,
}

impl Status {
    fn i18n_key(self) -> &'static str {
        match self {
            Status::Sent => "contact-status-success",
            Status::HandedOff => "contact-status-handoff",
            Status::Failed => "contact-status-failed",
            Status::Incomplete => "contact-status-incomplete",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    intro: String,
    recipient: String,
    sending: bool,
    status: Option<Status>,
    clear_status: Deadline,
}

impl ContactForm {
    /// `recipient` is quoted in the failure message.
    #[must_use]
    pub fn new(intro: String, recipient: String) -> Self {
        Self {
            intro,
            recipient,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    fn set_status(&mut self, status: Status, now: Instant) {
        self.status = Some(status);
        self.clear_status
            .arm(now, Duration::from_secs(FORM_STATUS_CLEAR_SECS));
    }

    fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject.clear();
        self.message.clear();
    }

    pub fn update(&mut self, message: Message, now: Instant, i18n: &I18n) -> Event {
        match message {
            Message::NameChanged(value) => self.name = value,
            Message::EmailChanged(value) => self.email = value,
            Message::SubjectChanged(value) => self.subject = value,
            Message::MessageChanged(value) => self.message = value,
            Message::Submit => {
                if self.sending {
                    return Event::None;
                }
                let submission = Submission::new(
                    &self.name,
                    &self.email,
                    &self.subject,
                    &self.message,
                    |name| i18n.tr_with_args("contact-default-subject", &[("name", name)]),
                );
                if !submission.is_complete() {
                    self.set_status(Status::Incomplete, now);
                    return Event::None;
                }
                self.sending = true;
                self.status = None;
                self.clear_status.disarm();
                return Event::Send(submission);
            }
            Message::Finished(result) => {
                self.sending = false;
                return match result {
                    Ok(delivery) => {
                        self.reset_fields();
                        let status = if delivery.via == TransportKind::Mailto {
                            Status::HandedOff
                        } else {
                            Status::Sent
                        };
                        self.set_status(status, now);
                        Event::Delivered(delivery)
                    }
                    Err(err) => {
                        log::warn!("Contact form failed: {err}");
                        self.set_status(Status::Failed, now);
                        Event::Failed(err)
                    }
                };
            }
        }
        Event::None
    }

    pub fn tick(&mut self, now: Instant) {
        if self.clear_status.fire(now) {
            self.status = None;
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.clear_status.is_armed()
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let field = |placeholder: String, value: &'a str, on_input: fn(String) -> Message| {
            let input = text_input(&placeholder, value)
                .padding(spacing::SM)
                .size(typography::BODY_LG);
            if self.sending {
                input
            } else {
                input.on_input(on_input)
            }
        };

        let submit_label = if self.sending {
            i18n.tr("contact-sending")
        } else {
            i18n.tr("contact-send")
        };
        let mut submit = button(Text::new(submit_label)).style(styles::button::primary);
        if !self.sending {
            submit = submit.on_press(Message::Submit);
        }

        let mut form = Column::new()
            .spacing(spacing::SM)
            .max_width(560.0)
            .width(Length::Fill);
        if !self.intro.is_empty() {
            form = form.push(Text::new(self.intro.as_str()).size(typography::BODY_LG));
        }
        form = form
            .push(field(i18n.tr("contact-name"), &self.name, Message::NameChanged))
            .push(field(i18n.tr("contact-email"), &self.email, Message::EmailChanged))
            .push(field(i18n.tr("contact-subject"), &self.subject, Message::SubjectChanged))
            .push(field(i18n.tr("contact-message"), &self.message, Message::MessageChanged))
            .push(submit);

        if let Some(status) = self.status {
            let text = if status == Status::Failed {
                i18n.tr_with_args(status.i18n_key(), &[("email", &self.recipient)])
            } else {
                i18n.tr(status.i18n_key())
            };
            let color = match status {
                Status::Sent | Status::HandedOff => palette::SUCCESS_500,
                Status::Failed | Status::Incomplete => palette::ERROR_500,
            };
            form = form.push(Text::new(text).size(typography::BODY).color(color));
        }

        form.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn english() -> I18n {
        I18n::new(Some("en-US".into()), &Config::default())
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::new(String::new(), "me@example.com".into());
        form.name = "Ada".into();
        form.email = "ada@example.com".into();
        form.message = "Hello there".into();
        form
    }

    #[test]
    fn submit_emits_submission_and_locks_form() {
        let i18n = english();
        let mut form = filled();
        let now = Instant::now();

        match form.update(Message::Submit, now, &i18n) {
            Event::Send(submission) => {
                assert_eq!(submission.name, "Ada");
                assert_eq!(submission.subject, "New message from Ada");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(form.is_sending());
        assert!(matches!(form.update(Message::Submit, now, &i18n), Event::None));
    }

    #[test]
    fn success_resets_fields_and_clears_status_later() {
        let i18n = english();
        let mut form = filled();
        let t0 = Instant::now();
        form.update(Message::Submit, t0, &i18n);

        let delivered = form.update(
            Message::Finished(Ok(Delivery {
                via: TransportKind::FormRelay,
            })),
            t0,
            &i18n,
        );
        assert!(matches!(delivered, Event::Delivered(_)));
        assert!(!form.is_sending());
        assert!(form.name.is_empty() && form.message.is_empty());
        assert_eq!(form.status(), Some(Status::Sent));

        form.tick(t0 + Duration::from_secs(4));
        assert_eq!(form.status(), Some(Status::Sent));
        form.tick(t0 + Duration::from_secs(FORM_STATUS_CLEAR_SECS));
        assert_eq!(form.status(), None);
    }

    #[test]
    fn mail_client_handoff_has_its_own_status() {
        let i18n = english();
        let mut form = filled();
        let now = Instant::now();
        form.update(Message::Submit, now, &i18n);
        form.update(
            Message::Finished(Ok(Delivery {
                via: TransportKind::Mailto,
            })),
            now,
            &i18n,
        );
        assert_eq!(form.status(), Some(Status::HandedOff));
    }

    #[test]
    fn failure_keeps_fields_and_unlocks() {
        let i18n = english();
        let mut form = filled();
        let now = Instant::now();
        form.update(Message::Submit, now, &i18n);
        let failed = form.update(
            Message::Finished(Err(ContactError::AllFailed)),
            now,
            &i18n,
        );
        assert!(matches!(failed, Event::Failed(ContactError::AllFailed)));
        assert!(!form.is_sending());
        assert_eq!(form.name, "Ada");
        assert_eq!(form.status(), Some(Status::Failed));
    }

    #[test]
    fn incomplete_form_is_not_sent() {
        let i18n = english();
        let mut form = ContactForm::new(String::new(), "me@example.com".into());
        form.name = "Ada".into();
        assert!(matches!(
            form.update(Message::Submit, Instant::now(), &i18n),
            Event::None
        ));
        assert!(!form.is_sending());
        assert_eq!(form.status(), Some(Status::Incomplete));
    }
}
