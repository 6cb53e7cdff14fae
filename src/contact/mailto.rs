// SPDX-License-Identifier: MPL-2.0
//! Last-resort transport: hand the message to the user's mail client.

use super::{ContactError, Delivery, Submission, Transport, TransportKind};
use futures_util::future::BoxFuture;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

type Opener = dyn Fn(&str) -> std::io::Result<()> + Send + Sync;

/// Opens a pre-filled `mailto:` link.
///
/// Always reports success: once the link is handed to the system the
/// message is in the user's hands.
pub struct MailtoHandoff {
    recipient: String,
    opener: Box<Opener>,
}

impl std::fmt::Debug for MailtoHandoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailtoHandoff")
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

impl MailtoHandoff {
    pub fn new(recipient: String) -> Self {
        Self::with_opener(recipient, |url| open::that_detached(url))
    }

    /// Uses `opener` instead of the system URL handler.
    pub fn with_opener(
        recipient: String,
        opener: impl Fn(&str) -> std::io::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            recipient,
            opener: Box::new(opener),
        }
    }

    /// Builds the `mailto:` URL for a submission.
    #[must_use]
    pub fn url(&self, submission: &Submission) -> String {
        let body = format!(
            "Name: {}\nEmail: {}\n\n{}",
            submission.name, submission.email, submission.message
        );
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            utf8_percent_encode(&submission.subject, NON_ALPHANUMERIC),
            utf8_percent_encode(&body, NON_ALPHANUMERIC),
        )
    }
}

impl Transport for MailtoHandoff {
    fn kind(&self) -> TransportKind {
        TransportKind::Mailto
    }

    fn deliver<'a>(
        &'a self,
        submission: &'a Submission,
    ) -> BoxFuture<'a, Result<Delivery, ContactError>> {
        Box::pin(async move {
            let url = self.url(submission);
            if let Err(err) = (self.opener)(&url) {
                log::warn!("{}", ContactError::Launch(err.to_string()));
            }
            Ok(Delivery {
                via: TransportKind::Mailto,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn submission() -> Submission {
        Submission {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Hello & welcome".into(),
            message: "Line one\nLine two".into(),
        }
    }

    #[test]
    fn url_is_percent_encoded() {
        let handoff = MailtoHandoff::with_opener("me@example.com".into(), |_| Ok(()));
        let url = handoff.url(&submission());
        assert!(url.starts_with("mailto:me@example.com?subject=Hello%20%26%20welcome&body="));
        assert!(url.contains("Ada%20Lovelace"));
        assert!(url.contains("%0A"));
        assert!(!url.contains(' '));
    }

    #[tokio::test]
    async fn opens_the_link() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&opened);
        let handoff = MailtoHandoff::with_opener("me@example.com".into(), move |url| {
            sink.lock().expect("lock").push(url.to_string());
            Ok(())
        });

        let delivery = handoff.deliver(&submission()).await;
        assert_eq!(delivery.map(|d| d.via), Ok(TransportKind::Mailto));
        assert_eq!(opened.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn launch_failure_still_succeeds() {
        let handoff = MailtoHandoff::with_opener("me@example.com".into(), |_| {
            Err(std::io::Error::other("no handler"))
        });
        assert!(handoff.deliver(&submission()).await.is_ok());
    }
}
