// SPDX-License-Identifier: MPL-2.0
//! Contact message delivery through an ordered chain of transports.
//!
//! Each [`Transport`] either delivers a [`Submission`] or fails; the
//! [`ContactChain`] tries them in order and stops at the first success.
//! A failure only ever advances the chain; no transport is retried.

mod email_relay;
mod mailto;
mod relay;

pub use email_relay::EmailRelay;
pub use mailto::MailtoHandoff;
pub use relay::FormRelay;

use crate::config::ContactConfig;
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Which transport delivered a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    FormRelay,
    EmailRelay,
    Mailto,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::FormRelay => write!(f, "form relay"),
            TransportKind::EmailRelay => write!(f, "email relay"),
            TransportKind::Mailto => write!(f, "mail client"),
        }
    }
}

/// Successful delivery report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub via: TransportKind,
}

/// Transport failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// The transport is missing credentials and was skipped.
    NotConfigured,
    /// Request could not be sent or timed out.
    Network(String),
    /// The service answered with a non-success HTTP status.
    Http(u16),
    /// The service answered but did not confirm delivery.
    Rejected(String),
    /// Response body could not be understood.
    InvalidResponse(String),
    /// The mail client could not be launched.
    Launch(String),
    /// Every transport in the chain failed.
    AllFailed,
}

impl ContactError {
    /// Message key shown to the user for this failure.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ContactError::NotConfigured => "contact-error-not-configured",
            ContactError::Network(_) => "contact-error-network",
            ContactError::Http(_) | ContactError::Rejected(_) => "contact-error-rejected",
            ContactError::InvalidResponse(_) => "contact-error-invalid-response",
            ContactError::Launch(_) => "contact-error-launch",
            ContactError::AllFailed => "contact-status-failed",
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::NotConfigured => write!(f, "Transport not configured"),
            ContactError::Network(msg) => write!(f, "Network error: {msg}"),
            ContactError::Http(status) => write!(f, "HTTP status: {status}"),
            ContactError::Rejected(msg) => write!(f, "Delivery rejected: {msg}"),
            ContactError::InvalidResponse(msg) => write!(f, "Invalid response: {msg}"),
            ContactError::Launch(msg) => write!(f, "Could not open mail client: {msg}"),
            ContactError::AllFailed => write!(f, "All transports failed"),
        }
    }
}

impl std::error::Error for ContactError {}

impl From<reqwest::Error> for ContactError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ContactError::Http(status.as_u16()),
            None => ContactError::Network(err.to_string()),
        }
    }
}

/// The form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Submission {
    /// Builds a submission, trimming fields.
    ///
    /// `default_subject` is used when the subject is blank.
    pub fn new(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
        default_subject: impl FnOnce(&str) -> String,
    ) -> Self {
        let name = name.trim().to_string();
        let subject = match subject.trim() {
            "" => default_subject(&name),
            given => given.to_string(),
        };
        Self {
            email: email.trim().to_string(),
            subject,
            message: message.trim().to_string(),
            name,
        }
    }

    /// Name, email and message are all required.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.email.contains('@') && !self.message.is_empty()
    }
}

/// A way of getting a message to the portfolio owner.
pub trait Transport: Send + Sync {
    fn kind(&self) -> TransportKind;

    fn deliver<'a>(&'a self, submission: &'a Submission)
        -> BoxFuture<'a, Result<Delivery, ContactError>>;
}

/// Ordered fallback chain.
#[derive(Clone, Default)]
pub struct ContactChain {
    transports: Vec<Arc<dyn Transport>>,
}

impl fmt::Debug for ContactChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transports.iter().map(|t| t.kind()))
            .finish()
    }
}

impl ContactChain {
    #[must_use]
    pub fn new(transports: Vec<Arc<dyn Transport>>) -> Self {
        Self { transports }
    }

    /// Form relay, then the email relay when configured, then the mail client.
    #[must_use]
    pub fn from_config(config: &ContactConfig) -> Self {
        let mut transports: Vec<Arc<dyn Transport>> = Vec::with_capacity(3);
        transports.push(Arc::new(FormRelay::new(
            config.endpoint.clone(),
            config.access_key.clone(),
        )));
        if let Some(relay) = &config.email_relay {
            transports.push(Arc::new(EmailRelay::new(relay.clone())));
        }
        transports.push(Arc::new(MailtoHandoff::new(config.recipient.clone())));
        Self::new(transports)
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<TransportKind> {
        self.transports.iter().map(|t| t.kind()).collect()
    }

    /// Tries each transport in order until one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::AllFailed`] when no transport delivered.
    pub async fn send(&self, submission: &Submission) -> Result<Delivery, ContactError> {
        for transport in &self.transports {
            match transport.deliver(submission).await {
                Ok(delivery) => {
                    log::info!("Contact message delivered via {}", delivery.via);
                    return Ok(delivery);
                }
                Err(err) => {
                    log::debug!("{} failed: {err}", transport.kind());
                }
            }
        }
        log::warn!("Contact message could not be delivered");
        Err(ContactError::AllFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fake {
        kind: TransportKind,
        outcome: Result<(), ContactError>,
        calls: Arc<AtomicUsize>,
    }

    impl Fake {
        fn new(
            kind: TransportKind,
            outcome: Result<(), ContactError>,
        ) -> (Arc<dyn Transport>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let fake: Arc<dyn Transport> = Arc::new(Self {
                kind,
                outcome,
                calls: Arc::clone(&calls),
            });
            (fake, calls)
        }
    }

    impl Transport for Fake {
        fn kind(&self) -> TransportKind {
            self.kind
        }

        fn deliver<'a>(
            &'a self,
            _submission: &'a Submission,
        ) -> BoxFuture<'a, Result<Delivery, ContactError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.outcome.clone().map(|()| Delivery { via: self.kind })
            })
        }
    }

    fn submission() -> Submission {
        Submission::new("Ada", "ada@example.com", "", "Hello", |name| {
            format!("New message from {name}")
        })
    }

    #[test]
    fn blank_subject_uses_default() {
        let s = submission();
        assert_eq!(s.subject, "New message from Ada");
        assert!(s.is_complete());
    }

    #[test]
    fn incomplete_submission_detected() {
        let s = Submission::new(" ", "nope", "", "", |_| String::new());
        assert!(!s.is_complete());
    }

    #[tokio::test]
    async fn primary_success_skips_fallbacks() {
        let (primary, primary_calls) = Fake::new(TransportKind::FormRelay, Ok(()));
        let (mailto, mailto_calls) = Fake::new(TransportKind::Mailto, Ok(()));
        let chain = ContactChain::new(vec![primary, mailto]);

        let delivery = chain.send(&submission()).await.expect("delivered");
        assert_eq!(delivery.via, TransportKind::FormRelay);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(mailto_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn primary_failure_falls_back_to_mailto() {
        let (primary, _) = Fake::new(
            TransportKind::FormRelay,
            Err(ContactError::Network("unreachable".into())),
        );
        let (mailto, mailto_calls) = Fake::new(TransportKind::Mailto, Ok(()));
        let chain = ContactChain::new(vec![primary, mailto]);

        let delivery = chain.send(&submission()).await.expect("delivered");
        assert_eq!(delivery.via, TransportKind::Mailto);
        assert_eq!(mailto_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn secondary_failure_is_swallowed() {
        let (primary, _) = Fake::new(TransportKind::FormRelay, Err(ContactError::Http(500)));
        let (secondary, secondary_calls) = Fake::new(
            TransportKind::EmailRelay,
            Err(ContactError::Rejected("quota".into())),
        );
        let (mailto, _) = Fake::new(TransportKind::Mailto, Ok(()));
        let chain = ContactChain::new(vec![primary, secondary, mailto]);

        let delivery = chain.send(&submission()).await.expect("delivered");
        assert_eq!(delivery.via, TransportKind::Mailto);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_chain_fails() {
        let chain = ContactChain::default();
        assert_eq!(
            chain.send(&submission()).await,
            Err(ContactError::AllFailed)
        );
    }

    #[test]
    fn chain_from_config_orders_transports() {
        let mut config = ContactConfig::default();
        assert_eq!(
            ContactChain::from_config(&config).kinds(),
            vec![TransportKind::FormRelay, TransportKind::Mailto]
        );

        config.email_relay = Some(crate::config::EmailRelayConfig {
            endpoint: "https://relay.invalid".into(),
            service_id: "s".into(),
            template_id: "t".into(),
            public_key: "k".into(),
        });
        assert_eq!(
            ContactChain::from_config(&config).kinds(),
            vec![
                TransportKind::FormRelay,
                TransportKind::EmailRelay,
                TransportKind::Mailto
            ]
        );
    }

    #[test]
    fn errors_map_to_keys() {
        assert_eq!(ContactError::Http(500).i18n_key(), "contact-error-rejected");
        assert_eq!(ContactError::AllFailed.i18n_key(), "contact-status-failed");
    }
}
