// SPDX-License-Identifier: MPL-2.0
//! Optional secondary transport: a templated email-relay API.
//!
//! Best effort only. Any failure is reported to the chain, which logs it
//! and moves on.

use super::{ContactError, Delivery, Submission, Transport, TransportKind};
use crate::config::defaults::CONTACT_REQUEST_TIMEOUT_SECS;
use crate::config::EmailRelayConfig;
use futures_util::future::BoxFuture;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Clone)]
pub struct EmailRelay {
    config: EmailRelayConfig,
    client: reqwest::Client,
}

impl EmailRelay {
    pub fn new(config: EmailRelayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CONTACT_REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    fn request<'a>(&'a self, submission: &'a Submission) -> EmailRequest<'a> {
        EmailRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: &submission.name,
                from_email: &submission.email,
                reply_to: &submission.email,
                subject: &submission.subject,
                message: &submission.message,
            },
        }
    }

    async fn post(&self, submission: &Submission) -> Result<Delivery, ContactError> {
        if self.config.service_id.is_empty() || self.config.public_key.is_empty() {
            return Err(ContactError::NotConfigured);
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request(submission))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(Delivery {
                via: TransportKind::EmailRelay,
            })
        } else {
            Err(ContactError::Http(status.as_u16()))
        }
    }
}

impl Transport for EmailRelay {
    fn kind(&self) -> TransportKind {
        TransportKind::EmailRelay
    }

    fn deliver<'a>(
        &'a self,
        submission: &'a Submission,
    ) -> BoxFuture<'a, Result<Delivery, ContactError>> {
        Box::pin(self.post(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay(service_id: &str) -> EmailRelay {
        EmailRelay::new(EmailRelayConfig {
            endpoint: "http://127.0.0.1:9".into(),
            service_id: service_id.into(),
            template_id: "template".into(),
            public_key: "public".into(),
        })
    }

    #[test]
    fn request_nests_template_params() {
        let relay = relay("service");
        let submission = Submission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        };
        let json = serde_json::to_value(relay.request(&submission)).expect("serialize");
        assert_eq!(json["user_id"], "public");
        assert_eq!(json["template_params"]["from_email"], "ada@example.com");
        assert_eq!(json["template_params"]["reply_to"], "ada@example.com");
    }

    #[tokio::test]
    async fn blank_credentials_are_not_configured() {
        let result = relay("").deliver(&Submission::default()).await;
        assert_eq!(result, Err(ContactError::NotConfigured));
    }
}
