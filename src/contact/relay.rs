// SPDX-License-Identifier: MPL-2.0
//! Primary transport: a hosted form-relay endpoint keyed by an access token.

use super::{ContactError, Delivery, Submission, Transport, TransportKind};
use crate::config::defaults::CONTACT_REQUEST_TIMEOUT_SECS;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    access_key: &'a str,
    name: &'a str,
    email: &'a str,
    message: &'a str,
    subject: &'a str,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// POSTs the form as JSON and trusts the `success` flag of the reply.
#[derive(Debug, Clone)]
pub struct FormRelay {
    endpoint: String,
    access_key: Option<String>,
    client: reqwest::Client,
}

impl FormRelay {
    pub fn new(endpoint: String, access_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CONTACT_REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("IcedFolio/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                log::warn!("Falling back to default HTTP client: {err}");
                reqwest::Client::new()
            });
        Self {
            endpoint,
            access_key: access_key.filter(|key| !key.trim().is_empty()),
            client,
        }
    }

    async fn post(&self, submission: &Submission) -> Result<Delivery, ContactError> {
        let access_key = self
            .access_key
            .as_deref()
            .ok_or(ContactError::NotConfigured)?;

        let body = RelayRequest {
            access_key,
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
            subject: &submission.subject,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        interpret(status.as_u16(), &text)
    }
}

/// Delivery is confirmed only by `"success": true`, whatever the status.
fn interpret(status: u16, body: &str) -> Result<Delivery, ContactError> {
    match serde_json::from_str::<RelayResponse>(body) {
        Ok(reply) if reply.success => Ok(Delivery {
            via: TransportKind::FormRelay,
        }),
        Ok(reply) => Err(ContactError::Rejected(
            reply.message.unwrap_or_else(|| format!("status {status}")),
        )),
        Err(_) if !(200..300).contains(&status) => Err(ContactError::Http(status)),
        Err(err) => Err(ContactError::InvalidResponse(err.to_string())),
    }
}

impl Transport for FormRelay {
    fn kind(&self) -> TransportKind {
        TransportKind::FormRelay
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

    #[test]
    fn success_flag_confirms_delivery() {
        let delivery = interpret(200, r#"{"success": true, "message": "Email sent"}"#);
        assert_eq!(
            delivery,
            Ok(Delivery {
                via: TransportKind::FormRelay
            })
        );
    }

    #[test]
    fn false_flag_is_rejected_with_message() {
        assert_eq!(
            interpret(200, r#"{"success": false, "message": "Invalid key"}"#),
            Err(ContactError::Rejected("Invalid key".into()))
        );
    }

    #[test]
    fn error_page_maps_to_status() {
        assert_eq!(
            interpret(502, "<html>Bad gateway</html>"),
            Err(ContactError::Http(502))
        );
    }

    #[test]
    fn unparsable_ok_body_is_invalid() {
        assert!(matches!(
            interpret(200, "not json"),
            Err(ContactError::InvalidResponse(_))
        ));
    }

    #[test]
    fn request_body_has_expected_fields() {
        let body = RelayRequest {
            access_key: "key",
            name: "Ada",
            email: "ada@example.com",
            message: "Hi",
            subject: "Hello",
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["access_key"], "key");
        assert_eq!(json["subject"], "Hello");
        assert_eq!(json.as_object().map(|o| o.len()), Some(5));
    }

    #[tokio::test]
    async fn missing_access_key_skips_relay() {
        let relay = FormRelay::new("http://127.0.0.1:9".into(), Some("  ".into()));
        let result = relay.deliver(&Submission::default()).await;
        assert_eq!(result, Err(ContactError::NotConfigured));
    }
}
