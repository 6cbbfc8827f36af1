//! Wrapped transactional mailer.
//!
//! Raw SMTP delivery is out of scope; the application talks to a mail-API
//! service over HTTP the same way it talks to every other external service.
//! The `Mailer` trait keeps the transport swappable and gives the tests a
//! recording double.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// Password-reset mail carrying the single-use token link.
    pub fn password_reset(to: impl Into<String>, app_url: &str, token: &str) -> Self {
        Self {
            to: to.into(),
            subject: "Password reset requested".to_string(),
            body: format!(
                "A password reset was requested for your account.\n\n\
                 Use the link below within one hour to choose a new password:\n\
                 {app_url}/password-reset/confirm/{token}\n\n\
                 If you did not request this, you can ignore this message."
            ),
        }
    }

    /// Email-change confirmation mail sent to the new address.
    pub fn email_change_confirmation(to: impl Into<String>, app_url: &str, token: &str) -> Self {
        Self {
            to: to.into(),
            subject: "Confirm your new email address".to_string(),
            body: format!(
                "A change of your account email address to this address was requested.\n\n\
                 Confirm within one hour using the link below:\n\
                 {app_url}/confirm-email-address-change/{token}\n\n\
                 If you did not request this, you can ignore this message."
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), AppError>;
}

/// Production mailer posting to an HTTP mail API.
pub struct HttpApiMailer {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
    from: String,
}

#[derive(Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpApiMailer {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    async fn send(&self, message: MailMessage) -> Result<(), AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&SendMailRequest {
                from: &self.from,
                to: &message.to,
                subject: &message.subject,
                text: &message.body,
            })
            .send()
            .await?;

        if let Err(err) = response.error_for_status_ref() {
            tracing::error!("Mail API rejected message to {}: {}", message.to, err);
            return Err(err.into());
        }

        tracing::debug!("Sent mail to {}: {}", message.to, message.subject);
        Ok(())
    }
}

/// Test double collecting every message instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
