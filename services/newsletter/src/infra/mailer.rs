use serde::Serialize;

use crate::domain::repository::{MailSendError, MailTransport};

/// Resend-backed mail transport.
#[derive(Clone)]
pub struct ResendMailer {
    pub http: reqwest::Client,
    pub api_url: String,
    pub api_key: String,
    pub from_email: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl MailTransport for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailSendError> {
        let request = SendEmailRequest {
            from: format!("Newsletter <{}>", self.from_email),
            to: [to],
            subject,
            html,
        };

        let response = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    // The provider may have accepted the send; report
                    // the ambiguity instead of a definitive failure.
                    MailSendError::Timeout
                } else {
                    MailSendError::Rejected(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailSendError::Rejected(format!(
                "provider returned {status}: {body}"
            )));
        }
        Ok(())
    }
}
