use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Newsletter service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum NewsletterError {
    #[error("delivery not found")]
    DeliveryNotFound,
    #[error("delivery is not pending")]
    DeliveryNotPending,
    #[error("delivery is not due yet")]
    DeliveryNotDue,
    #[error("delivery has no rendered content")]
    ContentMissing,
    #[error("no subscriber email for delivery owner")]
    SubscriberNotFound,
    #[error("mail transport rejected the send: {0}")]
    MailRejected(String),
    #[error("mail transport timed out; delivery left pending")]
    MailTimeout,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl NewsletterError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeliveryNotFound => "DELIVERY_NOT_FOUND",
            Self::DeliveryNotPending => "DELIVERY_NOT_PENDING",
            Self::DeliveryNotDue => "DELIVERY_NOT_DUE",
            Self::ContentMissing => "CONTENT_MISSING",
            Self::SubscriberNotFound => "SUBSCRIBER_NOT_FOUND",
            Self::MailRejected(_) => "MAIL_REJECTED",
            Self::MailTimeout => "MAIL_TIMEOUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for NewsletterError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DeliveryNotFound => StatusCode::NOT_FOUND,
            Self::DeliveryNotPending | Self::DeliveryNotDue | Self::ContentMissing => {
                StatusCode::CONFLICT
            }
            Self::SubscriberNotFound
            | Self::MailRejected(_)
            | Self::MailTimeout
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            match &self {
                Self::Internal(e) => tracing::error!(error = %e, kind = self.kind(), "internal error"),
                other => tracing::error!(kind = other.kind(), "collaborator failure: {other}"),
            }
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
