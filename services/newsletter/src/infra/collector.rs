use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::ContentCollector;
use crate::error::NewsletterError;

/// HTTP client for the content collector service. When no collector is
/// configured the port degrades to a no-op and population relies on
/// whatever items are already in the store.
#[derive(Clone)]
pub struct HttpContentCollector {
    pub http: reqwest::Client,
    pub base_url: Option<String>,
}

#[derive(Serialize)]
struct CollectRequest<'a> {
    topic: &'a str,
}

#[derive(Deserialize)]
struct CollectResponse {
    item_ids: Vec<Uuid>,
}

impl ContentCollector for HttpContentCollector {
    async fn collect(&self, topic: &str) -> Result<Vec<Uuid>, NewsletterError> {
        let Some(base_url) = &self.base_url else {
            tracing::debug!(topic, "no collector configured, skipping pre-fetch");
            return Ok(vec![]);
        };

        let response = self
            .http
            .post(format!("{base_url}/collect"))
            .json(&CollectRequest { topic })
            .send()
            .await
            .context("call content collector")?
            .error_for_status()
            .context("content collector returned an error status")?;

        let body: CollectResponse = response
            .json()
            .await
            .context("decode content collector response")?;
        Ok(body.item_ids)
    }
}
