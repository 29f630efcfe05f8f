use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plume_core::auth::TriggerKey;

use crate::error::NewsletterError;
use crate::state::AppState;
use crate::usecase::ingest::{IngestContentUseCase, NewContentItem};

// ── POST /content/items ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ContentItemRequest {
    pub topic: String,
    pub title: String,
    pub url: String,
    pub source: Option<String>,
    pub published_date: DateTime<Utc>,
    #[serde(default)]
    pub body: String,
    pub summary: Option<String>,
}

#[derive(Serialize)]
pub struct IngestContentResponse {
    pub accepted: u32,
}

/// Ingest a batch of collected items. Idempotent on `url`:
/// re-submitting the same article refreshes its fields instead of
/// duplicating it.
pub async fn ingest_content_items(
    _key: TriggerKey,
    State(state): State<AppState>,
    Json(body): Json<Vec<ContentItemRequest>>,
) -> Result<Json<IngestContentResponse>, NewsletterError> {
    let items = body
        .into_iter()
        .map(|item| NewContentItem {
            topic: item.topic,
            title: item.title,
            url: item.url,
            source: item.source,
            published_date: item.published_date,
            body: item.body,
            summary: item.summary,
        })
        .collect();

    let uc = IngestContentUseCase {
        content: state.content_repo(),
    };
    let accepted = uc.execute(items, Utc::now()).await?;
    Ok(Json(IngestContentResponse { accepted }))
}
