use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use plume_core::auth::TriggerKey;

use crate::error::NewsletterError;
use crate::state::AppState;
use crate::usecase::dispatch::DispatchUseCase;

// ── POST /deliveries/{id}/dispatch ───────────────────────────────────────────

#[derive(Serialize)]
pub struct DispatchResponse {
    pub delivery_id: Uuid,
    /// Id of the spawned follow-up delivery, absent when a concurrent
    /// dispatch won or the next slot already existed.
    pub next_delivery_id: Option<Uuid>,
}

pub async fn dispatch_delivery(
    _key: TriggerKey,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DispatchResponse>, NewsletterError> {
    let uc = DispatchUseCase {
        deliveries: state.delivery_repo(),
        sections: state.section_repo(),
        subscribers: state.subscriber_repo(),
        mail: state.mailer(),
    };
    let receipt = uc.execute(id, Utc::now()).await?;
    Ok(Json(DispatchResponse {
        delivery_id: receipt.delivery_id,
        next_delivery_id: receipt.next_delivery_id,
    }))
}
