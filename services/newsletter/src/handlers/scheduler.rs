use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use plume_core::auth::TriggerKey;

use crate::error::NewsletterError;
use crate::state::AppState;
use crate::usecase::materialize::MaterializeUseCase;
use crate::usecase::populate::PopulateUseCase;

// ── POST /scheduler/run ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RunSchedulerResponse {
    pub created: u32,
    pub already_scheduled: u32,
    pub skipped: u32,
}

pub async fn run_scheduler(
    _key: TriggerKey,
    State(state): State<AppState>,
) -> Result<Json<RunSchedulerResponse>, NewsletterError> {
    let uc = MaterializeUseCase {
        sections: state.section_repo(),
        deliveries: state.delivery_repo(),
        collector: state.collector(),
    };
    let report = uc.execute(Utc::now()).await?;
    Ok(Json(RunSchedulerResponse {
        created: report.created,
        already_scheduled: report.already_scheduled,
        skipped: report.skipped,
    }))
}

// ── POST /scheduler/populate ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PopulateResponse {
    pub rendered: u32,
    pub deferred: u32,
    pub already_rendered: u32,
}

pub async fn populate_deliveries(
    _key: TriggerKey,
    State(state): State<AppState>,
) -> Result<Json<PopulateResponse>, NewsletterError> {
    let uc = PopulateUseCase {
        sections: state.section_repo(),
        deliveries: state.delivery_repo(),
        content: state.content_repo(),
        items_per_topic: state.items_per_topic,
    };
    let report = uc.execute_all().await?;
    Ok(Json(PopulateResponse {
        rendered: report.rendered,
        deferred: report.deferred,
        already_rendered: report.already_rendered,
    }))
}
