use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use plume_core::health::{healthz, readyz};
use plume_core::middleware::request_id_layer;

use crate::handlers::{
    content::ingest_content_items,
    deliveries::dispatch_delivery,
    scheduler::{populate_deliveries, run_scheduler},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Scheduler triggers (cron-invoked)
        .route("/scheduler/run", post(run_scheduler))
        .route("/scheduler/populate", post(populate_deliveries))
        // Deliveries
        .route("/deliveries/{id}/dispatch", post(dispatch_delivery))
        // Content ingestion
        .route("/content/items", post(ingest_content_items))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
