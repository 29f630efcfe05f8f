//! HTTP surface checks: health endpoints and trigger-key rejection.
//!
//! These run against a disconnected database handle; only routes that
//! never reach the database are exercised.

use axum_test::TestServer;
use sea_orm::DatabaseConnection;

use plume_core::auth::TriggerSecret;
use plume_newsletter::infra::collector::HttpContentCollector;
use plume_newsletter::infra::mailer::ResendMailer;
use plume_newsletter::router::build_router;
use plume_newsletter::state::AppState;

fn test_server() -> TestServer {
    let http = reqwest::Client::new();
    let state = AppState {
        db: DatabaseConnection::default(),
        trigger_secret: TriggerSecret("cron-secret".to_owned()),
        mailer: ResendMailer {
            http: http.clone(),
            api_url: "http://localhost:0".to_owned(),
            api_key: "test".to_owned(),
            from_email: "newsletter@example.com".to_owned(),
        },
        collector: HttpContentCollector {
            http,
            base_url: None,
        },
        items_per_topic: 5,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_health_probes() {
    let server = test_server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_reject_trigger_endpoints_without_api_key() {
    let server = test_server();
    server.post("/scheduler/run").await.assert_status_unauthorized();
    server
        .post("/scheduler/populate")
        .await
        .assert_status_unauthorized();
    server
        .post("/content/items")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn should_reject_trigger_endpoints_with_wrong_api_key() {
    let server = test_server();
    server
        .post("/scheduler/run")
        .add_header("x-api-key", "not-the-secret")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn should_reject_dispatch_without_api_key() {
    let server = test_server();
    server
        .post(&format!(
            "/deliveries/{}/dispatch",
            uuid::Uuid::new_v4()
        ))
        .await
        .assert_status_unauthorized();
}
