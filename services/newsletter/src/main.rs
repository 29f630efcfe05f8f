use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use plume_core::auth::TriggerSecret;
use plume_core::tracing::init_tracing;
use plume_newsletter::config::NewsletterConfig;
use plume_newsletter::infra::collector::HttpContentCollector;
use plume_newsletter::infra::mailer::ResendMailer;
use plume_newsletter::router::build_router;
use plume_newsletter::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = NewsletterConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .expect("failed to build http client");

    let state = AppState {
        db,
        trigger_secret: TriggerSecret(config.trigger_api_key),
        mailer: ResendMailer {
            http: http.clone(),
            api_url: config.resend_api_url,
            api_key: config.resend_api_key,
            from_email: config.from_email,
        },
        collector: HttpContentCollector {
            http,
            base_url: config.collector_url,
        },
        items_per_topic: config.content_items_per_topic,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.newsletter_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("newsletter service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
