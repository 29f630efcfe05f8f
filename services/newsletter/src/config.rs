/// Newsletter service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct NewsletterConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3117). Env var: `NEWSLETTER_PORT`.
    pub newsletter_port: u16,
    /// Shared secret required in `x-api-key` on trigger endpoints.
    pub trigger_api_key: String,
    /// API key for the transactional-email provider.
    pub resend_api_key: String,
    /// Base URL of the email provider API (default `https://api.resend.com`).
    pub resend_api_url: String,
    /// Sender address for outgoing newsletters.
    pub from_email: String,
    /// Base URL of the content collector service. Pre-fetch is disabled
    /// when unset.
    pub collector_url: Option<String>,
    /// How many recent items to render per topic (default 5).
    pub content_items_per_topic: u32,
    /// Timeout applied to every outbound HTTP call, in seconds (default 10).
    pub http_timeout_secs: u64,
}

impl NewsletterConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            newsletter_port: std::env::var("NEWSLETTER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3117),
            trigger_api_key: std::env::var("TRIGGER_API_KEY").expect("TRIGGER_API_KEY"),
            resend_api_key: std::env::var("RESEND_API_KEY").expect("RESEND_API_KEY"),
            resend_api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_owned()),
            from_email: std::env::var("FROM_EMAIL").expect("FROM_EMAIL"),
            collector_url: std::env::var("COLLECTOR_URL").ok(),
            content_items_per_topic: std::env::var("CONTENT_ITEMS_PER_TOPIC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
