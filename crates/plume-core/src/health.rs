use axum::http::StatusCode;

/// `GET /healthz` — process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — ready to take traffic. Services that need a real
/// readiness probe (database reachable, migrations applied) register
/// their own handler instead.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_report_liveness() {
        assert_eq!(healthz().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_report_readiness() {
        assert_eq!(readyz().await, StatusCode::OK);
    }
}
