//! Shared-secret trigger authorization extractor.
//!
//! Scheduler endpoints are invoked by external cron, not by end users;
//! they authorize with a static `x-api-key` header compared against
//! the service's configured trigger secret.

use axum::extract::{FromRef, FromRequestParts};
use http::StatusCode;
use http::request::Parts;

/// The expected trigger secret, provided by service state via `FromRef`.
#[derive(Debug, Clone)]
pub struct TriggerSecret(pub String);

/// Extractor that rejects requests whose `x-api-key` header does not
/// match the configured [`TriggerSecret`]. Returns 401 on absence or
/// mismatch.
#[derive(Debug, Clone, Copy)]
pub struct TriggerKey;

impl<S> FromRequestParts<S> for TriggerKey
where
    S: Send + Sync,
    TriggerSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let expected = TriggerSecret::from_ref(state);
        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        async move {
            match provided {
                Some(key) if key == expected.0 => Ok(Self),
                _ => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use http::Request;

    #[derive(Clone)]
    struct TestState {
        secret: TriggerSecret,
    }

    impl FromRef<TestState> for TriggerSecret {
        fn from_ref(state: &TestState) -> Self {
            state.secret.clone()
        }
    }

    async fn extract_key(header: Option<&str>) -> Result<TriggerKey, StatusCode> {
        let state = TestState {
            secret: TriggerSecret("cron-secret".to_owned()),
        };
        let mut builder = Request::builder().method("POST").uri("/scheduler/run");
        if let Some(value) = header {
            builder = builder.header("x-api-key", value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _body) = request.into_parts();
        TriggerKey::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn should_accept_matching_key() {
        assert!(extract_key(Some("cron-secret")).await.is_ok());
    }

    #[tokio::test]
    async fn should_reject_missing_key() {
        assert_eq!(extract_key(None).await.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_reject_wrong_key() {
        assert_eq!(
            extract_key(Some("wrong")).await.unwrap_err(),
            StatusCode::UNAUTHORIZED
        );
    }
}
