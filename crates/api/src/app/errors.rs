use std::sync::MutexGuard;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use siteerp_core::DomainError;
use siteerp_infra::SiteStore;

use crate::app::SharedStore;

pub fn domain_error_to_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::InvariantViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Unwrap a JSON request body. A malformed or mistyped body is reported in
/// the same `{"error", "message"}` shape as domain errors, keeping axum's
/// status (400 for bad syntax, 415 for a missing content type, 422 otherwise).
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(value)| value)
        .map_err(|rejection| json_error(rejection.status(), "invalid_body", rejection.body_text()))
}

/// Take the store lock. A poisoned lock means a handler panicked mid-update;
/// report it instead of propagating the panic.
pub fn lock(store: &SharedStore) -> Result<MutexGuard<'_, SiteStore>, Response> {
    store.lock().map_err(|_| {
        error!("site store lock poisoned");
        json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_unavailable",
            "site store is unavailable",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::not_found("product x"), StatusCode::NOT_FOUND),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("bad id"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("twice"), StatusCode::CONFLICT),
            (DomainError::invariant("overflow"), StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }

    #[tokio::test]
    async fn rejected_body_keeps_the_error_shape() {
        let req = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"progress":"#))
            .unwrap();
        let body = <Json<serde_json::Value> as axum::extract::FromRequest<()>>::from_request(req, &())
            .await;
        let res = json_body(body).unwrap_err();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"], "invalid_body");
        assert!(value["message"].as_str().is_some());
    }

    #[test]
    fn poisoned_lock_is_a_500() {
        let store: SharedStore = std::sync::Arc::new(std::sync::Mutex::new(SiteStore::new()));
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        let res = lock(&store).unwrap_err();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
