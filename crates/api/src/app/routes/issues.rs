use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;

use siteerp_core::DomainResult;
use siteerp_issues::{IssueId, IssueStatus, NewIssue};

use crate::app::{SharedStore, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_issues).post(report_issue))
        .route("/:id/status", post(change_status))
}

pub async fn list_issues(
    Extension(store): Extension<SharedStore>,
    Query(q): Query<dto::IssueQuery>,
) -> axum::response::Response {
    let filter = match q.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    let issues = store.issues().filter(&filter);
    (
        StatusCode::OK,
        Json(json!({
            "count": issues.len(),
            "stats": store.issues().stats(),
            "issues": issues,
        })),
    )
        .into_response()
}

pub async fn report_issue(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<NewIssue>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.report_issue(body, Utc::now()) {
        Ok(issue) => (StatusCode::CREATED, Json(issue)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn change_status(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<dto::StatusRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let (id, status) = match parse_target(&id, &body.status) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.change_issue_status(&id, status) {
        Ok(issue) => (StatusCode::OK, Json(issue)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn parse_target(id: &str, status: &str) -> DomainResult<(IssueId, IssueStatus)> {
    Ok((id.parse()?, status.parse()?))
}
