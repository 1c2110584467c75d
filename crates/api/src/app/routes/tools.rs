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
use siteerp_infra::SiteStore;
use siteerp_tools::{AddTool, CheckOut, Tool, ToolId};

use crate::app::{SharedStore, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_tools).post(add_tool))
        .route("/scan", post(scan_tool))
        .route("/:id/toggle", post(toggle))
        .route("/:id/check-out", post(check_out))
        .route("/:id/check-in", post(check_in))
}

pub async fn list_tools(
    Extension(store): Extension<SharedStore>,
    Query(q): Query<dto::ToolQuery>,
) -> axum::response::Response {
    let filter = match q.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    let tools = store.tools().filter(&filter);
    (
        StatusCode::OK,
        Json(json!({
            "count": tools.len(),
            "stats": store.tools().stats(),
            "tools": tools,
        })),
    )
        .into_response()
}

pub async fn add_tool(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<AddTool>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.add_tool(body, Utc::now().date_naive()) {
        Ok(tool) => (StatusCode::CREATED, Json(tool)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn scan_tool(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<dto::ScanToolRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.scan_tool(&body.code) {
        Ok(tool) => (StatusCode::OK, Json(tool)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Parse the path id, lock the store and run one tool operation.
fn with_tool<F>(store: &SharedStore, raw_id: &str, op: F) -> axum::response::Response
where
    F: FnOnce(&mut SiteStore, &ToolId) -> DomainResult<Tool>,
{
    let id: ToolId = match raw_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let mut store = match errors::lock(store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match op(&mut store, &id) {
        Ok(tool) => (StatusCode::OK, Json(tool)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn toggle(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> axum::response::Response {
    with_tool(&store, &id, |s, id| s.toggle_tool(id).cloned())
}

pub async fn check_out(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<CheckOut>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    with_tool(&store, &id, |s, id| s.check_out_tool(id, body).cloned())
}

pub async fn check_in(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> axum::response::Response {
    with_tool(&store, &id, |s, id| s.check_in_tool(id).cloned())
}
