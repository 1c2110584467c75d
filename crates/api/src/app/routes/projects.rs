use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use siteerp_core::ProjectId;
use siteerp_projects::NewProject;

use crate::app::{SharedStore, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", get(get_project))
        .route("/:id/progress", post(set_progress))
}

fn parse_id(raw: &str) -> Result<ProjectId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

pub async fn list_projects(
    Extension(store): Extension<SharedStore>,
    Query(q): Query<dto::ProjectQuery>,
) -> axum::response::Response {
    let filter = match q.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };

    let projects: Vec<_> = store
        .projects()
        .filter(&filter)
        .into_iter()
        .map(|p| {
            json!({
                "project": p,
                "budget_used_percent": p.budget_used_percent(),
            })
        })
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "count": projects.len(),
            "projects": projects,
        })),
    )
        .into_response()
}

pub async fn create_project(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.create_project(body) {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_project(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.project_overview(&id) {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_progress(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProgressRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let progress = match body.percent() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.set_project_progress(&id, progress) {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
