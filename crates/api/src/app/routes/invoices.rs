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
use siteerp_invoicing::{InvoiceId, InvoiceStatus, NewInvoice};

use crate::app::{SharedStore, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/mark-overdue", post(mark_overdue))
        .route("/:id/status", post(change_status))
}

pub async fn list_invoices(
    Extension(store): Extension<SharedStore>,
    Query(q): Query<dto::InvoiceQuery>,
) -> axum::response::Response {
    let filter = match q.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    let invoices = store.invoices().filter(&filter);
    (
        StatusCode::OK,
        Json(json!({
            "count": invoices.len(),
            "stats": store.invoices().stats(),
            "invoices": invoices,
        })),
    )
        .into_response()
}

pub async fn create_invoice(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<NewInvoice>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    match store.create_invoice(body, Utc::now().date_naive()) {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
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
    match store.change_invoice_status(&id, status) {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn mark_overdue(Extension(store): Extension<SharedStore>) -> axum::response::Response {
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    let changed = store.mark_overdue_invoices(Utc::now().date_naive());
    (StatusCode::OK, Json(json!({ "changed": changed }))).into_response()
}

fn parse_target(id: &str, status: &str) -> DomainResult<(InvoiceId, InvoiceStatus)> {
    Ok((id.parse()?, status.parse()?))
}
