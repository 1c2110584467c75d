use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;

use siteerp_inventory::{AddProductInput, HistoryWindow, ProductFilter, RecordMovementInput};

use crate::app::{SharedStore, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products).post(add_product))
        .route("/products/:sku/history", get(product_history))
        .route("/stats", get(stock_stats))
        .route("/alerts", get(stock_alerts))
        .route("/scan", post(scan))
        .route("/export", get(export))
}

pub async fn list_products(
    Extension(store): Extension<SharedStore>,
    Query(q): Query<dto::ProductQuery>,
) -> axum::response::Response {
    let filter = match ProductFilter::parse(&q.search, &q.status, &q.project) {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };

    let products = store.ledger().filter(&filter);
    (
        StatusCode::OK,
        Json(json!({
            "count": products.len(),
            "products": products,
        })),
    )
        .into_response()
}

pub async fn add_product(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<AddProductInput>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let cmd = match body.parse() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };

    match store.add_product(cmd) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn scan(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<RecordMovementInput>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let cmd = match body.parse() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let mut store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };

    match store.apply_movement(cmd) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "message": outcome.summary(),
                "product": outcome.product,
                "movement": outcome.movement,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn product_history(
    Extension(store): Extension<SharedStore>,
    Path(sku): Path<String>,
    Query(q): Query<dto::HistoryQuery>,
) -> axum::response::Response {
    let window = if q.window.trim().is_empty() {
        HistoryWindow::Week
    } else {
        match q.window.parse::<HistoryWindow>() {
            Ok(w) => w,
            Err(e) => return errors::domain_error_to_response(e),
        }
    };
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };

    let product = match store.ledger().find_by_sku(&sku) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let movements = store.ledger().query_history(product.sku(), window, Utc::now());
    (
        StatusCode::OK,
        Json(json!({
            "sku": product.sku(),
            "window_days": window.days(),
            "count": movements.len(),
            "movements": movements,
        })),
    )
        .into_response()
}

pub async fn stock_stats(Extension(store): Extension<SharedStore>) -> axum::response::Response {
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    (StatusCode::OK, Json(store.ledger().stats())).into_response()
}

pub async fn stock_alerts(Extension(store): Extension<SharedStore>) -> axum::response::Response {
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    let alerts = store.ledger().alerts();
    (
        StatusCode::OK,
        Json(json!({
            "count": alerts.len(),
            "products": alerts,
        })),
    )
        .into_response()
}

pub async fn export(Extension(store): Extension<SharedStore>) -> axum::response::Response {
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    (StatusCode::OK, Json(store.inventory_export())).into_response()
}
