use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::{SharedStore, errors};

pub async fn summary(Extension(store): Extension<SharedStore>) -> axum::response::Response {
    let store = match errors::lock(&store) {
        Ok(s) => s,
        Err(res) => return res,
    };
    (StatusCode::OK, Json(store.dashboard())).into_response()
}
