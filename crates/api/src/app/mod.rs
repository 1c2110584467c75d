//! HTTP API application wiring (Axum router + shared store).
//!
//! - `routes/`: HTTP routes + handlers (one file per site area)
//! - `dto.rs`: query/request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::{Arc, Mutex};

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use siteerp_infra::SiteStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// The store shared by every handler. Each request holds the lock for one
/// store operation.
pub type SharedStore = Arc<Mutex<SiteStore>>;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(store: SiteStore) -> Router {
    let store: SharedStore = Arc::new(Mutex::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(store)),
        )
}
