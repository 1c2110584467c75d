use axum::{Router, routing::get};

pub mod dashboard;
pub mod inventory;
pub mod invoices;
pub mod issues;
pub mod projects;
pub mod system;
pub mod tools;

/// Router for every site endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard::summary))
        .nest("/inventory", inventory::router())
        .nest("/projects", projects::router())
        .nest("/tools", tools::router())
        .nest("/issues", issues::router())
        .nest("/invoices", invoices::router())
}
