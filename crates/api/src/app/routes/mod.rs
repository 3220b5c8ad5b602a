use axum::{Router, routing::get};

pub mod admin;
pub mod portal;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .merge(portal::router())
        .nest("/admin", admin::router())
}
