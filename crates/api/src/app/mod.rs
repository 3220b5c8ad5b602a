//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store/resolver/admin/embed wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use reporthub_auth::{Hs256TokenValidator, TokenValidator};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: String) -> Router {
    let validator: Arc<dyn TokenValidator> = Arc::new(Hs256TokenValidator::new(jwt_secret));
    let auth_state = middleware::AuthState { validator };

    let services = Arc::new(services::build_services());

    // Protected routes: require a verified identity.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
