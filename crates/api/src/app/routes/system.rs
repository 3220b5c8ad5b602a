use axum::{Extension, Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::context::IdentityContext;

/// GET /health — liveness, unauthenticated.
pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

/// GET /whoami — echo the authenticated identity.
pub async fn whoami(Extension(identity): Extension<IdentityContext>) -> axum::response::Response {
    let identity = identity.identity();
    (
        StatusCode::OK,
        Json(json!({
            "user_id": identity.user_id,
            "is_admin": identity.is_admin,
            "roles": identity.roles,
        })),
    )
        .into_response()
}
