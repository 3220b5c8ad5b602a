//! Portal-facing routes: the caller's catalog and per-report rendering.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use reporthub_core::ReportId;
use reporthub_embed::EmbedResolution;

use crate::app::dto::CatalogResponse;
use crate::app::{errors, services::AppServices};
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/catalog", get(my_catalog))
        .route("/reports/:id/access", get(report_access))
        .route("/reports/:id/embed", get(report_embed))
}

/// GET /catalog — everything the caller may see.
pub async fn my_catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
) -> axum::response::Response {
    let resolved = services
        .resolver()
        .resolve_accessible_catalog(identity.identity());

    (StatusCode::OK, Json(CatalogResponse::from(resolved))).into_response()
}

/// GET /reports/:id/access — single-report membership test.
pub async fn report_access(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(report_id): Path<String>,
) -> axum::response::Response {
    let report_id: ReportId = match report_id.parse() {
        Ok(report_id) => report_id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    let allowed = services
        .resolver()
        .can_access_report(identity.identity(), report_id);

    (
        StatusCode::OK,
        Json(json!({ "report_id": report_id, "allowed": allowed })),
    )
        .into_response()
}

/// GET /reports/:id/embed — resolver chained in front of the embed resolver.
///
/// Reports the caller cannot see answer 404, same as reports that do not
/// exist: no existence disclosure through this endpoint.
pub async fn report_embed(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(report_id): Path<String>,
) -> axum::response::Response {
    let report_id: ReportId = match report_id.parse() {
        Ok(report_id) => report_id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    if !services
        .resolver()
        .can_access_report(identity.identity(), report_id)
    {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "not found");
    }

    // can_access_report passing implies the report exists; the second lookup
    // may still miss if it was deleted in between, which is the same 404.
    let Some(report) = services.report(report_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "not found");
    };

    // NeedsConfiguration is a first-class answer, not an error.
    let body = match services.embed().resolve(&report).await {
        EmbedResolution::Ready(descriptor) => json!({
            "status": "ready",
            "url": descriptor.url,
            "token": descriptor.token,
            "append_auth_query": descriptor.append_auth_query,
        }),
        EmbedResolution::NeedsConfiguration(gap) => json!({
            "status": "needs_configuration",
            "reason": gap.to_string(),
        }),
    };

    (StatusCode::OK, Json(body)).into_response()
}
