//! Admin mutation routes.
//!
//! Every handler passes the admin gate before touching a service; the
//! services re-validate referenced ids and emit the audit records.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

use reporthub_admin::MutationOutcome;
use reporthub_auth::Identity;
use reporthub_core::{
    DepartmentId, DomainResult, HubId, ReportGroupId, ReportId, UserId,
};

use crate::app::dto::{
    CreateDepartmentRequest, CreateGroupRequest, CreateHubRequest, CreateReportRequest,
    DeleteEntityRequest, ExplainQuery, GrantRequest, MoveReportRequest, ReorderGroupsRequest,
    ReorderHubsRequest, ReorderReportsRequest, ReplaceDepartmentsRequest, RevokeRequest,
    SetActiveRequest,
};
use crate::app::{errors, services::AppServices};
use crate::authz;
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/hubs", post(create_hub))
        .route("/hubs/order", put(reorder_hubs))
        .route("/groups", post(create_group))
        .route("/groups/order", put(reorder_groups))
        .route("/reports", post(create_report))
        .route("/reports/order", put(reorder_reports))
        .route("/reports/:id/group", put(move_report))
        .route("/reports/:id/departments", put(replace_departments))
        .route("/departments", post(create_department))
        .route("/catalog/active", put(set_active))
        .route("/catalog/delete", post(delete_entity))
        .route("/grants", post(grant_access))
        .route("/grants/revoke", post(revoke_access))
        .route("/users/:id/grants", get(list_user_grants))
        .route("/access/explain", get(explain_access))
        .route("/audit", get(audit_log))
}

/// 403 response when the caller is not an administrator in good standing.
fn forbid_non_admin(identity: &IdentityContext) -> Option<axum::response::Response> {
    authz::ensure_admin(identity).err().map(|err| {
        errors::json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
    })
}

fn outcome_response(result: DomainResult<MutationOutcome>) -> axum::response::Response {
    match result {
        Ok(outcome) => (StatusCode::OK, Json(json!({ "outcome": outcome }))).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_hub(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<CreateHubRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    match services
        .admin()
        .create_hub(identity.user_id(), HubId::new(), req.code, req.name, req.sort_order)
    {
        Ok(hub) => (StatusCode::CREATED, Json(json!({ "id": hub.id }))).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn create_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<CreateGroupRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    match services.admin().create_group(
        identity.user_id(),
        ReportGroupId::new(),
        req.hub_id,
        req.code,
        req.name,
        req.sort_order,
    ) {
        Ok(group) => (StatusCode::CREATED, Json(json!({ "id": group.id }))).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn create_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<CreateReportRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    match services.admin().create_report(
        identity.user_id(),
        ReportId::new(),
        req.report_group_id,
        req.code,
        req.name,
        req.sort_order,
        req.embed,
    ) {
        Ok(report) => (StatusCode::CREATED, Json(json!({ "id": report.id }))).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn create_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<CreateDepartmentRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    match services.admin().create_department(
        identity.user_id(),
        DepartmentId::new(),
        req.code,
        req.name,
    ) {
        Ok(department) => {
            (StatusCode::CREATED, Json(json!({ "id": department.id }))).into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn set_active(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<SetActiveRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    outcome_response(
        services
            .admin()
            .set_active(identity.user_id(), req.entity, req.is_active),
    )
}

pub async fn delete_entity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<DeleteEntityRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    outcome_response(services.admin().delete_entity(identity.user_id(), req.entity))
}

pub async fn reorder_hubs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<ReorderHubsRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    outcome_response(services.admin().reorder_hubs(identity.user_id(), &req.ordered))
}

pub async fn reorder_groups(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<ReorderGroupsRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    outcome_response(
        services
            .admin()
            .reorder_groups(identity.user_id(), req.hub_id, &req.ordered),
    )
}

pub async fn reorder_reports(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<ReorderReportsRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    outcome_response(
        services
            .admin()
            .reorder_reports(identity.user_id(), req.group_id, &req.ordered),
    )
}

pub async fn move_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(report_id): Path<String>,
    Json(req): Json<MoveReportRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    let report_id: ReportId = match report_id.parse() {
        Ok(report_id) => report_id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    outcome_response(
        services
            .admin()
            .move_report(identity.user_id(), report_id, req.group_id),
    )
}

pub async fn replace_departments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(report_id): Path<String>,
    Json(req): Json<ReplaceDepartmentsRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    let report_id: ReportId = match report_id.parse() {
        Ok(report_id) => report_id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    outcome_response(services.admin().replace_report_departments(
        identity.user_id(),
        report_id,
        &req.departments,
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Grants
// ─────────────────────────────────────────────────────────────────────────────

pub async fn grant_access(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<GrantRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    outcome_response(services.admin().grant_access(
        identity.user_id(),
        req.user_id,
        req.target,
        req.expires_at,
    ))
}

pub async fn revoke_access(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(req): Json<RevokeRequest>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    outcome_response(
        services
            .admin()
            .revoke_access(identity.user_id(), req.user_id, req.target),
    )
}

pub async fn list_user_grants(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    let user_id: UserId = match user_id.parse() {
        Ok(user_id) => user_id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    (
        StatusCode::OK,
        Json(json!({ "grants": services.user_grants(user_id) })),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Introspection
// ─────────────────────────────────────────────────────────────────────────────

/// GET /admin/access/explain?user_id=..&report_id=..
///
/// Explains the grant paths for the given user assuming an account in good
/// standing (account flags live on the token, not in the stores).
pub async fn explain_access(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Query(query): Query<ExplainQuery>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    let subject = Identity::member(query.user_id);
    let explanation = services
        .resolver()
        .explain_report_access(&subject, query.report_id);

    (StatusCode::OK, Json(json!({ "explanation": explanation }))).into_response()
}

/// GET /admin/audit — the recorded mutation trail, oldest first.
pub async fn audit_log(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
) -> axum::response::Response {
    if let Some(response) = forbid_non_admin(&identity) {
        return response;
    }

    (
        StatusCode::OK,
        Json(json!({ "events": services.audit_events() })),
    )
        .into_response()
}
