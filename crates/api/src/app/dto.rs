use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reporthub_access::ResolvedCatalog;
use reporthub_catalog::{CatalogEntityRef, EmbedConfig, Hub, Report, ReportGroup, ReportType};
use reporthub_core::{DepartmentId, HubId, ReportGroupId, ReportId, UserId};
use reporthub_grants::GrantTarget;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateHubRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub hub_id: HubId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub report_group_id: ReportGroupId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    pub embed: EmbedConfig,
}

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub entity: CatalogEntityRef,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEntityRequest {
    pub entity: CatalogEntityRef,
}

#[derive(Debug, Deserialize)]
pub struct ReorderHubsRequest {
    pub ordered: Vec<HubId>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderGroupsRequest {
    pub hub_id: HubId,
    pub ordered: Vec<ReportGroupId>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderReportsRequest {
    pub group_id: ReportGroupId,
    pub ordered: Vec<ReportId>,
}

#[derive(Debug, Deserialize)]
pub struct MoveReportRequest {
    pub group_id: ReportGroupId,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceDepartmentsRequest {
    pub departments: Vec<DepartmentId>,
}

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    pub user_id: UserId,
    pub target: GrantTarget,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    pub user_id: UserId,
    pub target: GrantTarget,
}

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub user_id: UserId,
    pub report_id: ReportId,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct HubDto {
    pub id: HubId,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
}

#[derive(Debug, Serialize)]
pub struct GroupDto {
    pub id: ReportGroupId,
    pub hub_id: HubId,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
}

#[derive(Debug, Serialize)]
pub struct ReportSummaryDto {
    pub id: ReportId,
    pub report_group_id: ReportGroupId,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub report_type: ReportType,
}

/// The caller's resolved catalog. Everything here is visible to the caller
/// by construction; embed configuration is intentionally omitted (fetch it
/// per report through the embed endpoint).
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub hubs: Vec<HubDto>,
    pub groups: Vec<GroupDto>,
    pub reports: Vec<ReportSummaryDto>,
}

impl From<Hub> for HubDto {
    fn from(hub: Hub) -> Self {
        Self {
            id: hub.id,
            code: hub.code,
            name: hub.name,
            sort_order: hub.sort_order,
        }
    }
}

impl From<ReportGroup> for GroupDto {
    fn from(group: ReportGroup) -> Self {
        Self {
            id: group.id,
            hub_id: group.hub_id,
            code: group.code,
            name: group.name,
            sort_order: group.sort_order,
        }
    }
}

impl From<Report> for ReportSummaryDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            report_group_id: report.report_group_id,
            code: report.code,
            name: report.name,
            sort_order: report.sort_order,
            report_type: report.embed.report_type(),
        }
    }
}

impl From<ResolvedCatalog> for CatalogResponse {
    fn from(resolved: ResolvedCatalog) -> Self {
        Self {
            hubs: resolved.hubs.into_iter().map(HubDto::from).collect(),
            groups: resolved.groups.into_iter().map(GroupDto::from).collect(),
            reports: resolved
                .reports
                .into_iter()
                .map(ReportSummaryDto::from)
                .collect(),
        }
    }
}
