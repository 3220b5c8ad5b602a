//! Typed references into the catalog, used by mutations and audit records.

use serde::{Deserialize, Serialize};

use reporthub_core::{DepartmentId, HubId, ReportGroupId, ReportId};

/// A reference to any catalog entity, kind carried in the type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CatalogEntityRef {
    Hub(HubId),
    ReportGroup(ReportGroupId),
    Report(ReportId),
    Department(DepartmentId),
}

impl CatalogEntityRef {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogEntityRef::Hub(_) => "hub",
            CatalogEntityRef::ReportGroup(_) => "report_group",
            CatalogEntityRef::Report(_) => "report",
            CatalogEntityRef::Department(_) => "department",
        }
    }
}

/// The sibling set a reorder operates on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ReorderScope {
    /// All hubs (they have no parent).
    Hubs,
    /// Report groups under one hub.
    GroupsInHub { hub_id: HubId },
    /// Reports under one report group.
    ReportsInGroup { group_id: ReportGroupId },
}
