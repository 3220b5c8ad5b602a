//! Access-decision explanations for admin debugging.
//!
//! Answers the "why can (or can't) this user open this report?" question
//! without changing any state. Intended for admin-facing surfaces only —
//! never return these to end users.

use serde::Serialize;

use reporthub_core::{DepartmentId, HubId, ReportGroupId, ReportId, UserId};

/// One independent path that grants a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum AccessPath {
    /// Active administrator: the grant store is bypassed entirely.
    AdminBypass,
    /// A direct grant on the report itself.
    DirectGrant,
    /// A grant on the report's group.
    GroupGrant { group_id: ReportGroupId },
    /// A grant on the group's hub.
    HubGrant { hub_id: HubId },
    /// Membership in a department the report is associated with.
    DepartmentMembership { department_id: DepartmentId },
}

/// Detailed explanation of a report-access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub user_id: UserId,
    pub report_id: ReportId,

    /// Whether access is granted.
    pub allowed: bool,

    /// Every independent path that grants the report (empty when denied).
    /// Paths are a union: any single one is sufficient.
    pub paths: Vec<AccessPath>,

    /// Human-readable reason for the decision.
    pub reason: String,
}
