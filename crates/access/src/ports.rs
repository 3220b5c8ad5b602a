//! Read-side storage ports.
//!
//! The resolver assumes nothing about storage beyond these two traits.
//! Implementations return owned snapshots; a resolution works on the data it
//! read and is never retroactively affected by concurrent mutation
//! (stale-but-consistent-at-start reads are acceptable by contract).

use std::sync::Arc;

use reporthub_catalog::{Department, Hub, Report, ReportGroup};
use reporthub_core::{DepartmentId, HubId, ReportGroupId, ReportId, UserId};
use reporthub_grants::Grant;

/// Read port over the catalog hierarchy and department associations.
pub trait CatalogReader: Send + Sync {
    fn hub(&self, id: HubId) -> Option<Hub>;
    fn report_group(&self, id: ReportGroupId) -> Option<ReportGroup>;
    fn report(&self, id: ReportId) -> Option<Report>;
    fn department(&self, id: DepartmentId) -> Option<Department>;

    fn hubs(&self) -> Vec<Hub>;
    fn report_groups(&self) -> Vec<ReportGroup>;
    fn reports(&self) -> Vec<Report>;
    fn departments(&self) -> Vec<Department>;

    fn groups_in_hub(&self, hub_id: HubId) -> Vec<ReportGroup>;
    fn reports_in_group(&self, group_id: ReportGroupId) -> Vec<Report>;

    /// Departments a report is associated with.
    fn report_departments(&self, report_id: ReportId) -> Vec<DepartmentId>;
    /// Reports associated with a department.
    fn department_reports(&self, department_id: DepartmentId) -> Vec<ReportId>;
}

/// Read port over the grant store.
pub trait GrantReader: Send + Sync {
    /// Every grant row for one user — effective or expired. Expiry filtering
    /// is the resolver's job (it owns the clock).
    fn grants_for_user(&self, user_id: UserId) -> Vec<Grant>;
}

impl<S> CatalogReader for Arc<S>
where
    S: CatalogReader + ?Sized,
{
    fn hub(&self, id: HubId) -> Option<Hub> {
        (**self).hub(id)
    }

    fn report_group(&self, id: ReportGroupId) -> Option<ReportGroup> {
        (**self).report_group(id)
    }

    fn report(&self, id: ReportId) -> Option<Report> {
        (**self).report(id)
    }

    fn department(&self, id: DepartmentId) -> Option<Department> {
        (**self).department(id)
    }

    fn hubs(&self) -> Vec<Hub> {
        (**self).hubs()
    }

    fn report_groups(&self) -> Vec<ReportGroup> {
        (**self).report_groups()
    }

    fn reports(&self) -> Vec<Report> {
        (**self).reports()
    }

    fn departments(&self) -> Vec<Department> {
        (**self).departments()
    }

    fn groups_in_hub(&self, hub_id: HubId) -> Vec<ReportGroup> {
        (**self).groups_in_hub(hub_id)
    }

    fn reports_in_group(&self, group_id: ReportGroupId) -> Vec<Report> {
        (**self).reports_in_group(group_id)
    }

    fn report_departments(&self, report_id: ReportId) -> Vec<DepartmentId> {
        (**self).report_departments(report_id)
    }

    fn department_reports(&self, department_id: DepartmentId) -> Vec<ReportId> {
        (**self).department_reports(department_id)
    }
}

impl<S> GrantReader for Arc<S>
where
    S: GrantReader + ?Sized,
{
    fn grants_for_user(&self, user_id: UserId) -> Vec<Grant> {
        (**self).grants_for_user(user_id)
    }
}
