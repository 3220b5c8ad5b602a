//! Write-side storage ports.
//!
//! These extend the read ports of `reporthub-access` with the mutations the
//! admin surface performs. Multi-row operations (`set_sort_orders`,
//! `replace_report_departments`) must be atomic: implementations apply them
//! under one transactional boundary or not at all.

use std::sync::Arc;

use reporthub_access::{CatalogReader, GrantReader};
use reporthub_catalog::{CatalogEntityRef, Department, Hub, Report, ReportGroup};
use reporthub_core::{DepartmentId, DomainResult, ReportGroupId, ReportId, UserId};
use reporthub_grants::{Grant, GrantTarget};

/// Catalog persistence as seen by the mutation surface.
pub trait CatalogStore: CatalogReader {
    /// Insert a new hub. `Conflict` if the id already exists.
    fn insert_hub(&self, hub: Hub) -> DomainResult<()>;
    fn insert_group(&self, group: ReportGroup) -> DomainResult<()>;
    fn insert_report(&self, report: Report) -> DomainResult<()>;
    fn insert_department(&self, department: Department) -> DomainResult<()>;

    /// Flip an entity's active flag. Returns whether the value changed.
    fn set_active(&self, entity: CatalogEntityRef, is_active: bool) -> DomainResult<bool>;

    /// Re-parent a report. The service validates the target group first.
    fn move_report(&self, report_id: ReportId, to_group: ReportGroupId) -> DomainResult<()>;

    /// Apply a batch of sort-order updates atomically.
    fn set_sort_orders(&self, updates: &[(CatalogEntityRef, i32)]) -> DomainResult<()>;

    /// Replace a report's department association set wholesale (set
    /// semantics, atomic: all associations written or none).
    fn replace_report_departments(
        &self,
        report_id: ReportId,
        departments: &[DepartmentId],
    ) -> DomainResult<()>;

    /// Remove an entity (and, for reports, its department associations).
    /// Referential guards are the service's job.
    fn delete(&self, entity: CatalogEntityRef) -> DomainResult<()>;
}

/// Grant persistence as seen by the mutation surface.
pub trait GrantStore: GrantReader {
    /// Insert the grant, replacing any existing grant for the same
    /// (user, target) pair (re-granting renews expiry and actor).
    fn upsert(&self, grant: Grant) -> DomainResult<()>;

    /// Remove the grant for (user, target). Returns whether one existed.
    fn remove(&self, user_id: UserId, target: GrantTarget) -> DomainResult<bool>;

    /// Whether any grant row (effective or expired) references the target.
    fn references_target(&self, target: GrantTarget) -> bool;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn insert_hub(&self, hub: Hub) -> DomainResult<()> {
        (**self).insert_hub(hub)
    }

    fn insert_group(&self, group: ReportGroup) -> DomainResult<()> {
        (**self).insert_group(group)
    }

    fn insert_report(&self, report: Report) -> DomainResult<()> {
        (**self).insert_report(report)
    }

    fn insert_department(&self, department: Department) -> DomainResult<()> {
        (**self).insert_department(department)
    }

    fn set_active(&self, entity: CatalogEntityRef, is_active: bool) -> DomainResult<bool> {
        (**self).set_active(entity, is_active)
    }

    fn move_report(&self, report_id: ReportId, to_group: ReportGroupId) -> DomainResult<()> {
        (**self).move_report(report_id, to_group)
    }

    fn set_sort_orders(&self, updates: &[(CatalogEntityRef, i32)]) -> DomainResult<()> {
        (**self).set_sort_orders(updates)
    }

    fn replace_report_departments(
        &self,
        report_id: ReportId,
        departments: &[DepartmentId],
    ) -> DomainResult<()> {
        (**self).replace_report_departments(report_id, departments)
    }

    fn delete(&self, entity: CatalogEntityRef) -> DomainResult<()> {
        (**self).delete(entity)
    }
}

impl<S> GrantStore for Arc<S>
where
    S: GrantStore + ?Sized,
{
    fn upsert(&self, grant: Grant) -> DomainResult<()> {
        (**self).upsert(grant)
    }

    fn remove(&self, user_id: UserId, target: GrantTarget) -> DomainResult<bool> {
        (**self).remove(user_id, target)
    }

    fn references_target(&self, target: GrantTarget) -> bool {
        (**self).references_target(target)
    }
}
