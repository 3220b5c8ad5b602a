//! The admin mutation service.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use reporthub_catalog::{
    CatalogEntityRef, Department, EmbedConfig, Hub, Report, ReportGroup, ReorderScope,
};
use reporthub_core::{
    Clock, DepartmentId, DomainError, DomainResult, HubId, ReportGroupId, ReportId, UserId,
};
use reporthub_events::{AuditEvent, AuditSink};
use reporthub_grants::{Grant, GrantTarget};

use crate::ports::{CatalogStore, GrantStore};

/// What a mutation did.
///
/// `NoOp` is a success: revoking an absent grant, re-setting an unchanged
/// active flag, or moving a report to the group it is already in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Applied,
    NoOp,
}

/// Validated, auditable mutations over the catalog and grant stores.
///
/// Every operation re-validates referenced ids before writing. Actor
/// admin-ness is enforced by the serving layer's guard; the service records
/// the actor for the audit trail.
pub struct AdminService<C, G> {
    catalog: C,
    grants: G,
    clock: Arc<dyn Clock>,
    audit: Arc<dyn AuditSink>,
}

impl<C, G> AdminService<C, G>
where
    C: CatalogStore,
    G: GrantStore,
{
    pub fn new(catalog: C, grants: G, clock: Arc<dyn Clock>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            catalog,
            grants,
            clock,
            audit,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog creation
    // ─────────────────────────────────────────────────────────────────────

    pub fn create_hub(
        &self,
        actor: UserId,
        id: HubId,
        code: impl Into<String>,
        name: impl Into<String>,
        sort_order: i32,
    ) -> DomainResult<Hub> {
        let hub = Hub::new(id, code, name, sort_order)?;
        self.catalog.insert_hub(hub.clone())?;
        self.emit_created(actor, CatalogEntityRef::Hub(id));
        Ok(hub)
    }

    pub fn create_group(
        &self,
        actor: UserId,
        id: ReportGroupId,
        hub_id: HubId,
        code: impl Into<String>,
        name: impl Into<String>,
        sort_order: i32,
    ) -> DomainResult<ReportGroup> {
        if self.catalog.hub(hub_id).is_none() {
            return Err(DomainError::NotFound);
        }
        let group = ReportGroup::new(id, hub_id, code, name, sort_order)?;
        self.catalog.insert_group(group.clone())?;
        self.emit_created(actor, CatalogEntityRef::ReportGroup(id));
        Ok(group)
    }

    pub fn create_report(
        &self,
        actor: UserId,
        id: ReportId,
        group_id: ReportGroupId,
        code: impl Into<String>,
        name: impl Into<String>,
        sort_order: i32,
        embed: EmbedConfig,
    ) -> DomainResult<Report> {
        if self.catalog.report_group(group_id).is_none() {
            return Err(DomainError::NotFound);
        }
        let report = Report::new(id, group_id, code, name, sort_order, embed)?;
        self.catalog.insert_report(report.clone())?;
        self.emit_created(actor, CatalogEntityRef::Report(id));
        Ok(report)
    }

    pub fn create_department(
        &self,
        actor: UserId,
        id: DepartmentId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> DomainResult<Department> {
        let department = Department::new(id, code, name)?;
        self.catalog.insert_department(department.clone())?;
        self.emit_created(actor, CatalogEntityRef::Department(id));
        Ok(department)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Grants
    // ─────────────────────────────────────────────────────────────────────

    /// Grant access to a target.
    ///
    /// The target must exist; it may be inactive (the grant yields no
    /// visibility until reactivation — not an error). Re-granting an
    /// existing (user, target) pair replaces the prior grant.
    pub fn grant_access(
        &self,
        actor: UserId,
        user_id: UserId,
        target: GrantTarget,
        expires_at: Option<DateTime<Utc>>,
    ) -> DomainResult<MutationOutcome> {
        self.ensure_target_exists(target)?;

        let now = self.clock.now();
        let grant = Grant::new(user_id, target, actor, now, expires_at)?;
        self.grants.upsert(grant)?;

        self.audit.emit(AuditEvent::AccessGranted {
            actor,
            user_id,
            target,
            expires_at,
            occurred_at: now,
        });
        Ok(MutationOutcome::Applied)
    }

    /// Revoke access to a target. Idempotent: revoking a grant that does not
    /// exist (or whose target vanished) is a no-op success.
    pub fn revoke_access(
        &self,
        actor: UserId,
        user_id: UserId,
        target: GrantTarget,
    ) -> DomainResult<MutationOutcome> {
        if !self.grants.remove(user_id, target)? {
            return Ok(MutationOutcome::NoOp);
        }

        self.audit.emit(AuditEvent::AccessRevoked {
            actor,
            user_id,
            target,
            occurred_at: self.clock.now(),
        });
        Ok(MutationOutcome::Applied)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Activation / structure
    // ─────────────────────────────────────────────────────────────────────

    /// Flip an entity's active flag. Children are untouched: ancestor
    /// activity is re-checked at resolution time, not cascaded at write time.
    pub fn set_active(
        &self,
        actor: UserId,
        entity: CatalogEntityRef,
        is_active: bool,
    ) -> DomainResult<MutationOutcome> {
        if !self.catalog.set_active(entity, is_active)? {
            return Ok(MutationOutcome::NoOp);
        }

        self.audit.emit(AuditEvent::ActivationChanged {
            actor,
            entity,
            is_active,
            occurred_at: self.clock.now(),
        });
        Ok(MutationOutcome::Applied)
    }

    /// Re-parent a report into another group. The target group must exist
    /// and be active.
    pub fn move_report(
        &self,
        actor: UserId,
        report_id: ReportId,
        to_group: ReportGroupId,
    ) -> DomainResult<MutationOutcome> {
        let report = self.catalog.report(report_id).ok_or(DomainError::NotFound)?;
        if report.report_group_id == to_group {
            return Ok(MutationOutcome::NoOp);
        }

        let group = self.catalog.report_group(to_group).ok_or(DomainError::NotFound)?;
        if !group.is_active {
            return Err(DomainError::invalid_state("target report group is inactive"));
        }

        self.catalog.move_report(report_id, to_group)?;
        self.audit.emit(AuditEvent::ReportMoved {
            actor,
            report_id,
            from_group: report.report_group_id,
            to_group,
            occurred_at: self.clock.now(),
        });
        Ok(MutationOutcome::Applied)
    }

    /// Reorder all hubs. `ordered` must be a permutation of the current hubs.
    pub fn reorder_hubs(&self, actor: UserId, ordered: &[HubId]) -> DomainResult<MutationOutcome> {
        let current: HashSet<HubId> = self.catalog.hubs().iter().map(|hub| hub.id).collect();
        ensure_permutation(&current, ordered)?;

        let updates = sequential_orders(ordered, CatalogEntityRef::Hub);
        self.catalog.set_sort_orders(&updates)?;
        self.emit_reordered(actor, ReorderScope::Hubs);
        Ok(MutationOutcome::Applied)
    }

    /// Reorder the groups of one hub.
    pub fn reorder_groups(
        &self,
        actor: UserId,
        hub_id: HubId,
        ordered: &[ReportGroupId],
    ) -> DomainResult<MutationOutcome> {
        if self.catalog.hub(hub_id).is_none() {
            return Err(DomainError::NotFound);
        }
        let current: HashSet<ReportGroupId> = self
            .catalog
            .groups_in_hub(hub_id)
            .iter()
            .map(|group| group.id)
            .collect();
        ensure_permutation(&current, ordered)?;

        let updates = sequential_orders(ordered, CatalogEntityRef::ReportGroup);
        self.catalog.set_sort_orders(&updates)?;
        self.emit_reordered(actor, ReorderScope::GroupsInHub { hub_id });
        Ok(MutationOutcome::Applied)
    }

    /// Reorder the reports of one group.
    pub fn reorder_reports(
        &self,
        actor: UserId,
        group_id: ReportGroupId,
        ordered: &[ReportId],
    ) -> DomainResult<MutationOutcome> {
        if self.catalog.report_group(group_id).is_none() {
            return Err(DomainError::NotFound);
        }
        let current: HashSet<ReportId> = self
            .catalog
            .reports_in_group(group_id)
            .iter()
            .map(|report| report.id)
            .collect();
        ensure_permutation(&current, ordered)?;

        let updates = sequential_orders(ordered, CatalogEntityRef::Report);
        self.catalog.set_sort_orders(&updates)?;
        self.emit_reordered(actor, ReorderScope::ReportsInGroup { group_id });
        Ok(MutationOutcome::Applied)
    }

    /// Replace a report's department associations wholesale.
    ///
    /// Set semantics: the new set fully replaces the old. Atomic: if any
    /// referenced department is unknown, nothing is written.
    pub fn replace_report_departments(
        &self,
        actor: UserId,
        report_id: ReportId,
        departments: &[DepartmentId],
    ) -> DomainResult<MutationOutcome> {
        if self.catalog.report(report_id).is_none() {
            return Err(DomainError::NotFound);
        }
        for department_id in departments {
            if self.catalog.department(*department_id).is_none() {
                return Err(DomainError::invalid_state(format!(
                    "unknown department {department_id}"
                )));
            }
        }

        self.catalog.replace_report_departments(report_id, departments)?;
        self.audit.emit(AuditEvent::DepartmentsReplaced {
            actor,
            report_id,
            departments: departments.to_vec(),
            occurred_at: self.clock.now(),
        });
        Ok(MutationOutcome::Applied)
    }

    /// Hard-delete a catalog entity.
    ///
    /// Refused while any grant references the entity or while child content
    /// exists; soft deactivation is the supported way to retire visible
    /// content.
    pub fn delete_entity(
        &self,
        actor: UserId,
        entity: CatalogEntityRef,
    ) -> DomainResult<MutationOutcome> {
        self.ensure_entity_exists(entity)?;

        if self.grants.references_target(grant_target_for(entity)) {
            return Err(DomainError::invalid_state("entity is referenced by grants"));
        }

        match entity {
            CatalogEntityRef::Hub(hub_id) => {
                if !self.catalog.groups_in_hub(hub_id).is_empty() {
                    return Err(DomainError::invalid_state("hub still owns report groups"));
                }
            }
            CatalogEntityRef::ReportGroup(group_id) => {
                if !self.catalog.reports_in_group(group_id).is_empty() {
                    return Err(DomainError::invalid_state("group still owns reports"));
                }
            }
            CatalogEntityRef::Department(department_id) => {
                if !self.catalog.department_reports(department_id).is_empty() {
                    return Err(DomainError::invalid_state(
                        "department is still associated with reports",
                    ));
                }
            }
            CatalogEntityRef::Report(_) => {}
        }

        self.catalog.delete(entity)?;
        self.audit.emit(AuditEvent::EntityDeleted {
            actor,
            entity,
            occurred_at: self.clock.now(),
        });
        Ok(MutationOutcome::Applied)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    fn ensure_target_exists(&self, target: GrantTarget) -> DomainResult<()> {
        let exists = match target {
            GrantTarget::Hub(id) => self.catalog.hub(id).is_some(),
            GrantTarget::ReportGroup(id) => self.catalog.report_group(id).is_some(),
            GrantTarget::Report(id) => self.catalog.report(id).is_some(),
            GrantTarget::Department(id) => self.catalog.department(id).is_some(),
        };
        if exists { Ok(()) } else { Err(DomainError::NotFound) }
    }

    fn ensure_entity_exists(&self, entity: CatalogEntityRef) -> DomainResult<()> {
        let exists = match entity {
            CatalogEntityRef::Hub(id) => self.catalog.hub(id).is_some(),
            CatalogEntityRef::ReportGroup(id) => self.catalog.report_group(id).is_some(),
            CatalogEntityRef::Report(id) => self.catalog.report(id).is_some(),
            CatalogEntityRef::Department(id) => self.catalog.department(id).is_some(),
        };
        if exists { Ok(()) } else { Err(DomainError::NotFound) }
    }

    fn emit_created(&self, actor: UserId, entity: CatalogEntityRef) {
        self.audit.emit(AuditEvent::EntityCreated {
            actor,
            entity,
            occurred_at: self.clock.now(),
        });
    }

    fn emit_reordered(&self, actor: UserId, scope: ReorderScope) {
        self.audit.emit(AuditEvent::SiblingsReordered {
            actor,
            scope,
            occurred_at: self.clock.now(),
        });
    }
}

/// The grant relation that would pin a catalog entity.
fn grant_target_for(entity: CatalogEntityRef) -> GrantTarget {
    match entity {
        CatalogEntityRef::Hub(id) => GrantTarget::Hub(id),
        CatalogEntityRef::ReportGroup(id) => GrantTarget::ReportGroup(id),
        CatalogEntityRef::Report(id) => GrantTarget::Report(id),
        CatalogEntityRef::Department(id) => GrantTarget::Department(id),
    }
}

/// `ordered` must contain exactly the current sibling set, no duplicates.
fn ensure_permutation<T>(current: &HashSet<T>, ordered: &[T]) -> DomainResult<()>
where
    T: Eq + Hash + Copy,
{
    let mut seen = HashSet::with_capacity(ordered.len());
    let valid = ordered.len() == current.len()
        && ordered.iter().all(|id| current.contains(id) && seen.insert(*id));
    if valid {
        Ok(())
    } else {
        Err(DomainError::invalid_state(
            "reorder list must be a permutation of the current siblings",
        ))
    }
}

/// Sequential sort orders (1-based) for an ordered sibling list.
fn sequential_orders<T, F>(ordered: &[T], to_ref: F) -> Vec<(CatalogEntityRef, i32)>
where
    T: Copy,
    F: Fn(T) -> CatalogEntityRef,
{
    ordered
        .iter()
        .enumerate()
        .map(|(index, id)| (to_ref(*id), index as i32 + 1))
        .collect()
}
