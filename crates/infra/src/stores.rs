//! In-memory catalog and grant stores.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use reporthub_access::{CatalogReader, GrantReader};
use reporthub_admin::{CatalogStore, GrantStore};
use reporthub_catalog::{CatalogEntityRef, Department, Hub, Report, ReportGroup};
use reporthub_core::{
    DepartmentId, DomainError, DomainResult, HubId, ReportGroupId, ReportId, UserId,
};
use reporthub_grants::{Grant, GrantTarget};

#[derive(Debug, Default)]
struct CatalogState {
    hubs: HashMap<HubId, Hub>,
    groups: HashMap<ReportGroupId, ReportGroup>,
    reports: HashMap<ReportId, Report>,
    departments: HashMap<DepartmentId, Department>,
    report_departments: HashMap<ReportId, BTreeSet<DepartmentId>>,
}

/// In-memory catalog store.
///
/// One `RwLock` over the whole catalog: reads are cheap clones of a
/// consistent snapshot, and multi-row writes (sort orders, department
/// replacement) happen entirely inside one write guard.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<CatalogState>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> DomainError {
    DomainError::conflict("store lock poisoned")
}

impl CatalogReader for InMemoryCatalogStore {
    fn hub(&self, id: HubId) -> Option<Hub> {
        self.inner.read().ok()?.hubs.get(&id).cloned()
    }

    fn report_group(&self, id: ReportGroupId) -> Option<ReportGroup> {
        self.inner.read().ok()?.groups.get(&id).cloned()
    }

    fn report(&self, id: ReportId) -> Option<Report> {
        self.inner.read().ok()?.reports.get(&id).cloned()
    }

    fn department(&self, id: DepartmentId) -> Option<Department> {
        self.inner.read().ok()?.departments.get(&id).cloned()
    }

    fn hubs(&self) -> Vec<Hub> {
        match self.inner.read() {
            Ok(state) => state.hubs.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn report_groups(&self) -> Vec<ReportGroup> {
        match self.inner.read() {
            Ok(state) => state.groups.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn reports(&self) -> Vec<Report> {
        match self.inner.read() {
            Ok(state) => state.reports.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn departments(&self) -> Vec<Department> {
        match self.inner.read() {
            Ok(state) => state.departments.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn groups_in_hub(&self, hub_id: HubId) -> Vec<ReportGroup> {
        match self.inner.read() {
            Ok(state) => state
                .groups
                .values()
                .filter(|group| group.hub_id == hub_id)
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn reports_in_group(&self, group_id: ReportGroupId) -> Vec<Report> {
        match self.inner.read() {
            Ok(state) => state
                .reports
                .values()
                .filter(|report| report.report_group_id == group_id)
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn report_departments(&self, report_id: ReportId) -> Vec<DepartmentId> {
        match self.inner.read() {
            Ok(state) => state
                .report_departments
                .get(&report_id)
                .map(|departments| departments.iter().copied().collect())
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn department_reports(&self, department_id: DepartmentId) -> Vec<ReportId> {
        match self.inner.read() {
            Ok(state) => state
                .report_departments
                .iter()
                .filter(|(_, departments)| departments.contains(&department_id))
                .map(|(report_id, _)| *report_id)
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn insert_hub(&self, hub: Hub) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        if state.hubs.contains_key(&hub.id) {
            return Err(DomainError::conflict("hub id already exists"));
        }
        state.hubs.insert(hub.id, hub);
        Ok(())
    }

    fn insert_group(&self, group: ReportGroup) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        if state.groups.contains_key(&group.id) {
            return Err(DomainError::conflict("report group id already exists"));
        }
        state.groups.insert(group.id, group);
        Ok(())
    }

    fn insert_report(&self, report: Report) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        if state.reports.contains_key(&report.id) {
            return Err(DomainError::conflict("report id already exists"));
        }
        state.reports.insert(report.id, report);
        Ok(())
    }

    fn insert_department(&self, department: Department) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        if state.departments.contains_key(&department.id) {
            return Err(DomainError::conflict("department id already exists"));
        }
        state.departments.insert(department.id, department);
        Ok(())
    }

    fn set_active(&self, entity: CatalogEntityRef, is_active: bool) -> DomainResult<bool> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        let flag = match entity {
            CatalogEntityRef::Hub(id) => state.hubs.get_mut(&id).map(|hub| &mut hub.is_active),
            CatalogEntityRef::ReportGroup(id) => {
                state.groups.get_mut(&id).map(|group| &mut group.is_active)
            }
            CatalogEntityRef::Report(id) => {
                state.reports.get_mut(&id).map(|report| &mut report.is_active)
            }
            CatalogEntityRef::Department(id) => state
                .departments
                .get_mut(&id)
                .map(|department| &mut department.is_active),
        };

        let flag = flag.ok_or(DomainError::NotFound)?;
        let changed = *flag != is_active;
        *flag = is_active;
        Ok(changed)
    }

    fn move_report(&self, report_id: ReportId, to_group: ReportGroupId) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        if !state.groups.contains_key(&to_group) {
            return Err(DomainError::NotFound);
        }
        let report = state.reports.get_mut(&report_id).ok_or(DomainError::NotFound)?;
        report.report_group_id = to_group;
        Ok(())
    }

    fn set_sort_orders(&self, updates: &[(CatalogEntityRef, i32)]) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;

        // Validate the whole batch before touching anything.
        for (entity, _) in updates {
            let exists = match entity {
                CatalogEntityRef::Hub(id) => state.hubs.contains_key(id),
                CatalogEntityRef::ReportGroup(id) => state.groups.contains_key(id),
                CatalogEntityRef::Report(id) => state.reports.contains_key(id),
                CatalogEntityRef::Department(_) => false,
            };
            if !exists {
                return Err(DomainError::invalid_state(format!(
                    "sort update references a missing {}",
                    entity.kind()
                )));
            }
        }

        for (entity, sort_order) in updates {
            match entity {
                CatalogEntityRef::Hub(id) => {
                    if let Some(hub) = state.hubs.get_mut(id) {
                        hub.sort_order = *sort_order;
                    }
                }
                CatalogEntityRef::ReportGroup(id) => {
                    if let Some(group) = state.groups.get_mut(id) {
                        group.sort_order = *sort_order;
                    }
                }
                CatalogEntityRef::Report(id) => {
                    if let Some(report) = state.reports.get_mut(id) {
                        report.sort_order = *sort_order;
                    }
                }
                CatalogEntityRef::Department(_) => {}
            }
        }
        Ok(())
    }

    fn replace_report_departments(
        &self,
        report_id: ReportId,
        departments: &[DepartmentId],
    ) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;

        // Re-validate under the write lock: the whole set goes in or nothing
        // does.
        if !state.reports.contains_key(&report_id) {
            return Err(DomainError::NotFound);
        }
        for department_id in departments {
            if !state.departments.contains_key(department_id) {
                return Err(DomainError::invalid_state(format!(
                    "unknown department {department_id}"
                )));
            }
        }

        state
            .report_departments
            .insert(report_id, departments.iter().copied().collect());
        Ok(())
    }

    fn delete(&self, entity: CatalogEntityRef) -> DomainResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        let removed = match entity {
            CatalogEntityRef::Hub(id) => state.hubs.remove(&id).is_some(),
            CatalogEntityRef::ReportGroup(id) => state.groups.remove(&id).is_some(),
            CatalogEntityRef::Report(id) => {
                state.report_departments.remove(&id);
                state.reports.remove(&id).is_some()
            }
            CatalogEntityRef::Department(id) => state.departments.remove(&id).is_some(),
        };
        if removed { Ok(()) } else { Err(DomainError::NotFound) }
    }
}

/// In-memory grant store, rows keyed by subject user.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    inner: RwLock<HashMap<UserId, Vec<Grant>>>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GrantReader for InMemoryGrantStore {
    fn grants_for_user(&self, user_id: UserId) -> Vec<Grant> {
        match self.inner.read() {
            Ok(rows) => rows.get(&user_id).cloned().unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }
}

impl GrantStore for InMemoryGrantStore {
    fn upsert(&self, grant: Grant) -> DomainResult<()> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        let user_rows = rows.entry(grant.user_id).or_default();
        user_rows.retain(|existing| existing.target != grant.target);
        user_rows.push(grant);
        Ok(())
    }

    fn remove(&self, user_id: UserId, target: GrantTarget) -> DomainResult<bool> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        let Some(user_rows) = rows.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = user_rows.len();
        user_rows.retain(|grant| grant.target != target);
        Ok(user_rows.len() != before)
    }

    fn references_target(&self, target: GrantTarget) -> bool {
        match self.inner.read() {
            Ok(rows) => rows
                .values()
                .any(|user_rows| user_rows.iter().any(|grant| grant.target == target)),
            Err(_) => false,
        }
    }
}
