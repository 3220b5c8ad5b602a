//! The permission resolver.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use reporthub_auth::{AccessGate, Identity};
use reporthub_catalog::{Hub, Report, ReportGroup};
use reporthub_core::{Clock, DepartmentId, ReportId, UserId};
use reporthub_grants::GrantTarget;

use crate::explain::{AccessExplanation, AccessPath};
use crate::ports::{CatalogReader, GrantReader};

/// The slice of the catalog one user is allowed to see.
///
/// Groups appear iff they contain at least one visible report, hubs iff they
/// contain at least one visible group (except for administrators, who see
/// every active entity). All levels are sorted by (sort_order, id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedCatalog {
    pub hubs: Vec<Hub>,
    pub groups: Vec<ReportGroup>,
    pub reports: Vec<Report>,
}

impl ResolvedCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty() && self.groups.is_empty() && self.reports.is_empty()
    }
}

/// Computes effective visibility from the grant store and the catalog.
///
/// Stateless between calls: every resolution is a pure function of the store
/// snapshot at call time plus the clock's "now" (grant expiry is evaluated at
/// resolution time). No per-user result is ever cached.
pub struct AccessResolver<C, G> {
    catalog: C,
    grants: G,
    clock: Arc<dyn Clock>,
}

impl<C, G> AccessResolver<C, G>
where
    C: CatalogReader,
    G: GrantReader,
{
    pub fn new(catalog: C, grants: G, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            grants,
            clock,
        }
    }

    /// Everything the user may see, as a pruned copy of the hierarchy.
    pub fn resolve_accessible_catalog(&self, identity: &Identity) -> ResolvedCatalog {
        match identity.access_gate() {
            AccessGate::Denied => ResolvedCatalog::empty(),
            AccessGate::FullCatalog => self.full_active_catalog(),
            AccessGate::GrantEvaluation => self.granted_catalog(identity.user_id),
        }
    }

    /// Membership test for a single report.
    ///
    /// Does the same work as [`Self::resolve_accessible_catalog`] for one
    /// report only: O(user grants + report departments), never O(catalog).
    pub fn can_access_report(&self, identity: &Identity, report_id: ReportId) -> bool {
        match identity.access_gate() {
            AccessGate::Denied => false,
            AccessGate::FullCatalog => self.active_chain(report_id).is_some(),
            AccessGate::GrantEvaluation => !self.grant_paths(identity.user_id, report_id).is_empty(),
        }
    }

    /// Why the user can (or cannot) open the report. Admin-facing.
    pub fn explain_report_access(&self, identity: &Identity, report_id: ReportId) -> AccessExplanation {
        let (allowed, paths, reason) = match identity.access_gate() {
            AccessGate::Denied => {
                let reason = if let Some(expired) = &identity.expired_reason {
                    format!("account is expired: {expired}")
                } else if identity.is_locked_out {
                    "account is locked out".to_string()
                } else {
                    "account is deactivated".to_string()
                };
                (false, Vec::new(), reason)
            }
            AccessGate::FullCatalog => {
                if self.active_chain(report_id).is_some() {
                    (
                        true,
                        vec![AccessPath::AdminBypass],
                        "administrator: full active catalog".to_string(),
                    )
                } else {
                    (
                        false,
                        Vec::new(),
                        "report is missing or deactivated (itself or an ancestor)".to_string(),
                    )
                }
            }
            AccessGate::GrantEvaluation => {
                let paths = self.grant_paths(identity.user_id, report_id);
                if paths.is_empty() {
                    let reason = if self.active_chain(report_id).is_none() {
                        "report is missing or deactivated (itself or an ancestor)".to_string()
                    } else {
                        "no effective grant covers this report".to_string()
                    };
                    (false, paths, reason)
                } else {
                    let reason = format!("{} independent grant path(s)", paths.len());
                    (true, paths, reason)
                }
            }
        };

        AccessExplanation {
            user_id: identity.user_id,
            report_id,
            allowed,
            paths,
            reason,
        }
    }

    /// All active content: the administrator view. Ancestor gating still
    /// applies — a report under a deactivated group is not active content.
    fn full_active_catalog(&self) -> ResolvedCatalog {
        let mut hubs: Vec<Hub> = self
            .catalog
            .hubs()
            .into_iter()
            .filter(|hub| hub.is_active)
            .collect();

        let hub_ids: HashSet<_> = hubs.iter().map(|hub| hub.id).collect();
        let mut groups: Vec<ReportGroup> = self
            .catalog
            .report_groups()
            .into_iter()
            .filter(|group| group.is_active && hub_ids.contains(&group.hub_id))
            .collect();

        let group_ids: HashSet<_> = groups.iter().map(|group| group.id).collect();
        let mut reports: Vec<Report> = self
            .catalog
            .reports()
            .into_iter()
            .filter(|report| report.is_active && group_ids.contains(&report.report_group_id))
            .collect();

        sort_siblings(&mut hubs, &mut groups, &mut reports);
        ResolvedCatalog {
            hubs,
            groups,
            reports,
        }
    }

    /// Grant-evaluated view: union the four candidate paths, then pass every
    /// candidate through the uniform ancestor-activity chain.
    fn granted_catalog(&self, user_id: UserId) -> ResolvedCatalog {
        let now = self.clock.now();
        let candidates = self.candidate_report_ids(user_id, now);

        let mut reports = Vec::new();
        let mut hubs = Vec::new();
        let mut groups = Vec::new();
        let mut seen_hubs = HashSet::new();
        let mut seen_groups = HashSet::new();

        for report_id in candidates {
            let Some((report, group, hub)) = self.active_chain(report_id) else {
                continue;
            };
            if seen_groups.insert(group.id) {
                groups.push(group);
            }
            if seen_hubs.insert(hub.id) {
                hubs.push(hub);
            }
            reports.push(report);
        }

        sort_siblings(&mut hubs, &mut groups, &mut reports);
        ResolvedCatalog {
            hubs,
            groups,
            reports,
        }
    }

    /// Union of the four grant paths. Expired grants are inert; grants whose
    /// target has vanished are skipped without failing the resolution.
    fn candidate_report_ids(&self, user_id: UserId, now: DateTime<Utc>) -> HashSet<ReportId> {
        let mut candidates = HashSet::new();

        for grant in self.grants.grants_for_user(user_id) {
            if !grant.is_effective_at(now) {
                continue;
            }

            match grant.target {
                GrantTarget::Report(report_id) => {
                    candidates.insert(report_id);
                }
                GrantTarget::ReportGroup(group_id) => {
                    let Some(group) = self.catalog.report_group(group_id) else {
                        tracing::debug!(%group_id, "group grant references missing target; skipped");
                        continue;
                    };
                    if !group.is_active {
                        continue;
                    }
                    candidates.extend(self.catalog.reports_in_group(group.id).iter().map(|r| r.id));
                }
                GrantTarget::Hub(hub_id) => {
                    let Some(hub) = self.catalog.hub(hub_id) else {
                        tracing::debug!(%hub_id, "hub grant references missing target; skipped");
                        continue;
                    };
                    if !hub.is_active {
                        continue;
                    }
                    for group in self.catalog.groups_in_hub(hub.id) {
                        if !group.is_active {
                            continue;
                        }
                        candidates.extend(self.catalog.reports_in_group(group.id).iter().map(|r| r.id));
                    }
                }
                GrantTarget::Department(department_id) => {
                    let Some(department) = self.catalog.department(department_id) else {
                        tracing::debug!(%department_id, "membership references missing department; skipped");
                        continue;
                    };
                    if !department.is_active {
                        continue;
                    }
                    candidates.extend(self.catalog.department_reports(department.id));
                }
            }
        }

        candidates
    }

    /// Every effective grant path covering one report. Empty when the report
    /// or any ancestor is inactive/missing, whatever grants exist.
    fn grant_paths(&self, user_id: UserId, report_id: ReportId) -> Vec<AccessPath> {
        let Some((_, group, hub)) = self.active_chain(report_id) else {
            return Vec::new();
        };

        let report_departments: HashSet<DepartmentId> =
            self.catalog.report_departments(report_id).into_iter().collect();
        let now = self.clock.now();
        let mut paths = Vec::new();

        for grant in self.grants.grants_for_user(user_id) {
            if !grant.is_effective_at(now) {
                continue;
            }

            match grant.target {
                GrantTarget::Report(id) if id == report_id => {
                    paths.push(AccessPath::DirectGrant);
                }
                GrantTarget::ReportGroup(id) if id == group.id => {
                    paths.push(AccessPath::GroupGrant { group_id: id });
                }
                GrantTarget::Hub(id) if id == hub.id => {
                    paths.push(AccessPath::HubGrant { hub_id: id });
                }
                GrantTarget::Department(id) if report_departments.contains(&id) => {
                    let department_active = self
                        .catalog
                        .department(id)
                        .is_some_and(|department| department.is_active);
                    if department_active {
                        paths.push(AccessPath::DepartmentMembership { department_id: id });
                    }
                }
                _ => {}
            }
        }

        paths
    }

    /// The report with its group and hub, iff all three are present and
    /// active. Ancestor gating in one place.
    fn active_chain(&self, report_id: ReportId) -> Option<(Report, ReportGroup, Hub)> {
        let report = self.catalog.report(report_id)?;
        if !report.is_active {
            return None;
        }
        let group = self.catalog.report_group(report.report_group_id)?;
        if !group.is_active {
            return None;
        }
        let hub = self.catalog.hub(group.hub_id)?;
        if !hub.is_active {
            return None;
        }
        Some((report, group, hub))
    }
}

fn sort_siblings(hubs: &mut [Hub], groups: &mut [ReportGroup], reports: &mut [Report]) {
    hubs.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
    groups.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
    reports.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::RwLock;

    use chrono::{Duration, Utc};

    use reporthub_catalog::{Department, EmbedConfig, PowerBiEmbed};
    use reporthub_core::{HubId, ManualClock, ReportGroupId};
    use reporthub_grants::Grant;

    use super::*;

    #[derive(Default)]
    struct FakeCatalog {
        inner: RwLock<CatalogData>,
    }

    #[derive(Default)]
    struct CatalogData {
        hubs: HashMap<HubId, Hub>,
        groups: HashMap<ReportGroupId, ReportGroup>,
        reports: HashMap<ReportId, Report>,
        departments: HashMap<DepartmentId, Department>,
        report_departments: HashMap<ReportId, Vec<DepartmentId>>,
    }

    impl CatalogReader for FakeCatalog {
        fn hub(&self, id: HubId) -> Option<Hub> {
            self.inner.read().unwrap().hubs.get(&id).cloned()
        }

        fn report_group(&self, id: ReportGroupId) -> Option<ReportGroup> {
            self.inner.read().unwrap().groups.get(&id).cloned()
        }

        fn report(&self, id: ReportId) -> Option<Report> {
            self.inner.read().unwrap().reports.get(&id).cloned()
        }

        fn department(&self, id: DepartmentId) -> Option<Department> {
            self.inner.read().unwrap().departments.get(&id).cloned()
        }

        fn hubs(&self) -> Vec<Hub> {
            self.inner.read().unwrap().hubs.values().cloned().collect()
        }

        fn report_groups(&self) -> Vec<ReportGroup> {
            self.inner.read().unwrap().groups.values().cloned().collect()
        }

        fn reports(&self) -> Vec<Report> {
            self.inner.read().unwrap().reports.values().cloned().collect()
        }

        fn departments(&self) -> Vec<Department> {
            self.inner.read().unwrap().departments.values().cloned().collect()
        }

        fn groups_in_hub(&self, hub_id: HubId) -> Vec<ReportGroup> {
            self.inner
                .read()
                .unwrap()
                .groups
                .values()
                .filter(|group| group.hub_id == hub_id)
                .cloned()
                .collect()
        }

        fn reports_in_group(&self, group_id: ReportGroupId) -> Vec<Report> {
            self.inner
                .read()
                .unwrap()
                .reports
                .values()
                .filter(|report| report.report_group_id == group_id)
                .cloned()
                .collect()
        }

        fn report_departments(&self, report_id: ReportId) -> Vec<DepartmentId> {
            self.inner
                .read()
                .unwrap()
                .report_departments
                .get(&report_id)
                .cloned()
                .unwrap_or_default()
        }

        fn department_reports(&self, department_id: DepartmentId) -> Vec<ReportId> {
            self.inner
                .read()
                .unwrap()
                .report_departments
                .iter()
                .filter(|(_, departments)| departments.contains(&department_id))
                .map(|(report_id, _)| *report_id)
                .collect()
        }
    }

    #[derive(Default)]
    struct FakeGrants {
        inner: RwLock<Vec<Grant>>,
    }

    impl GrantReader for FakeGrants {
        fn grants_for_user(&self, user_id: UserId) -> Vec<Grant> {
            self.inner
                .read()
                .unwrap()
                .iter()
                .filter(|grant| grant.user_id == user_id)
                .cloned()
                .collect()
        }
    }

    struct World {
        catalog: Arc<FakeCatalog>,
        grants: Arc<FakeGrants>,
        clock: Arc<ManualClock>,
    }

    impl World {
        fn new() -> Self {
            Self {
                catalog: Arc::new(FakeCatalog::default()),
                grants: Arc::new(FakeGrants::default()),
                clock: Arc::new(ManualClock::new(Utc::now())),
            }
        }

        fn resolver(&self) -> AccessResolver<Arc<FakeCatalog>, Arc<FakeGrants>> {
            AccessResolver::new(
                self.catalog.clone(),
                self.grants.clone(),
                self.clock.clone() as Arc<dyn Clock>,
            )
        }

        fn add_hub(&self, sort_order: i32) -> HubId {
            let hub = Hub::new(HubId::new(), "HUB", "Hub", sort_order).unwrap();
            let id = hub.id;
            self.catalog.inner.write().unwrap().hubs.insert(id, hub);
            id
        }

        fn add_group(&self, hub_id: HubId, sort_order: i32) -> ReportGroupId {
            let group = ReportGroup::new(ReportGroupId::new(), hub_id, "GRP", "Group", sort_order).unwrap();
            let id = group.id;
            self.catalog.inner.write().unwrap().groups.insert(id, group);
            id
        }

        fn add_report(&self, group_id: ReportGroupId, sort_order: i32) -> ReportId {
            let report = Report::new(
                ReportId::new(),
                group_id,
                "RPT",
                "Report",
                sort_order,
                EmbedConfig::PowerBi(PowerBiEmbed::default()),
            )
            .unwrap();
            let id = report.id;
            self.catalog.inner.write().unwrap().reports.insert(id, report);
            id
        }

        fn add_department(&self) -> DepartmentId {
            let department = Department::new(DepartmentId::new(), "DEP", "Department").unwrap();
            let id = department.id;
            self.catalog.inner.write().unwrap().departments.insert(id, department);
            id
        }

        fn associate(&self, report_id: ReportId, department_id: DepartmentId) {
            self.catalog
                .inner
                .write()
                .unwrap()
                .report_departments
                .entry(report_id)
                .or_default()
                .push(department_id);
        }

        fn set_group_active(&self, group_id: ReportGroupId, active: bool) {
            if let Some(group) = self.catalog.inner.write().unwrap().groups.get_mut(&group_id) {
                group.is_active = active;
            }
        }

        fn set_hub_active(&self, hub_id: HubId, active: bool) {
            if let Some(hub) = self.catalog.inner.write().unwrap().hubs.get_mut(&hub_id) {
                hub.is_active = active;
            }
        }

        fn set_department_active(&self, department_id: DepartmentId, active: bool) {
            if let Some(department) = self
                .catalog
                .inner
                .write()
                .unwrap()
                .departments
                .get_mut(&department_id)
            {
                department.is_active = active;
            }
        }

        fn grant(&self, user_id: UserId, target: GrantTarget) {
            self.grant_expiring(user_id, target, None);
        }

        fn grant_expiring(
            &self,
            user_id: UserId,
            target: GrantTarget,
            expires_at: Option<chrono::DateTime<Utc>>,
        ) {
            let grant =
                Grant::new(user_id, target, UserId::new(), self.clock.now(), expires_at).unwrap();
            self.grants.inner.write().unwrap().push(grant);
        }

        fn revoke(&self, user_id: UserId, target: GrantTarget) {
            self.grants
                .inner
                .write()
                .unwrap()
                .retain(|grant| !(grant.user_id == user_id && grant.target == target));
        }

        /// One hub → one group → one report.
        fn simple_chain(&self) -> (HubId, ReportGroupId, ReportId) {
            let hub_id = self.add_hub(1);
            let group_id = self.add_group(hub_id, 1);
            let report_id = self.add_report(group_id, 1);
            (hub_id, group_id, report_id)
        }
    }

    #[test]
    fn admin_sees_full_active_catalog_regardless_of_grants() {
        let world = World::new();
        let (_, _, report_id) = world.simple_chain();
        let admin = Identity::admin(UserId::new());

        // No grants exist at all.
        let resolved = world.resolver().resolve_accessible_catalog(&admin);
        assert_eq!(resolved.reports.len(), 1);
        assert_eq!(resolved.reports[0].id, report_id);
        assert_eq!(resolved.hubs.len(), 1);
        assert_eq!(resolved.groups.len(), 1);
    }

    #[test]
    fn admin_view_excludes_content_under_inactive_ancestors() {
        let world = World::new();
        let (_, group_id, _) = world.simple_chain();
        world.set_group_active(group_id, false);

        let resolved = world
            .resolver()
            .resolve_accessible_catalog(&Identity::admin(UserId::new()));
        assert!(resolved.reports.is_empty());
        assert!(resolved.groups.is_empty());
        // The hub itself is still active content.
        assert_eq!(resolved.hubs.len(), 1);
    }

    #[test]
    fn expired_user_resolves_empty_even_with_grants() {
        let world = World::new();
        let (_, _, report_id) = world.simple_chain();
        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Report(report_id));

        let identity = Identity {
            expired_reason: Some("contract ended".to_string()),
            ..Identity::member(user_id)
        };

        assert!(world.resolver().resolve_accessible_catalog(&identity).is_empty());
        assert!(!world.resolver().can_access_report(&identity, report_id));
    }

    #[test]
    fn locked_out_user_resolves_empty_even_with_grants() {
        let world = World::new();
        let (hub_id, _, report_id) = world.simple_chain();
        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Hub(hub_id));

        let identity = Identity {
            is_locked_out: true,
            ..Identity::member(user_id)
        };

        assert!(world.resolver().resolve_accessible_catalog(&identity).is_empty());
        assert!(!world.resolver().can_access_report(&identity, report_id));
    }

    #[test]
    fn each_grant_path_independently_grants_the_report() {
        let paths: [fn(&World, (HubId, ReportGroupId, ReportId), UserId); 4] = [
            |world, (_, _, report_id), user| world.grant(user, GrantTarget::Report(report_id)),
            |world, (_, group_id, _), user| world.grant(user, GrantTarget::ReportGroup(group_id)),
            |world, (hub_id, _, _), user| world.grant(user, GrantTarget::Hub(hub_id)),
            |world, (_, _, report_id), user| {
                let department_id = world.add_department();
                world.associate(report_id, department_id);
                world.grant(user, GrantTarget::Department(department_id));
            },
        ];

        for setup in paths {
            let world = World::new();
            let chain = world.simple_chain();
            let user_id = UserId::new();
            setup(&world, chain, user_id);

            let identity = Identity::member(user_id);
            assert!(world.resolver().can_access_report(&identity, chain.2));

            let resolved = world.resolver().resolve_accessible_catalog(&identity);
            assert_eq!(resolved.reports.len(), 1);
            assert_eq!(resolved.groups.len(), 1);
            assert_eq!(resolved.hubs.len(), 1);
        }
    }

    #[test]
    fn revoking_one_path_keeps_access_through_another() {
        let world = World::new();
        let (hub_id, _, report_id) = world.simple_chain();
        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Report(report_id));
        world.grant(user_id, GrantTarget::Hub(hub_id));

        let identity = Identity::member(user_id);
        assert!(world.resolver().can_access_report(&identity, report_id));

        world.revoke(user_id, GrantTarget::Report(report_id));
        assert!(world.resolver().can_access_report(&identity, report_id));

        world.revoke(user_id, GrantTarget::Hub(hub_id));
        assert!(!world.resolver().can_access_report(&identity, report_id));
    }

    #[test]
    fn grant_ceases_at_the_instant_it_lapses() {
        let world = World::new();
        let (_, _, report_id) = world.simple_chain();
        let user_id = UserId::new();
        let expires_at = world.clock.now() + Duration::hours(1);
        world.grant_expiring(user_id, GrantTarget::Report(report_id), Some(expires_at));

        let identity = Identity::member(user_id);
        assert!(world.resolver().can_access_report(&identity, report_id));

        // One second before expiry: still visible.
        world.clock.set(expires_at - Duration::seconds(1));
        assert!(world.resolver().can_access_report(&identity, report_id));

        // At the instant of expiry: gone.
        world.clock.set(expires_at);
        assert!(!world.resolver().can_access_report(&identity, report_id));
        assert!(world.resolver().resolve_accessible_catalog(&identity).is_empty());
    }

    #[test]
    fn deactivating_the_group_hides_a_directly_granted_report() {
        let world = World::new();
        let (_, group_id, report_id) = world.simple_chain();
        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Report(report_id));

        let identity = Identity::member(user_id);
        assert!(world.resolver().can_access_report(&identity, report_id));

        world.set_group_active(group_id, false);
        assert!(!world.resolver().can_access_report(&identity, report_id));
        assert!(world.resolver().resolve_accessible_catalog(&identity).is_empty());

        // Reactivation restores visibility; the grant itself was untouched.
        world.set_group_active(group_id, true);
        assert!(world.resolver().can_access_report(&identity, report_id));
    }

    #[test]
    fn deactivating_the_hub_hides_group_granted_reports() {
        let world = World::new();
        let (hub_id, group_id, report_id) = world.simple_chain();
        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::ReportGroup(group_id));

        let identity = Identity::member(user_id);
        assert!(world.resolver().can_access_report(&identity, report_id));

        world.set_hub_active(hub_id, false);
        assert!(!world.resolver().can_access_report(&identity, report_id));
    }

    #[test]
    fn grant_referencing_a_vanished_target_is_silently_skipped() {
        let world = World::new();
        let (_, _, report_id) = world.simple_chain();
        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Report(report_id));
        // Dangling grants: targets that were deleted after granting.
        world.grant(user_id, GrantTarget::ReportGroup(ReportGroupId::new()));
        world.grant(user_id, GrantTarget::Hub(HubId::new()));
        world.grant(user_id, GrantTarget::Department(DepartmentId::new()));

        let identity = Identity::member(user_id);
        let resolved = world.resolver().resolve_accessible_catalog(&identity);
        assert_eq!(resolved.reports.len(), 1);
        assert_eq!(resolved.reports[0].id, report_id);
    }

    #[test]
    fn inactive_department_contributes_no_visibility() {
        let world = World::new();
        let (_, _, report_id) = world.simple_chain();
        let department_id = world.add_department();
        world.associate(report_id, department_id);

        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Department(department_id));
        world.set_department_active(department_id, false);

        let identity = Identity::member(user_id);
        assert!(!world.resolver().can_access_report(&identity, report_id));
        assert!(world.resolver().resolve_accessible_catalog(&identity).is_empty());
    }

    #[test]
    fn hierarchy_is_derived_from_visible_reports_only() {
        let world = World::new();
        let hub_id = world.add_hub(1);
        let granted_group = world.add_group(hub_id, 1);
        let other_group = world.add_group(hub_id, 2);
        let granted_report = world.add_report(granted_group, 1);
        let _other_report = world.add_report(other_group, 1);

        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Report(granted_report));

        let resolved = world
            .resolver()
            .resolve_accessible_catalog(&Identity::member(user_id));
        assert_eq!(resolved.reports.len(), 1);
        assert_eq!(resolved.groups.len(), 1);
        assert_eq!(resolved.groups[0].id, granted_group);
        assert_eq!(resolved.hubs.len(), 1);
        assert!(resolved.groups.iter().all(|group| group.id != other_group));
    }

    #[test]
    fn siblings_are_ordered_by_sort_order() {
        let world = World::new();
        let hub_id = world.add_hub(1);
        let group_id = world.add_group(hub_id, 1);
        let late = world.add_report(group_id, 9);
        let early = world.add_report(group_id, 1);
        let middle = world.add_report(group_id, 5);

        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::ReportGroup(group_id));

        let resolved = world
            .resolver()
            .resolve_accessible_catalog(&Identity::member(user_id));
        let order: Vec<ReportId> = resolved.reports.iter().map(|report| report.id).collect();
        assert_eq!(order, vec![early, middle, late]);
    }

    #[test]
    fn explanation_lists_every_independent_path() {
        let world = World::new();
        let (hub_id, _, report_id) = world.simple_chain();
        let user_id = UserId::new();
        world.grant(user_id, GrantTarget::Report(report_id));
        world.grant(user_id, GrantTarget::Hub(hub_id));

        let explanation = world
            .resolver()
            .explain_report_access(&Identity::member(user_id), report_id);
        assert!(explanation.allowed);
        assert_eq!(explanation.paths.len(), 2);
        assert!(explanation.paths.contains(&AccessPath::DirectGrant));
        assert!(explanation.paths.contains(&AccessPath::HubGrant { hub_id }));
    }

    #[test]
    fn explanation_for_denied_accounts_names_the_gate() {
        let world = World::new();
        let (_, _, report_id) = world.simple_chain();

        let identity = Identity {
            expired_reason: Some("left the company".to_string()),
            ..Identity::member(UserId::new())
        };

        let explanation = world.resolver().explain_report_access(&identity, report_id);
        assert!(!explanation.allowed);
        assert!(explanation.paths.is_empty());
        assert!(explanation.reason.contains("expired"));
    }

    #[test]
    fn explanation_for_admin_is_the_bypass_path() {
        let world = World::new();
        let (_, _, report_id) = world.simple_chain();

        let explanation = world
            .resolver()
            .explain_report_access(&Identity::admin(UserId::new()), report_id);
        assert!(explanation.allowed);
        assert_eq!(explanation.paths, vec![AccessPath::AdminBypass]);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Adding grants can only grow the visible report set.
            #[test]
            fn adding_grants_never_shrinks_visibility(
                report_count in 1usize..8,
                base_mask in proptest::collection::vec(any::<bool>(), 8),
                extra_mask in proptest::collection::vec(any::<bool>(), 8),
            ) {
                let world = World::new();
                let hub_id = world.add_hub(1);
                let group_id = world.add_group(hub_id, 1);
                let reports: Vec<ReportId> = (0..report_count)
                    .map(|i| world.add_report(group_id, i as i32))
                    .collect();

                let user_id = UserId::new();
                for (report_id, granted) in reports.iter().zip(&base_mask) {
                    if *granted {
                        world.grant(user_id, GrantTarget::Report(*report_id));
                    }
                }

                let identity = Identity::member(user_id);
                let before: HashSet<ReportId> = world
                    .resolver()
                    .resolve_accessible_catalog(&identity)
                    .reports
                    .iter()
                    .map(|report| report.id)
                    .collect();

                for (report_id, granted) in reports.iter().zip(&extra_mask) {
                    if *granted {
                        world.grant(user_id, GrantTarget::Report(*report_id));
                    }
                }

                let after: HashSet<ReportId> = world
                    .resolver()
                    .resolve_accessible_catalog(&identity)
                    .reports
                    .iter()
                    .map(|report| report.id)
                    .collect();

                prop_assert!(before.is_subset(&after));
            }

            /// The deny gate dominates any combination of grants.
            #[test]
            fn gate_dominates_grants(
                report_count in 1usize..8,
                grant_mask in proptest::collection::vec(any::<bool>(), 8),
                locked_out in any::<bool>(),
            ) {
                let world = World::new();
                let hub_id = world.add_hub(1);
                let group_id = world.add_group(hub_id, 1);
                let reports: Vec<ReportId> = (0..report_count)
                    .map(|i| world.add_report(group_id, i as i32))
                    .collect();

                let user_id = UserId::new();
                world.grant(user_id, GrantTarget::Hub(hub_id));
                for (report_id, granted) in reports.iter().zip(&grant_mask) {
                    if *granted {
                        world.grant(user_id, GrantTarget::Report(*report_id));
                    }
                }

                let identity = Identity {
                    is_locked_out: locked_out,
                    expired_reason: if locked_out { None } else { Some("expired".to_string()) },
                    ..Identity::member(user_id)
                };

                prop_assert!(world.resolver().resolve_accessible_catalog(&identity).is_empty());
                for report_id in &reports {
                    prop_assert!(!world.resolver().can_access_report(&identity, *report_id));
                }
            }
        }
    }
}
