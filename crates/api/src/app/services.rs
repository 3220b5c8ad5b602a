use std::sync::Arc;

use reporthub_access::{AccessResolver, CatalogReader, GrantReader};
use reporthub_admin::AdminService;
use reporthub_catalog::Report;
use reporthub_core::{Clock, ReportId, SystemClock, UserId};
use reporthub_embed::EmbedService;
use reporthub_events::{AuditEvent, AuditSink, InMemoryAuditLog, TracingAuditSink};
use reporthub_grants::Grant;
use reporthub_infra::{InMemoryCatalogStore, InMemoryGrantStore, UnavailableTokenProvider};

/// Audit sink for the API: keeps the in-memory log (served by the admin
/// audit endpoint) and mirrors every record to structured logs.
pub struct ApiAuditSink {
    log: Arc<InMemoryAuditLog>,
    tracing: TracingAuditSink,
}

impl AuditSink for ApiAuditSink {
    fn emit(&self, event: AuditEvent) {
        self.tracing.emit(event.clone());
        self.log.emit(event);
    }
}

type SharedCatalog = Arc<InMemoryCatalogStore>;
type SharedGrants = Arc<InMemoryGrantStore>;

/// Wired application services over the in-memory reference stores.
///
/// Persistence is an external collaborator behind the store traits; swapping
/// in a database-backed implementation only changes `build_services`.
pub struct AppServices {
    catalog: SharedCatalog,
    grants: SharedGrants,
    resolver: AccessResolver<SharedCatalog, SharedGrants>,
    admin: AdminService<SharedCatalog, SharedGrants>,
    embed: EmbedService<UnavailableTokenProvider>,
    audit_log: Arc<InMemoryAuditLog>,
}

impl AppServices {
    pub fn resolver(&self) -> &AccessResolver<SharedCatalog, SharedGrants> {
        &self.resolver
    }

    pub fn admin(&self) -> &AdminService<SharedCatalog, SharedGrants> {
        &self.admin
    }

    pub fn embed(&self) -> &EmbedService<UnavailableTokenProvider> {
        &self.embed
    }

    pub fn report(&self, report_id: ReportId) -> Option<Report> {
        self.catalog.report(report_id)
    }

    pub fn user_grants(&self, user_id: UserId) -> Vec<Grant> {
        self.grants.grants_for_user(user_id)
    }

    pub fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit_log.all()
    }
}

pub fn build_services() -> AppServices {
    let catalog: SharedCatalog = Arc::new(InMemoryCatalogStore::new());
    let grants: SharedGrants = Arc::new(InMemoryGrantStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let audit_log = Arc::new(InMemoryAuditLog::new());
    let audit: Arc<dyn AuditSink> = Arc::new(ApiAuditSink {
        log: audit_log.clone(),
        tracing: TracingAuditSink,
    });

    let resolver = AccessResolver::new(catalog.clone(), grants.clone(), clock.clone());
    let admin = AdminService::new(catalog.clone(), grants.clone(), clock, audit);
    let embed = EmbedService::new(UnavailableTokenProvider);

    AppServices {
        catalog,
        grants,
        resolver,
        admin,
        embed,
        audit_log,
    }
}
