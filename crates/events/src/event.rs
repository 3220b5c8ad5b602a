use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reporthub_catalog::{CatalogEntityRef, ReorderScope};
use reporthub_core::{DepartmentId, ReportGroupId, ReportId, UserId};
use reporthub_grants::GrantTarget;

/// An audit-worthy mutation record.
///
/// Each variant carries the acting administrator, the affected rows, and
/// business time. Variants are append-only facts; do not reuse or rename
/// event types once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    AccessGranted {
        actor: UserId,
        user_id: UserId,
        target: GrantTarget,
        expires_at: Option<DateTime<Utc>>,
        occurred_at: DateTime<Utc>,
    },
    AccessRevoked {
        actor: UserId,
        user_id: UserId,
        target: GrantTarget,
        occurred_at: DateTime<Utc>,
    },
    EntityCreated {
        actor: UserId,
        entity: CatalogEntityRef,
        occurred_at: DateTime<Utc>,
    },
    EntityDeleted {
        actor: UserId,
        entity: CatalogEntityRef,
        occurred_at: DateTime<Utc>,
    },
    ActivationChanged {
        actor: UserId,
        entity: CatalogEntityRef,
        is_active: bool,
        occurred_at: DateTime<Utc>,
    },
    ReportMoved {
        actor: UserId,
        report_id: ReportId,
        from_group: ReportGroupId,
        to_group: ReportGroupId,
        occurred_at: DateTime<Utc>,
    },
    SiblingsReordered {
        actor: UserId,
        scope: ReorderScope,
        occurred_at: DateTime<Utc>,
    },
    DepartmentsReplaced {
        actor: UserId,
        report_id: ReportId,
        departments: Vec<DepartmentId>,
        occurred_at: DateTime<Utc>,
    },
}

impl AuditEvent {
    /// Stable event name (e.g. "admin.access.granted").
    pub fn event_type(&self) -> &'static str {
        match self {
            AuditEvent::AccessGranted { .. } => "admin.access.granted",
            AuditEvent::AccessRevoked { .. } => "admin.access.revoked",
            AuditEvent::EntityCreated { .. } => "admin.catalog.created",
            AuditEvent::EntityDeleted { .. } => "admin.catalog.deleted",
            AuditEvent::ActivationChanged { .. } => "admin.catalog.activation_changed",
            AuditEvent::ReportMoved { .. } => "admin.catalog.report_moved",
            AuditEvent::SiblingsReordered { .. } => "admin.catalog.reordered",
            AuditEvent::DepartmentsReplaced { .. } => "admin.catalog.departments_replaced",
        }
    }

    /// When the mutation happened (business time).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AuditEvent::AccessGranted { occurred_at, .. }
            | AuditEvent::AccessRevoked { occurred_at, .. }
            | AuditEvent::EntityCreated { occurred_at, .. }
            | AuditEvent::EntityDeleted { occurred_at, .. }
            | AuditEvent::ActivationChanged { occurred_at, .. }
            | AuditEvent::ReportMoved { occurred_at, .. }
            | AuditEvent::SiblingsReordered { occurred_at, .. }
            | AuditEvent::DepartmentsReplaced { occurred_at, .. } => *occurred_at,
        }
    }

    /// The administrator who performed the mutation.
    pub fn actor(&self) -> UserId {
        match self {
            AuditEvent::AccessGranted { actor, .. }
            | AuditEvent::AccessRevoked { actor, .. }
            | AuditEvent::EntityCreated { actor, .. }
            | AuditEvent::EntityDeleted { actor, .. }
            | AuditEvent::ActivationChanged { actor, .. }
            | AuditEvent::ReportMoved { actor, .. }
            | AuditEvent::SiblingsReordered { actor, .. }
            | AuditEvent::DepartmentsReplaced { actor, .. } => *actor,
        }
    }
}

#[cfg(test)]
mod tests {
    use reporthub_core::HubId;

    use super::*;

    #[test]
    fn event_types_are_stable() {
        let event = AuditEvent::AccessGranted {
            actor: UserId::new(),
            user_id: UserId::new(),
            target: GrantTarget::Hub(HubId::new()),
            expires_at: None,
            occurred_at: Utc::now(),
        };
        assert_eq!(event.event_type(), "admin.access.granted");
    }

    #[test]
    fn serialization_tags_the_variant() {
        let event = AuditEvent::ActivationChanged {
            actor: UserId::new(),
            entity: CatalogEntityRef::Hub(HubId::new()),
            is_active: false,
            occurred_at: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "activation_changed");
        assert_eq!(json["entity"]["kind"], "hub");
    }
}
