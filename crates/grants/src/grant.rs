use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reporthub_core::{
    DepartmentId, DomainError, DomainResult, GrantId, HubId, ReportGroupId, ReportId, UserId,
};

/// What a grant points at.
///
/// Typed ids make "wrong kind" targets unrepresentable; a mutation can only
/// fail on a target that does not exist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum GrantTarget {
    Hub(HubId),
    ReportGroup(ReportGroupId),
    Report(ReportId),
    /// Department membership: visibility of reports associated with the
    /// department, additive with the other paths.
    Department(DepartmentId),
}

impl GrantTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            GrantTarget::Hub(_) => "hub",
            GrantTarget::ReportGroup(_) => "report_group",
            GrantTarget::Report(_) => "report",
            GrantTarget::Department(_) => "department",
        }
    }
}

/// A single access grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub id: GrantId,
    pub user_id: UserId,
    pub target: GrantTarget,
    pub granted_at: DateTime<Utc>,
    pub granted_by: UserId,
    /// Optional soft expiry; must lie in the future at creation time.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Grant {
    /// Create a grant. Any expiry must be strictly after `granted_at`.
    pub fn new(
        user_id: UserId,
        target: GrantTarget,
        granted_by: UserId,
        granted_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if let Some(expires_at) = expires_at {
            if expires_at <= granted_at {
                return Err(DomainError::validation("expires_at must be in the future"));
            }
        }

        Ok(Self {
            id: GrantId::new(),
            user_id,
            target,
            granted_at,
            granted_by,
            expires_at,
        })
    }

    /// Whether the grant contributes to visibility at `now`.
    ///
    /// Expiry is evaluated against resolution time, not creation time. An
    /// expired grant is inert, not deleted.
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn grant_expiring(expires_at: Option<DateTime<Utc>>) -> Grant {
        Grant::new(
            UserId::new(),
            GrantTarget::Report(ReportId::new()),
            UserId::new(),
            Utc::now(),
            expires_at,
        )
        .unwrap()
    }

    #[test]
    fn grant_without_expiry_is_always_effective() {
        let grant = grant_expiring(None);
        assert!(grant.is_effective_at(Utc::now() + Duration::days(365 * 10)));
    }

    #[test]
    fn grant_is_effective_until_the_instant_it_lapses() {
        let expires_at = Utc::now() + Duration::hours(1);
        let grant = grant_expiring(Some(expires_at));

        assert!(grant.is_effective_at(expires_at - Duration::seconds(1)));
        assert!(!grant.is_effective_at(expires_at));
        assert!(!grant.is_effective_at(expires_at + Duration::seconds(1)));
    }

    #[test]
    fn past_expiry_is_rejected_at_creation() {
        let granted_at = Utc::now();
        let err = Grant::new(
            UserId::new(),
            GrantTarget::Hub(HubId::new()),
            UserId::new(),
            granted_at,
            Some(granted_at - Duration::minutes(1)),
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn target_kind_names_are_stable() {
        assert_eq!(GrantTarget::Hub(HubId::new()).kind(), "hub");
        assert_eq!(
            GrantTarget::Department(DepartmentId::new()).kind(),
            "department"
        );
    }
}
