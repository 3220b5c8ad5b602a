use serde::{Deserialize, Serialize};

use reporthub_core::UserId;

use crate::Role;

/// A fully resolved identity for access decisions.
///
/// Construction is decoupled from transport: the API layer derives this from
/// verified token claims, tests build it directly. The core trusts these
/// flags as given (they are validated upstream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub is_admin: bool,
    pub is_active: bool,
    /// Present iff the account has expired; carries the recorded reason.
    pub expired_reason: Option<String>,
    pub is_locked_out: bool,
    pub roles: Vec<Role>,
}

impl Identity {
    /// A plain active member with no special flags (test/builder convenience).
    pub fn member(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: false,
            is_active: true,
            expired_reason: None,
            is_locked_out: false,
            roles: Vec::new(),
        }
    }

    /// An active administrator.
    pub fn admin(user_id: UserId) -> Self {
        Self {
            is_admin: true,
            ..Self::member(user_id)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired_reason.is_some()
    }

    /// Classify this identity for catalog resolution.
    ///
    /// The deny gate runs first: expired or locked-out (or deactivated)
    /// accounts resolve to an empty catalog before any grant is read. Only
    /// an account that clears the gate gets the admin bypass.
    pub fn access_gate(&self) -> AccessGate {
        if self.is_expired() || self.is_locked_out || !self.is_active {
            return AccessGate::Denied;
        }
        if self.is_admin {
            return AccessGate::FullCatalog;
        }
        AccessGate::GrantEvaluation
    }
}

/// Outcome of the pre-resolution gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessGate {
    /// Expired, locked out, or deactivated: empty catalog, no grant reads.
    Denied,
    /// Active administrator: full active catalog, grant store bypassed.
    FullCatalog,
    /// Regular member: evaluate the four grant paths.
    GrantEvaluation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_admin_gets_full_catalog() {
        let identity = Identity::admin(UserId::new());
        assert_eq!(identity.access_gate(), AccessGate::FullCatalog);
    }

    #[test]
    fn regular_member_goes_to_grant_evaluation() {
        let identity = Identity::member(UserId::new());
        assert_eq!(identity.access_gate(), AccessGate::GrantEvaluation);
    }

    #[test]
    fn expired_account_is_denied_even_if_admin() {
        let identity = Identity {
            expired_reason: Some("contract ended".to_string()),
            ..Identity::admin(UserId::new())
        };
        assert_eq!(identity.access_gate(), AccessGate::Denied);
    }

    #[test]
    fn locked_out_account_is_denied() {
        let identity = Identity {
            is_locked_out: true,
            ..Identity::member(UserId::new())
        };
        assert_eq!(identity.access_gate(), AccessGate::Denied);
    }

    #[test]
    fn deactivated_account_is_denied() {
        let identity = Identity {
            is_active: false,
            ..Identity::admin(UserId::new())
        };
        assert_eq!(identity.access_gate(), AccessGate::Denied);
    }
}
