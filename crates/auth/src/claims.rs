use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use reporthub_core::UserId;

use crate::{Identity, Role};

/// Portal token claims (transport-agnostic).
///
/// This is the minimal claim set the portal expects once a token has been
/// decoded/verified by whatever transport/security layer is in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Administrator flag: the single gate for the full-catalog bypass.
    pub is_admin: bool,

    /// Account active flag.
    pub is_active: bool,

    /// Present iff the account has expired; carries the recorded reason.
    #[serde(default)]
    pub expired_reason: Option<String>,

    /// Account lockout flag.
    pub is_locked_out: bool,

    /// Roles carried for display/audit; access decisions use `is_admin`.
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl PortalClaims {
    /// Project the claims into the identity the resolver consumes.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub,
            is_admin: self.is_admin,
            is_active: self.is_active,
            expired_reason: self.expired_reason.clone(),
            is_locked_out: self.is_locked_out,
            roles: self.roles.clone(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token could not be decoded")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// is the job of a [`crate::TokenValidator`] implementation.
pub fn validate_claims(claims: &PortalClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
