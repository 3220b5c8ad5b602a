//! API-side guard for the admin mutation surface.
//!
//! The single admin gate is enforced here, before any store work; the core
//! services trust the actor they are handed and only record it for audit.

use thiserror::Error;

use reporthub_auth::AccessGate;

use crate::context::IdentityContext;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("administrator access required")]
    AdminRequired,
}

/// Require an administrator account in good standing.
///
/// Expired, locked-out and deactivated accounts fail this even when the
/// admin flag is set — the same gate the resolver applies.
pub fn ensure_admin(identity: &IdentityContext) -> Result<(), AuthzError> {
    if identity.identity().access_gate() == AccessGate::FullCatalog {
        Ok(())
    } else {
        Err(AuthzError::AdminRequired)
    }
}
