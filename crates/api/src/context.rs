use reporthub_auth::Identity;
use reporthub_core::UserId;

/// Authenticated identity for a request.
///
/// Inserted by the auth middleware; the caller supplies identity per call —
/// no handler reads ambient auth state.
#[derive(Debug, Clone)]
pub struct IdentityContext {
    identity: Identity,
}

impl IdentityContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }
}
