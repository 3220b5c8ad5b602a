//! `reporthub-auth` — identity boundary for the reporting portal.
//!
//! This crate is intentionally decoupled from HTTP and storage: it models the
//! claims the portal consumes once a token has been verified, and the pure
//! classification (deny / admin bypass / grant evaluation) the resolver
//! applies before touching any grant data.

pub mod claims;
pub mod identity;
pub mod roles;
pub mod token;

pub use claims::{PortalClaims, TokenValidationError, validate_claims};
pub use identity::{AccessGate, Identity};
pub use roles::Role;
pub use token::{Hs256TokenValidator, TokenValidator};
