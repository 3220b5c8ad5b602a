//! `reporthub-grants` — access grant records.
//!
//! The grant store holds four relations (user↔hub, user↔report-group,
//! user↔report, user↔department) that are logically one relation shape,
//! modeled here as a single [`Grant`] over a [`GrantTarget`]. Expiry is
//! soft: an expired grant contributes nothing to visibility but is kept as
//! audit trail.

pub mod grant;

pub use grant::{Grant, GrantTarget};
