//! `reporthub-admin` — the admin mutation surface.
//!
//! Thin by design, but it owns every invariant the resolver relies on:
//! referenced ids are re-validated before each write, grant expiry must lie
//! in the future, re-parenting requires an active target group, reorders are
//! permutation-checked, deletions are guarded by referential integrity, and
//! multi-row writes go through single atomic store operations. Every applied
//! mutation emits an audit event.

pub mod ports;
pub mod service;

pub use ports::{CatalogStore, GrantStore};
pub use service::{AdminService, MutationOutcome};
