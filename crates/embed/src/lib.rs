//! `reporthub-embed` — the report embed resolver.
//!
//! Turns a resolved report into a renderable embed target for one of three
//! backend technologies (Power BI interactive, SSRS/PBIRS on-premises,
//! paginated/RDL), or into a first-class "needs configuration" answer.
//!
//! The caller is expected to chain the permission resolver first; this crate
//! never checks access. [`resolve_embed`] is a pure function of the report's
//! configuration; [`EmbedService`] adds the one piece of IO in the whole
//! core — the bounded, cancellable Power BI token exchange.

pub mod descriptor;
pub mod resolve;
pub mod token;

pub use descriptor::{ConfigGap, EmbedDescriptor, EmbedResolution};
pub use resolve::resolve_embed;
pub use token::{EmbedService, EmbedToken, EmbedTokenProvider, TokenError};
