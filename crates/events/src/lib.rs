//! `reporthub-events` — audit-worthy events emitted by the mutation surface.
//!
//! Every admin mutation that changes who can see what produces one of these
//! records. Events are facts: immutable, named with stable dotted types, and
//! pushed through an [`AuditSink`] chosen by the serving layer.

pub mod event;
pub mod sink;

pub use event::AuditEvent;
pub use sink::{AuditSink, InMemoryAuditLog, TracingAuditSink};
