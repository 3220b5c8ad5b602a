//! Audit sinks.

use std::sync::{Arc, Mutex};

use crate::AuditEvent;

/// Destination for audit records.
///
/// Emission is fire-and-forget from the mutation surface's point of view: a
/// failing sink must not fail the mutation.
pub trait AuditSink: Send + Sync {
    fn emit(&self, event: AuditEvent);
}

impl<S> AuditSink for Arc<S>
where
    S: AuditSink + ?Sized,
{
    fn emit(&self, event: AuditEvent) {
        (**self).emit(event);
    }
}

/// In-memory audit log.
///
/// Intended for tests/dev and for serving the admin audit endpoint in the
/// reference deployment. Not bounded.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    inner: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn all(&self) -> Vec<AuditEvent> {
        self.inner.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl AuditSink for InMemoryAuditLog {
    fn emit(&self, event: AuditEvent) {
        if let Ok(mut log) = self.inner.lock() {
            log.push(event);
        }
    }
}

/// Sink that writes structured tracing records under the `audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: AuditEvent) {
        tracing::info!(
            target: "audit",
            event_type = event.event_type(),
            actor = %event.actor(),
            occurred_at = %event.occurred_at(),
            "audit event"
        );
    }
}
