//! Audit trail of instance state transitions.
//!
//! Events are recorded while the run's state lock is held, so the sequence
//! number reflects the order in which transitions actually happened.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{InstanceId, RunId};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Scheduler bound a party and a duration to an idle instance.
    Assigned,
    /// Instance woke up and began running its party.
    Started,
    /// Instance finished its party and went back to idle.
    Completed,
    /// Scheduler raised the stop signal.
    Stopped,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Assigned => "assigned",
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the run's transition order, starting at 0.
    pub seq: u64,
    /// Run that produced the event.
    pub run_id: RunId,
    /// Instance involved; `None` for run-wide events.
    pub instance: Option<InstanceId>,
    /// Action taken.
    pub action: AuditAction,
    /// Bound job duration in ticks (0 for run-wide events).
    pub duration: u64,
    /// Elapsed ticks at the time of the event.
    pub elapsed: u64,
}

/// Audit sink abstraction.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: AuditEvent);
}

/// Bounded in-memory sink for testing and dev. Oldest events are dropped first.
pub struct InMemoryAuditSink {
    events: Mutex<VecDeque<AuditEvent>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(max_events.min(4096))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Events concerning one instance, in order.
    #[must_use]
    pub fn events_for(&self, instance: InstanceId) -> Vec<AuditEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.instance == Some(instance))
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink that forwards every event to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        tracing::debug!(
            seq = event.seq,
            run_id = %event.run_id,
            instance = ?event.instance,
            action = %event.action,
            duration = event.duration,
            elapsed = event.elapsed,
            "audit"
        );
    }
}

/// Helper to build an audit event from context.
#[must_use]
pub const fn build_audit_event(
    seq: u64,
    run_id: RunId,
    instance: Option<InstanceId>,
    action: AuditAction,
    duration: u64,
    elapsed: u64,
) -> AuditEvent {
    AuditEvent {
        seq,
        run_id,
        instance,
        action,
        duration,
        elapsed,
    }
}
