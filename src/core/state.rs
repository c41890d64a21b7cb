//! Shared run state: one lock, one condvar per waiter, one-way stop flag.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use super::audit::{build_audit_event, AuditAction, AuditSink};
use super::party_pool::{PartyPool, PoolCounts};
use crate::util::{InstanceId, RunId};

/// Lifecycle state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    /// Waiting for a party.
    Idle,
    /// Party bound by the scheduler; the worker has not picked it up yet.
    Assigned,
    /// Worker is ticking through the job.
    Running,
}

impl InstanceState {
    /// Assigned or Running.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Assigned | Self::Running)
    }
}

/// Per-instance bookkeeping, guarded by the run's state lock.
#[derive(Debug, Clone)]
pub(crate) struct InstanceSlot {
    pub id: InstanceId,
    pub state: InstanceState,
    pub current_elapsed: u64,
    pub current_duration: u64,
    pub parties_served: u64,
    pub total_time_served: u64,
}

impl InstanceSlot {
    pub(crate) const fn new(id: InstanceId) -> Self {
        Self {
            id,
            state: InstanceState::Idle,
            current_elapsed: 0,
            current_duration: 0,
            parties_served: 0,
            total_time_served: 0,
        }
    }
}

/// Everything the scheduler and workers coordinate on.
#[derive(Debug)]
pub(crate) struct RunState {
    pub pool: PartyPool,
    /// Ordered by ascending id; index `i` holds instance `i + 1`.
    pub slots: Vec<InstanceSlot>,
}

impl RunState {
    pub(crate) fn new(pool: PartyPool, instance_count: usize) -> Self {
        let slots = (1..=instance_count)
            .map(|n| InstanceSlot::new(InstanceId(u32::try_from(n).unwrap_or(u32::MAX))))
            .collect();
        Self { pool, slots }
    }

    pub(crate) fn any_idle(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.state == InstanceState::Idle)
    }

    pub(crate) fn any_busy(&self) -> bool {
        self.slots.iter().any(|slot| slot.state.is_busy())
    }

    /// Index of the lowest-id idle instance.
    pub(crate) fn first_idle(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.state == InstanceState::Idle)
    }

    /// A party can still be formed and something exists to run it.
    pub(crate) fn more_jobs_possible(&self) -> bool {
        !self.slots.is_empty() && self.pool.has_available_party()
    }

    /// No job can ever start again and nothing is in flight.
    pub(crate) fn is_terminal(&self) -> bool {
        !self.more_jobs_possible() && !self.any_busy()
    }
}

/// State shared by the scheduler thread, every instance thread and observers.
pub(crate) struct Shared {
    pub run_id: RunId,
    pub state: Mutex<RunState>,
    pub scheduler_wake: Condvar,
    /// One condvar per instance, same indexing as `RunState::slots`.
    pub instance_wakes: Vec<Condvar>,
    /// One-way. Only written with `state` locked.
    stopped: AtomicBool,
    audit: Option<Arc<dyn AuditSink>>,
    audit_seq: AtomicU64,
}

impl Shared {
    pub(crate) fn new(
        run_id: RunId,
        pool: PartyPool,
        instance_count: usize,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> Self {
        Self {
            run_id,
            state: Mutex::new(RunState::new(pool, instance_count)),
            scheduler_wake: Condvar::new(),
            instance_wakes: (0..instance_count).map(|_| Condvar::new()).collect(),
            stopped: AtomicBool::new(false),
            audit,
            audit_seq: AtomicU64::new(0),
        }
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Raise the stop signal and wake every waiter.
    ///
    /// Takes the guard so the flag can only flip while the lock is held;
    /// waiters re-check it inside their predicates.
    pub(crate) fn raise_stop(&self, _guard: &mut RunState) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        self.record(None, AuditAction::Stopped, 0, 0);
        for wake in &self.instance_wakes {
            wake.notify_all();
        }
        self.scheduler_wake.notify_all();
    }

    /// Record an audit event. Call with the state lock held.
    pub(crate) fn record(
        &self,
        instance: Option<InstanceId>,
        action: AuditAction,
        duration: u64,
        elapsed: u64,
    ) {
        if let Some(sink) = &self.audit {
            let seq = self.audit_seq.fetch_add(1, Ordering::Relaxed);
            sink.record(build_audit_event(
                seq,
                self.run_id,
                instance,
                action,
                duration,
                elapsed,
            ));
        }
    }

    /// Consistent view of every instance and the pool, one lock acquisition.
    pub(crate) fn snapshot(&self) -> RunSnapshot {
        let state = self.state.lock();
        RunSnapshot {
            instances: state
                .slots
                .iter()
                .map(|slot| InstanceStatus {
                    id: slot.id,
                    state: slot.state,
                    is_running: slot.state == InstanceState::Running,
                    current_elapsed: slot.current_elapsed,
                    current_duration: slot.current_duration,
                })
                .collect(),
            pool: state.pool.counts(),
            stopped: self.is_stopped(),
        }
    }
}

/// Live view of one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStatus {
    /// Instance identifier.
    pub id: InstanceId,
    /// Lifecycle state.
    pub state: InstanceState,
    /// Whether a job is currently ticking.
    pub is_running: bool,
    /// Ticks elapsed in the current job.
    pub current_elapsed: u64,
    /// Duration of the current job; 0 when idle.
    pub current_duration: u64,
}

/// Point-in-time view of a run, taken under a single lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Every instance in ascending id order.
    pub instances: Vec<InstanceStatus>,
    /// Players left in the pool.
    pub pool: PoolCounts,
    /// Whether the stop signal has been raised.
    pub stopped: bool,
}

impl RunSnapshot {
    /// Number of instances currently Assigned or Running.
    #[must_use]
    pub fn busy_count(&self) -> usize {
        self.instances
            .iter()
            .filter(|status| status.state.is_busy())
            .count()
    }
}
