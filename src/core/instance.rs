//! Instance worker threads.
//!
//! Each instance owns one OS thread that parks on its own condvar while idle.
//! The scheduler marks the slot `Assigned` and notifies it; the worker flips
//! it to `Running`, ticks through the bound duration with the lock released
//! between ticks, then books the completion and wakes the scheduler.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::MutexGuard;
use tracing::{debug, info, warn, Span};

use super::audit::AuditAction;
use super::clock::TickClock;
use super::error::SchedulerError;
use super::state::{InstanceState, RunState, Shared};

/// Spawn the worker thread for the slot at `index`.
pub(crate) fn spawn_instance(
    index: usize,
    shared: Arc<Shared>,
    clock: Arc<dyn TickClock>,
    span: Span,
) -> Result<JoinHandle<()>, SchedulerError> {
    let name = format!("dq-instance-{}", index + 1);
    thread::Builder::new()
        .name(name.clone())
        .spawn(move || {
            let _entered = span.enter();
            instance_loop(index, &shared, clock.as_ref());
        })
        .map_err(|source| SchedulerError::Spawn {
            thread: name,
            source,
        })
}

/// Returns a slot to Idle and stops the run if its worker unwinds.
///
/// Must be created before the worker takes the state lock so that it drops
/// after the lock guard.
struct UnwindGuard<'a> {
    index: usize,
    shared: &'a Shared,
}

impl Drop for UnwindGuard<'_> {
    fn drop(&mut self) {
        if !thread::panicking() {
            return;
        }
        let mut guard = self.shared.state.lock();
        let slot = &mut guard.slots[self.index];
        warn!(instance = %slot.id, state = ?slot.state, "instance thread panicked, stopping run");
        slot.state = InstanceState::Idle;
        slot.current_elapsed = 0;
        slot.current_duration = 0;
        self.shared.raise_stop(&mut guard);
    }
}

/// Worker loop: wait for an assignment or the stop signal, run, repeat.
pub(crate) fn instance_loop(index: usize, shared: &Shared, clock: &dyn TickClock) {
    let _unwind = UnwindGuard { index, shared };
    let wake = &shared.instance_wakes[index];
    let mut guard = shared.state.lock();
    let id = guard.slots[index].id;
    debug!(instance = %id, "instance thread started");

    loop {
        wake.wait_while(&mut guard, |state| {
            state.slots[index].state != InstanceState::Assigned && !shared.is_stopped()
        });

        // An assignment always wins over stop; stop cannot be raised while
        // any slot is Assigned anyway.
        if guard.slots[index].state != InstanceState::Assigned {
            break;
        }

        run_job(index, shared, clock, &mut guard);

        // Completion frees a slot; the scheduler re-evaluates assignment and
        // termination.
        shared.scheduler_wake.notify_all();
    }

    debug!(instance = %id, "instance thread exiting");
}

/// Run the bound job to completion. Entered and left with the lock held.
fn run_job(
    index: usize,
    shared: &Shared,
    clock: &dyn TickClock,
    guard: &mut MutexGuard<'_, RunState>,
) {
    let slot = &mut guard.slots[index];
    let id = slot.id;
    let duration = slot.current_duration;
    slot.state = InstanceState::Running;
    slot.current_elapsed = 0;
    shared.record(Some(id), AuditAction::Started, duration, 0);
    info!(instance = %id, duration, "running dungeon");

    for _ in 0..duration {
        MutexGuard::unlocked(guard, || clock.tick());
        let slot = &mut guard.slots[index];
        slot.current_elapsed += 1;
        debug_assert!(slot.current_elapsed <= slot.current_duration);
    }

    let slot = &mut guard.slots[index];
    let elapsed = slot.current_elapsed;
    slot.parties_served += 1;
    slot.total_time_served += duration;
    slot.current_elapsed = 0;
    slot.current_duration = 0;
    slot.state = InstanceState::Idle;
    shared.record(Some(id), AuditAction::Completed, duration, elapsed);
    info!(instance = %id, duration, served = slot.parties_served, "dungeon completed");
}
