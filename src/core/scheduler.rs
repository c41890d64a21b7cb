//! The scheduler: sole mutator of the party pool, sole judge of termination.
//!
//! Each cycle the scheduler waits until some instance is idle (or the run is
//! stopping, or there are no instances at all), assigns according to the
//! configured [`AssignmentPolicy`], and then checks whether the run is over.
//! A cycle that assigns nothing backs off on the scheduler condvar for at most
//! `retry_interval`, so completions still cut the wait short.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, Span};

use super::audit::AuditAction;
use super::error::SchedulerError;
use super::sampler::DurationSampler;
use super::state::{InstanceState, RunState, Shared};

/// How many idle instances receive a party per scheduler cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// At most one assignment per cycle, to the lowest-id idle instance.
    #[default]
    Single,
    /// Every idle instance, in ascending id order, while parties remain.
    FillIdle,
}

impl std::str::FromStr for AssignmentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "fill_idle" | "fill-idle" => Ok(Self::FillIdle),
            other => Err(format!("unknown assignment policy `{other}`")),
        }
    }
}

/// Scheduler loop state. Runs on its own thread.
pub(crate) struct Scheduler {
    shared: Arc<Shared>,
    sampler: DurationSampler,
    policy: AssignmentPolicy,
    retry_interval: Duration,
}

impl Scheduler {
    pub(crate) const fn new(
        shared: Arc<Shared>,
        sampler: DurationSampler,
        policy: AssignmentPolicy,
        retry_interval: Duration,
    ) -> Self {
        Self {
            shared,
            sampler,
            policy,
            retry_interval,
        }
    }

    /// Move the scheduler onto a named thread.
    pub(crate) fn spawn(self, span: Span) -> Result<JoinHandle<()>, SchedulerError> {
        let name = "dq-scheduler".to_string();
        thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let _entered = span.enter();
                self.run();
            })
            .map_err(|source| SchedulerError::Spawn {
                thread: name,
                source,
            })
    }

    /// Cycle until the run reaches its terminal state.
    pub(crate) fn run(mut self) {
        let shared = Arc::clone(&self.shared);
        let mut guard = shared.state.lock();
        debug!(policy = ?self.policy, "scheduler started");

        loop {
            shared.scheduler_wake.wait_while(&mut guard, |state| {
                !(shared.is_stopped() || state.any_idle() || state.slots.is_empty())
            });

            if shared.is_stopped() {
                break;
            }

            let assigned = match self.policy {
                AssignmentPolicy::Single => usize::from(self.assign_next(&mut guard)),
                AssignmentPolicy::FillIdle => {
                    let mut count = 0;
                    while self.assign_next(&mut guard) {
                        count += 1;
                    }
                    count
                }
            };

            if guard.is_terminal() {
                let leftover = guard.pool.counts();
                info!(
                    tanks = leftover.tanks,
                    healers = leftover.healers,
                    dps = leftover.dps,
                    "no more parties can be formed, stopping"
                );
                shared.raise_stop(&mut guard);
                break;
            }

            if assigned == 0 {
                debug!("nothing assignable this cycle, backing off");
                let _ = shared
                    .scheduler_wake
                    .wait_for(&mut guard, self.retry_interval);
            }
        }

        debug!("scheduler exiting");
    }

    /// Bind one party to the lowest-id idle instance. Lock must be held.
    fn assign_next(&mut self, state: &mut RunState) -> bool {
        let Some(index) = state.first_idle() else {
            return false;
        };
        if !state.pool.try_consume_one_party() {
            return false;
        }

        let duration = self.sampler.sample();
        let slot = &mut state.slots[index];
        debug_assert_eq!(slot.state, InstanceState::Idle);
        slot.state = InstanceState::Assigned;
        slot.current_duration = duration;
        slot.current_elapsed = 0;
        let id = slot.id;

        self.shared
            .record(Some(id), AuditAction::Assigned, duration, 0);
        info!(instance = %id, duration, "assigning party");
        self.shared.instance_wakes[index].notify_one();
        true
    }
}
