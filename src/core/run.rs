//! A running simulation: thread ownership, observation and final report.

use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use super::audit::AuditSink;
use super::clock::TickClock;
use super::error::SchedulerError;
use super::instance::spawn_instance;
use super::party_pool::{PartyPool, PoolCounts};
use super::sampler::{DurationBounds, DurationSampler};
use super::scheduler::Scheduler;
use super::state::{RunSnapshot, Shared};
use crate::config::RunConfig;
use crate::util::{InstanceId, RunId};

/// Lifetime totals for one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSummary {
    /// Instance identifier.
    pub id: InstanceId,
    /// Parties run to completion.
    pub parties_served: u64,
    /// Sum of the durations of every completed party, in ticks.
    pub total_time_served: u64,
}

/// Final statistics, produced once every thread has been joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier.
    pub run_id: RunId,
    /// Pool at startup.
    pub initial: PoolCounts,
    /// Players never placed in a party.
    pub leftover: PoolCounts,
    /// Every instance in ascending id order.
    pub instances: Vec<InstanceSummary>,
}

impl RunReport {
    /// Total parties run across all instances.
    #[must_use]
    pub fn parties_formed(&self) -> u64 {
        self.instances.iter().map(|i| i.parties_served).sum()
    }

    /// Total ticks served across all instances.
    #[must_use]
    pub fn total_time_served(&self) -> u64 {
        self.instances.iter().map(|i| i.total_time_served).sum()
    }
}

/// Cloneable read-only handle onto a run's state.
#[derive(Clone)]
pub struct RunObserver {
    shared: Arc<Shared>,
}

impl RunObserver {
    /// Consistent snapshot of every instance and the pool.
    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        self.shared.snapshot()
    }

    /// Whether the scheduler has raised the stop signal.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }
}

impl fmt::Debug for RunObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunObserver")
            .field("run_id", &self.shared.run_id)
            .field("stopped", &self.shared.is_stopped())
            .finish()
    }
}

/// One scheduler thread plus one thread per instance.
///
/// The run ends on its own once no party can be formed and no instance is
/// busy; [`join`](Self::join) waits for that and returns the report. Dropping
/// the handle without joining detaches the threads, which still finish.
pub struct DungeonRun {
    shared: Arc<Shared>,
    initial: PoolCounts,
    scheduler: Option<JoinHandle<()>>,
    workers: Vec<JoinHandle<()>>,
}

impl DungeonRun {
    /// Validate `config`, then spawn every instance thread and the scheduler.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidConfig` if the configuration is invalid
    /// - `SchedulerError::Spawn` if the OS refuses a thread; threads already
    ///   started are stopped and joined first
    pub fn start(
        config: &RunConfig,
        clock: Arc<dyn TickClock>,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;
        let bounds = DurationBounds {
            min_ticks: config.min_duration,
            max_ticks: config.max_duration,
        };
        let sampler = config.seed.map_or_else(
            || DurationSampler::new(bounds),
            |seed| DurationSampler::seeded(bounds, seed),
        );

        let initial = PoolCounts::new(config.tanks, config.healers, config.dps);
        let run_id = RunId::new();
        let shared = Arc::new(Shared::new(
            run_id,
            PartyPool::new(initial),
            config.instance_count,
            audit,
        ));
        let span = info_span!("dungeon_run", run_id = %run_id);

        let mut workers = Vec::with_capacity(config.instance_count);
        for index in 0..config.instance_count {
            match spawn_instance(index, Arc::clone(&shared), Arc::clone(&clock), span.clone()) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    abort_workers(&shared, workers);
                    return Err(e);
                }
            }
        }

        let scheduler = Scheduler::new(
            Arc::clone(&shared),
            sampler,
            config.policy,
            Duration::from_millis(config.retry_interval_ms),
        );
        let scheduler = match scheduler.spawn(span) {
            Ok(handle) => handle,
            Err(e) => {
                abort_workers(&shared, workers);
                return Err(e);
            }
        };

        info!(
            run_id = %run_id,
            instances = config.instance_count,
            tanks = initial.tanks,
            healers = initial.healers,
            dps = initial.dps,
            min_duration = bounds.min_ticks,
            max_duration = bounds.max_ticks,
            "dungeon run started"
        );

        Ok(Self {
            shared,
            initial,
            scheduler: Some(scheduler),
            workers,
        })
    }

    /// Read-only handle for status displays.
    #[must_use]
    pub fn observer(&self) -> RunObserver {
        RunObserver {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Wait for the scheduler and every instance thread, then report.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ThreadPanicked` if any thread panicked. All
    /// threads are still joined before returning.
    pub fn join(mut self) -> Result<RunReport, SchedulerError> {
        let mut panicked = Vec::new();

        if let Some(scheduler) = self.scheduler.take() {
            if scheduler.join().is_err() {
                warn!("scheduler thread panicked");
                panicked.push("dq-scheduler".to_string());
                // Release the workers the scheduler can no longer stop.
                let mut guard = self.shared.state.lock();
                self.shared.raise_stop(&mut guard);
            }
        }
        for (index, worker) in self.workers.drain(..).enumerate() {
            if worker.join().is_err() {
                warn!(instance = index + 1, "instance thread panicked");
                panicked.push(format!("dq-instance-{}", index + 1));
            }
        }

        if !panicked.is_empty() {
            return Err(SchedulerError::ThreadPanicked(panicked.join(", ")));
        }

        let state = self.shared.state.lock();
        let report = RunReport {
            run_id: self.shared.run_id,
            initial: self.initial,
            leftover: state.pool.counts(),
            instances: state
                .slots
                .iter()
                .map(|slot| InstanceSummary {
                    id: slot.id,
                    parties_served: slot.parties_served,
                    total_time_served: slot.total_time_served,
                })
                .collect(),
        };
        drop(state);

        info!(
            run_id = %report.run_id,
            parties = report.parties_formed(),
            "dungeon run finished"
        );
        Ok(report)
    }
}

/// Stop and join workers spawned before a later spawn failed.
fn abort_workers(shared: &Shared, workers: Vec<JoinHandle<()>>) {
    {
        let mut guard = shared.state.lock();
        shared.raise_stop(&mut guard);
    }
    for (index, worker) in workers.into_iter().enumerate() {
        if worker.join().is_err() {
            warn!(instance = index + 1, "instance thread panicked during abort");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_abort_workers_stops_and_survives_panicked_worker() {
        let shared = Arc::new(Shared::new(
            RunId::new(),
            PartyPool::new(PoolCounts::default()),
            2,
            None,
        ));
        let failed = thread::spawn(|| panic!("worker failure"));
        let waiting = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut guard = shared.state.lock();
                shared.instance_wakes[1].wait_while(&mut guard, |_| !shared.is_stopped());
            })
        };

        abort_workers(&shared, vec![failed, waiting]);
        assert!(shared.is_stopped());
    }
}
