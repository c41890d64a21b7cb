//! Builder to start a run from configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::config::RunConfig;
use crate::core::{AuditSink, DungeonRun, RealTimeClock, SchedulerError, TickClock};

/// Collects the collaborators of a run before any thread is started.
///
/// The clock defaults to a [`RealTimeClock`] ticking every
/// `config.tick_ms` milliseconds.
pub struct RunBuilder {
    config: RunConfig,
    clock: Option<Arc<dyn TickClock>>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl RunBuilder {
    /// Start from a configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            clock: None,
            audit: None,
        }
    }

    /// Use a specific tick source.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn TickClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Configuration the run will use.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Spawn every thread; the configuration is validated by
    /// [`DungeonRun::start`].
    ///
    /// # Errors
    ///
    /// See [`DungeonRun::start`].
    pub fn start(self) -> Result<DungeonRun, SchedulerError> {
        let clock: Arc<dyn TickClock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(RealTimeClock::new(Duration::from_millis(
                self.config.tick_ms,
            ))),
        };
        DungeonRun::start(&self.config, clock, self.audit)
    }
}

/// Start a run with a real-time clock and no audit sink.
///
/// # Errors
///
/// See [`DungeonRun::start`].
pub fn start_run(config: RunConfig) -> Result<DungeonRun, SchedulerError> {
    RunBuilder::new(config).start()
}
