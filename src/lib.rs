//! # Dungeon Queue
//!
//! A thread-per-instance party scheduler built on `parking_lot` locks and
//! condition variables.
//!
//! A finite pool of players (tanks, healers, dps) is matched into parties of
//! one tank, one healer and three dps. Each party is handed to an idle dungeon
//! instance, which runs it for a randomly sampled number of ticks. The run
//! ends by itself once no further party can be formed and no instance is busy.
//!
//! ## Components
//!
//! - **`PartyPool`**: player counts and the atomic "form one party" step
//! - **Instances**: one OS thread each, parked on a private condvar while idle
//! - **Scheduler**: the only thread that consumes from the pool; assigns to
//!   the lowest-id idle instance and decides when the run is over
//! - **`DurationSampler`**: uniform tick counts within configured bounds
//! - **`TickClock`**: real-time ticks for the binary, virtual ticks for tests
//! - **`RunObserver`** / **`StatusMonitor`**: consistent read-only snapshots
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dungeon_queue::builders::RunBuilder;
//! use dungeon_queue::config::RunConfig;
//! use dungeon_queue::core::VirtualClock;
//!
//! let config = RunConfig::new(2, 2, 2, 6, 1, 3);
//! let run = RunBuilder::new(config)
//!     .clock(Arc::new(VirtualClock::new()))
//!     .start()?;
//! let report = run.join()?;
//! assert_eq!(report.parties_formed(), 2);
//! # Ok::<(), dungeon_queue::core::SchedulerError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Scheduling engine and capacity accounting.
pub mod core;
/// Configuration models and input sources.
pub mod config;
/// Builders to start runs from configuration.
pub mod builders;
/// Status display and summary reporting.
pub mod monitor;
/// Shared utilities.
pub mod util;
