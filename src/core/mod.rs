//! Scheduling engine: party pool, instance workers, scheduler and run lifecycle.

pub mod audit;
pub mod clock;
pub mod error;
pub mod party_pool;
pub mod run;
pub mod sampler;
pub mod scheduler;
pub mod state;

mod instance;

pub use audit::{
    build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink,
};
pub use clock::{RealTimeClock, TickClock, VirtualClock};
pub use error::{AppResult, SchedulerError};
pub use party_pool::{PartyCost, PartyPool, PoolCounts, PARTY_COST};
pub use run::{DungeonRun, InstanceSummary, RunObserver, RunReport};
pub use sampler::{DurationBounds, DurationSampler};
pub use scheduler::AssignmentPolicy;
pub use state::{InstanceState, InstanceStatus, RunSnapshot};

pub use crate::util::{InstanceId, RunId};
