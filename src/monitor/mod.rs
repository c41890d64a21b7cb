//! Read-only consumers of a run: periodic status display and final summary.

pub mod render;
pub mod status;

pub use render::{StatusFrame, SummaryReport};
pub use status::StatusMonitor;
