//! Configuration models for runs and their input sources.

pub mod run;

pub use run::{RunConfig, ENV_PREFIX};
