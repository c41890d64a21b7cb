//! Builders to construct runs from configuration.

pub mod run_builder;

pub use run_builder::{start_run, RunBuilder};
