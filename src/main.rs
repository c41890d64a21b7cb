//! `dungeon-queue` binary.
//!
//! Reads a [`RunConfig`] from the JSON file named by the first argument, or
//! from `DUNGEON_*` environment variables (and `.env`) when no argument is
//! given. Prints a status block at the configured cadence and the summary once
//! every thread has been joined.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dungeon_queue::builders::RunBuilder;
use dungeon_queue::config::RunConfig;
use dungeon_queue::core::{AppResult, TracingAuditSink};
use dungeon_queue::monitor::{StatusFrame, StatusMonitor, SummaryReport};
use dungeon_queue::util::init_tracing;

fn load_config() -> AppResult<RunConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file `{path}`"))?;
            RunConfig::from_json_str(&raw).map_err(|e| anyhow::anyhow!("{path}: {e}"))
        }
        None => RunConfig::from_env().map_err(|e| anyhow::anyhow!(e)),
    }
}

fn main() -> AppResult<()> {
    init_tracing();
    let config = load_config()?;
    let interval = Duration::from_millis(config.status_interval_ms);

    let run = RunBuilder::new(config)
        .audit(Arc::new(TracingAuditSink))
        .start()
        .context("starting dungeon run")?;
    let monitor = StatusMonitor::spawn(run.observer(), interval, |snapshot| {
        println!("\n{}", StatusFrame(snapshot));
    })?;

    let report = run.join().context("joining dungeon run")?;
    monitor.join()?;
    println!("\n{}", SummaryReport(&report));
    Ok(())
}
