//! Tests for builder modules

use std::sync::Arc;

use dungeon_queue::builders::{start_run, RunBuilder};
use dungeon_queue::config::RunConfig;
use dungeon_queue::core::{PoolCounts, SchedulerError, VirtualClock};

#[test]
fn test_run_builder_keeps_config() {
    let builder = RunBuilder::new(RunConfig::new(2, 2, 2, 6, 1, 1));
    assert_eq!(builder.config().instance_count, 2);
    assert_eq!(builder.config().dps, 6);
}

#[test]
fn test_run_builder_rejects_invalid_config() {
    let result = RunBuilder::new(RunConfig::new(1, 1, 1, 3, 4, 2))
        .clock(Arc::new(VirtualClock::new()))
        .start();
    assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
}

#[test]
fn test_start_run_with_real_clock() {
    let config = RunConfig::new(1, 1, 1, 3, 2, 2)
        .with_tick_ms(1)
        .with_retry_interval_ms(1);
    let report = start_run(config).unwrap().join().unwrap();
    assert_eq!(report.parties_formed(), 1);
    assert_eq!(report.total_time_served(), 2);
    assert_eq!(report.leftover, PoolCounts::new(0, 0, 0));
}

#[test]
fn test_invalid_config_reported_once_with_validate_message() {
    let config = RunConfig::new(1, 1, 1, 3, 4, 2).with_retry_interval_ms(0);
    let expected = config.validate().unwrap_err();
    let Err(SchedulerError::InvalidConfig(message)) = RunBuilder::new(config)
        .clock(Arc::new(VirtualClock::new()))
        .start()
    else {
        panic!("expected InvalidConfig");
    };
    assert_eq!(message, expected);
}
