//! Tests for configuration validation

use dungeon_queue::config::RunConfig;
use dungeon_queue::core::AssignmentPolicy;

#[test]
fn test_run_config_validation() {
    let valid = RunConfig::new(2, 2, 2, 6, 1, 1);
    assert!(valid.validate().is_ok());
}

#[test]
fn test_run_config_zero_everything_is_valid() {
    let valid = RunConfig::new(0, 0, 0, 0, 0, 0);
    assert!(valid.validate().is_ok());
}

#[test]
fn test_run_config_inverted_bounds() {
    let invalid = RunConfig::new(2, 2, 2, 6, 5, 4);
    let err = invalid.validate().unwrap_err();
    assert!(err.contains("max_duration"));
}

#[test]
fn test_run_config_invalid_tick() {
    let invalid = RunConfig::new(2, 2, 2, 6, 1, 1).with_tick_ms(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_run_config_invalid_retry_interval() {
    let invalid = RunConfig::new(2, 2, 2, 6, 1, 1).with_retry_interval_ms(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_run_config_invalid_status_interval() {
    let invalid = RunConfig::new(2, 2, 2, 6, 1, 1).with_status_interval_ms(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_run_config_from_json() {
    let json = r#"{
        "instance_count": 3,
        "tanks": 4,
        "healers": 4,
        "dps": 12,
        "min_duration": 1,
        "max_duration": 5
    }"#;

    let config = RunConfig::from_json_str(json).unwrap();
    assert_eq!(config.instance_count, 3);
    assert_eq!(config.tick_ms, 1000);
    assert_eq!(config.retry_interval_ms, 100);
    assert_eq!(config.policy, AssignmentPolicy::Single);
    assert_eq!(config.seed, None);
}

#[test]
fn test_run_config_from_json_with_options() {
    let json = r#"{
        "instance_count": 1,
        "tanks": 1,
        "healers": 1,
        "dps": 3,
        "min_duration": 2,
        "max_duration": 2,
        "tick_ms": 25,
        "policy": "fill_idle",
        "seed": 9
    }"#;

    let config = RunConfig::from_json_str(json).unwrap();
    assert_eq!(config.tick_ms, 25);
    assert_eq!(config.policy, AssignmentPolicy::FillIdle);
    assert_eq!(config.seed, Some(9));
}

#[test]
fn test_run_config_from_json_rejects_invalid() {
    let json = r#"{
        "instance_count": 1,
        "tanks": 1,
        "healers": 1,
        "dps": 3,
        "min_duration": 3,
        "max_duration": 2
    }"#;
    assert!(RunConfig::from_json_str(json).is_err());
}

#[test]
fn test_run_config_from_json_rejects_negative_counts() {
    let json = r#"{
        "instance_count": 1,
        "tanks": -1,
        "healers": 1,
        "dps": 3,
        "min_duration": 1,
        "max_duration": 2
    }"#;
    let err = RunConfig::from_json_str(json).unwrap_err();
    assert!(err.starts_with("parse error"));
}
