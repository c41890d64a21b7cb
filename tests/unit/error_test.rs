//! Tests for error types

use dungeon_queue::core::SchedulerError;

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("tick_ms must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: tick_ms must be greater than 0"
    );
}

#[test]
fn test_spawn_error() {
    let err = SchedulerError::Spawn {
        thread: "dq-instance-3".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::OutOfMemory, "no threads left"),
    };
    assert_eq!(
        format!("{}", err),
        "failed to spawn thread `dq-instance-3`: no threads left"
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_thread_panicked_error() {
    let err = SchedulerError::ThreadPanicked("dq-scheduler".to_string());
    assert_eq!(format!("{}", err), "thread panicked: dq-scheduler");
}

#[test]
fn test_converts_into_anyhow() {
    let result: dungeon_queue::core::AppResult<()> =
        Err(SchedulerError::InvalidConfig("bad".into()).into());
    assert!(result.unwrap_err().to_string().contains("bad"));
}
