//! Tests for status and summary rendering

use dungeon_queue::core::{
    InstanceId, InstanceState, InstanceStatus, InstanceSummary, PoolCounts, RunId, RunReport,
    RunSnapshot,
};
use dungeon_queue::monitor::{StatusFrame, SummaryReport};

#[test]
fn test_status_frame() {
    let snapshot = RunSnapshot {
        instances: vec![
            InstanceStatus {
                id: InstanceId(1),
                state: InstanceState::Running,
                is_running: true,
                current_elapsed: 2,
                current_duration: 5,
            },
            InstanceStatus {
                id: InstanceId(2),
                state: InstanceState::Idle,
                is_running: false,
                current_elapsed: 0,
                current_duration: 0,
            },
        ],
        pool: PoolCounts::new(3, 1, 7),
        stopped: false,
    };

    let rendered = StatusFrame(&snapshot).to_string();
    assert_eq!(
        rendered,
        "[Status]\n\
         Instance 1: active (2/5)\n\
         Instance 2: empty\n\
         Leftover players: Tanks: 3, Healers: 1, DPS: 7\n"
    );
}

#[test]
fn test_assigned_instance_renders_empty_until_running() {
    let snapshot = RunSnapshot {
        instances: vec![InstanceStatus {
            id: InstanceId(1),
            state: InstanceState::Assigned,
            is_running: false,
            current_elapsed: 0,
            current_duration: 3,
        }],
        pool: PoolCounts::default(),
        stopped: false,
    };
    assert!(StatusFrame(&snapshot)
        .to_string()
        .contains("Instance 1: empty"));
}

#[test]
fn test_summary_report() {
    let report = RunReport {
        run_id: RunId::new(),
        initial: PoolCounts::new(3, 3, 9),
        leftover: PoolCounts::new(1, 1, 3),
        instances: vec![
            InstanceSummary {
                id: InstanceId(1),
                parties_served: 2,
                total_time_served: 7,
            },
            InstanceSummary {
                id: InstanceId(2),
                parties_served: 0,
                total_time_served: 0,
            },
        ],
    };

    let rendered = SummaryReport(&report).to_string();
    assert!(rendered.starts_with("=== Summary ===\n"));
    assert!(rendered.contains("Instance 1 served 2 parties, total time: 7 ticks.\n"));
    assert!(rendered.contains("Instance 2 served 0 parties, total time: 0 ticks.\n"));
    assert!(rendered.contains("Parties formed: 2\n"));
    assert!(rendered.ends_with("Leftover players: Tanks: 1, Healers: 1, DPS: 3\n"));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let snapshot = RunSnapshot {
        instances: vec![],
        pool: PoolCounts::new(1, 2, 3),
        stopped: true,
    };
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["pool"]["dps"], 3);
    assert_eq!(json["stopped"], true);
}
