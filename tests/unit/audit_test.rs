//! Tests for audit sink

use dungeon_queue::core::{
    build_audit_event, AuditAction, AuditSink, InMemoryAuditSink, InstanceId, RunId,
    TracingAuditSink,
};

#[test]
fn test_in_memory_audit_sink() {
    let sink = InMemoryAuditSink::new(10);
    let run_id = RunId::new();

    sink.record(build_audit_event(
        0,
        run_id,
        Some(InstanceId(1)),
        AuditAction::Assigned,
        4,
        0,
    ));

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].seq, 0);
    assert_eq!(events[0].run_id, run_id);
    assert_eq!(events[0].instance, Some(InstanceId(1)));
    assert_eq!(events[0].action, AuditAction::Assigned);
    assert_eq!(events[0].duration, 4);
}

#[test]
fn test_audit_sink_overflow() {
    let sink = InMemoryAuditSink::new(2);
    let run_id = RunId::new();

    sink.record(build_audit_event(0, run_id, Some(InstanceId(1)), AuditAction::Assigned, 1, 0));
    sink.record(build_audit_event(1, run_id, Some(InstanceId(1)), AuditAction::Started, 1, 0));
    sink.record(build_audit_event(2, run_id, Some(InstanceId(1)), AuditAction::Completed, 1, 1));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, AuditAction::Started); // First one popped
    assert_eq!(events[1].action, AuditAction::Completed);
}

#[test]
fn test_events_for_filters_by_instance() {
    let sink = InMemoryAuditSink::new(16);
    let run_id = RunId::new();

    sink.record(build_audit_event(0, run_id, Some(InstanceId(1)), AuditAction::Assigned, 2, 0));
    sink.record(build_audit_event(1, run_id, Some(InstanceId(2)), AuditAction::Assigned, 3, 0));
    sink.record(build_audit_event(2, run_id, None, AuditAction::Stopped, 0, 0));

    let second = sink.events_for(InstanceId(2));
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].duration, 3);
}

#[test]
fn test_zero_capacity_sink_keeps_nothing() {
    let sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event(0, RunId::new(), None, AuditAction::Stopped, 0, 0));
    assert!(sink.events().is_empty());
}

#[test]
fn test_audit_action_display() {
    assert_eq!(AuditAction::Assigned.to_string(), "assigned");
    assert_eq!(AuditAction::Stopped.to_string(), "stopped");
}

#[test]
fn test_tracing_sink_accepts_events() {
    let sink = TracingAuditSink;
    sink.record(build_audit_event(0, RunId::new(), Some(InstanceId(4)), AuditAction::Completed, 3, 3));
}
