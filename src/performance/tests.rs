use std::fs;
use tempfile::TempDir;

use super::*;

fn log_in(dir: &TempDir) -> PerformanceLog {
    PerformanceLog::new(dir.path().join("performance.json"))
}

#[test]
fn history_is_empty_when_file_is_missing() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    assert_eq!(log.history("alice", "Physics").count(), 0);
    assert_eq!(log.all().count(), 0);
}

#[test]
fn record_then_history_returns_new_record_first() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);

    log.record("alice", "Physics", 1, 3).unwrap();
    log.record("alice", "Physics", 2, 3).unwrap();

    let history: Vec<PerformanceRecord> = log.history("alice", "Physics").collect();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].score, 2);
    assert_eq!(history[0].total, 3);
    assert_eq!(history[1].score, 1);
}

#[test]
fn history_filters_by_user_and_topic() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);

    log.record("alice", "Physics", 2, 3).unwrap();
    log.record("alice", "Biology", 3, 3).unwrap();
    log.record("bob", "Physics", 1, 3).unwrap();

    let history: Vec<PerformanceRecord> = log.history("alice", "Physics").collect();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user, "alice");
    assert_eq!(history[0].topic, "Physics");
    assert_eq!(history[0].score, 2);

    assert_eq!(log.history("bob", "Biology").count(), 0);
    assert_eq!(log.all().count(), 3);
}

#[test]
fn records_survive_a_reopened_log() {
    let dir = TempDir::new().unwrap();
    log_in(&dir).record("alice", "Physics", 2, 3).unwrap();

    let reopened = log_in(&dir);
    let history: Vec<PerformanceRecord> = reopened.history("alice", "Physics").collect();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score, 2);
}

#[test]
fn corrupted_file_starts_fresh_on_next_append() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("performance.json");
    fs::write(&path, "{definitely not json").unwrap();

    let log = log_in(&dir);
    assert_eq!(log.all().count(), 0);

    log.record("alice", "Physics", 2, 3).unwrap();
    assert_eq!(log.history("alice", "Physics").count(), 1);
}

#[test]
fn empty_file_is_treated_as_empty_log() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("performance.json"), "  \n").unwrap();
    let log = log_in(&dir);
    assert_eq!(log.all().count(), 0);
}

#[test]
fn record_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let log = PerformanceLog::new(dir.path().join("data").join("performance.json"));
    log.record("alice", "Physics", 2, 3).unwrap();
    assert_eq!(log.history("alice", "Physics").count(), 1);
}

#[test]
fn accuracy_handles_zero_totals() {
    let record = PerformanceRecord {
        user: "alice".to_owned(),
        topic: "Physics".to_owned(),
        timestamp: Utc::now(),
        score: 0,
        total: 0,
    };
    assert_eq!(record.accuracy(), 0.0);

    let record = PerformanceRecord {
        total: 4,
        score: 3,
        ..record
    };
    assert_eq!(record.accuracy(), 0.75);
}
