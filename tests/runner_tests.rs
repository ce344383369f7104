//! Tests for the task runner.

use stepbar::progress::StepBar;
use stepbar::{Error, ProgressTask, TaskRunner};

mod common;
use common::helpers::*;

#[test]
fn test_failure_halts_and_exits() {
    let log = CallLog::new();
    let mut bar = StepBar::new()
        .total(3)
        .options(hidden_options())
        .task(log.ok("A"))
        .task(log.failing("B", "boom"))
        .task(log.ok("C"))
        .create()
        .unwrap();

    let err = bar.run().unwrap_err();
    match err {
        Error::Task { index, name, source } => {
            assert_eq!(index, 1);
            assert_eq!(name, "B");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(log.calls(), ["A", "B"]);
    assert_position(&bar, 1, 3);
    assert!(bar.is_exited());
    assert!(!bar.is_finished());
    assert_eq!(bar.pending_tasks(), 0);
}

#[test]
fn test_all_tasks_succeed() {
    let log = CallLog::new();
    let mut bar = StepBar::new()
        .total(3)
        .options(hidden_options())
        .tasks(["one", "two", "three"].map(|name| log.ok(name)))
        .create()
        .unwrap();

    bar.run().unwrap();
    assert_eq!(log.calls(), ["one", "two", "three"]);
    assert_position(&bar, 3, 3);
    assert!(bar.is_finished());
}

#[test]
fn test_tasks_pushed_after_creation() {
    let log = CallLog::new();
    let mut bar = create_hidden_bar(4);
    bar.push_task(log.ok("fetch"));
    bar.push_task(log.ok("unpack"));
    assert_eq!(bar.pending_tasks(), 2);

    bar.run().unwrap();
    assert_eq!(bar.pending_tasks(), 0);
    assert_eq!(log.calls(), ["fetch", "unpack"]);
    assert_position(&bar, 2, 4);
    assert!(!bar.is_finished());
}

#[test]
fn test_empty_task_list() {
    let mut bar = create_hidden_bar(5);
    bar.run().unwrap();
    assert_position(&bar, 0, 5);
    assert!(!bar.is_started());

    TaskRunner::new(hidden_options()).run().unwrap();
}

#[test]
fn test_recorded_error_blocks_run() {
    let log = CallLog::new();
    let mut bar = StepBar::new().task(log.ok("never"));
    assert!(bar.describe("nil").is_err());

    let err = bar.run().unwrap_err();
    assert_eq!(err.to_string(), "progress bar is nil");
    assert!(log.calls().is_empty());
}

#[test]
fn test_failing_step_halts() {
    let log = CallLog::new();
    // No widget, so the first step after a successful task fails.
    let mut bar = StepBar::new().tasks([log.ok("first"), log.ok("second")]);

    let err = bar.run().unwrap_err();
    assert!(matches!(err, Error::NilBar));
    assert_eq!(log.calls(), ["first"]);
}

#[test]
fn test_runner_sizes_bar_to_tasks() {
    let log = CallLog::new();
    let runner = TaskRunner::new(hidden_options())
        .task(log.ok("a"))
        .task(log.ok("b"));
    assert_eq!(runner.len(), 2);
    runner.run().unwrap();
    assert_eq!(log.calls(), ["a", "b"]);
}

#[test]
fn test_unnamed_task_label() {
    let err = TaskRunner::new(hidden_options())
        .task(ProgressTask::infallible(|| {}))
        .task(ProgressTask::new(|| Err(std::io::Error::other("denied"))))
        .run()
        .unwrap_err();
    assert_eq!(err.to_string(), "task #1 failed: denied");
}

#[test]
fn test_tasks_capture_arguments() {
    use std::sync::{Arc, Mutex};

    let seen = Arc::new(Mutex::new(Vec::new()));
    let tasks = [3, 1, 2].map(|n| {
        let seen = seen.clone();
        ProgressTask::new(move || {
            seen.lock().unwrap().push(n * 10);
            if n > 0 {
                Ok(())
            } else {
                Err("not positive")
            }
        })
    });
    TaskRunner::new(hidden_options()).tasks(tasks).run().unwrap();
    assert_eq!(*seen.lock().unwrap(), [30, 10, 20]);
}
