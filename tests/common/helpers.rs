#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stepbar::progress::{Options, StepBar};
use stepbar::ProgressTask;

/// Options that track state without drawing anything.
pub fn hidden_options() -> Options {
    Options::new().hidden()
}

/// Creates a hidden determinate bar.
pub fn create_hidden_bar(total: i64) -> StepBar {
    StepBar::with_options(total, hidden_options()).expect("Failed to create progress bar")
}

/// Records the order in which tasks ran.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A task that records `name` and succeeds.
    pub fn ok(&self, name: &str) -> ProgressTask {
        let calls = self.calls.clone();
        let label = name.to_string();
        ProgressTask::infallible(move || calls.lock().unwrap().push(label)).named(name)
    }

    /// A task that records `name` and fails with `message`.
    pub fn failing(&self, name: &str, message: &'static str) -> ProgressTask {
        let calls = self.calls.clone();
        let label = name.to_string();
        ProgressTask::new(move || {
            calls.lock().unwrap().push(label);
            Err(message)
        })
        .named(name)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Counts how many times a completion callback fired.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Asserts the bar shows `current` out of `total`.
pub fn assert_position(bar: &StepBar, current: u64, total: i64) {
    let state = bar.state().expect("Bar should be created");
    assert_eq!(state.current, current, "unexpected position");
    assert_eq!(state.total, total, "unexpected total");
}
