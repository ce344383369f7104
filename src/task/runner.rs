//! Sequential task execution.
//!
//! Tasks run one after the other on the calling thread. Each success moves the
//! bar one step; the first failure exits the bar, so the terminal keeps showing
//! how far the work got, and ends the run.
//!
//! # Examples
//!
//! ```rust
//! use stepbar::{progress::Options, ProgressTask, TaskRunner};
//!
//! let result = TaskRunner::new(Options::new().hidden())
//!     .task(ProgressTask::infallible(|| {}))
//!     .task(ProgressTask::new(|| Err("disk full")).named("save"))
//!     .task(ProgressTask::infallible(|| unreachable!()))
//!     .run();
//! assert_eq!(result.unwrap_err().to_string(), "task save failed: disk full");
//! ```

use super::task::ProgressTask;
use crate::error::{Error, Result};
use crate::progress::{Options, StepBar};

use tracing::{debug, error, warn};

/// Runs a list of tasks behind a bar sized to the list.
#[derive(Debug, Default)]
pub struct TaskRunner {
    options: Options,
    tasks: Vec<ProgressTask>,
}

impl TaskRunner {
    /// Creates a runner drawing its bar with `options`.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            tasks: Vec::new(),
        }
    }

    /// Register a task.
    pub fn task(mut self, task: ProgressTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Register several tasks.
    pub fn tasks<I>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = ProgressTask>,
    {
        self.tasks.extend(tasks);
        self
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Return `true` if no task is registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Build a bar of one step per task and run every task.
    ///
    /// An empty runner succeeds without building a bar.
    pub fn run(self) -> Result<()> {
        if self.tasks.is_empty() {
            return Ok(());
        }
        let mut bar = StepBar::with_options(self.tasks.len() as i64, self.options)?;
        run_tasks(&mut bar, self.tasks)
    }
}

/// Run `tasks` in order against `bar`.
///
/// Halts on the first error recorded on the bar, failing task or failing step.
/// A failing task surfaces its own error; if exiting the bar fails too, that
/// failure is only logged.
pub(crate) fn run_tasks(bar: &mut StepBar, tasks: Vec<ProgressTask>) -> Result<()> {
    if let Some(err) = bar.error() {
        return Err(err);
    }

    let count = tasks.len();
    for (index, task) in tasks.into_iter().enumerate() {
        let name = task.label(index);
        debug!(task = %name, index, count, "running task");

        if let Err(source) = task.invoke() {
            error!(task = %name, error = %source, "task failed");
            if let Err(exit) = bar.exit() {
                warn!(task = %name, error = %exit, "failed to exit progress bar");
            }
            return Err(Error::Task {
                index,
                name,
                source,
            });
        }

        bar.next()?;
    }
    Ok(())
}
