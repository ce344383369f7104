//! Deferred units of work.

use crate::error::TaskError;

use std::fmt;

type Call = Box<dyn FnOnce() -> Result<(), TaskError> + Send>;

/// A closure run once by the task runner, with its arguments captured at
/// registration.
///
/// ```rust
/// use stepbar::ProgressTask;
///
/// let path = String::from("report.csv");
/// let task = ProgressTask::new(move || {
///     if path.is_empty() {
///         return Err("no path");
///     }
///     Ok(())
/// })
/// .named("write report");
/// assert_eq!(task.name(), Some("write report"));
/// ```
pub struct ProgressTask {
    name: Option<String>,
    call: Call,
}

impl fmt::Debug for ProgressTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTask")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ProgressTask {
    /// Create a task from a fallible closure.
    pub fn new<F, E>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: Into<TaskError>,
    {
        Self {
            name: None,
            call: Box::new(move || f().map_err(Into::into)),
        }
    }

    /// Create a task from a closure that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            name: None,
            call: Box::new(move || {
                f();
                Ok(())
            }),
        }
    }

    /// Set the name used in logs and errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The task name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{index}"),
        }
    }

    pub(crate) fn invoke(self) -> Result<(), TaskError> {
        (self.call)()
    }
}
