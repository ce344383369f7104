//! The progress bar handle.
//!
//! A [`StepBar`] owns one widget plus the total it was built with. Before
//! [`StepBar::create`] runs the handle is "nil": commands on it do not panic,
//! they return [`Error::NilBar`] and record it in the handle's error log, which
//! [`StepBar::error`] reads back as one combined error. Queries never record.
//!
//! # Examples
//!
//! ```rust
//! use stepbar::{progress::Options, StepBar};
//!
//! # fn main() -> stepbar::Result<()> {
//! let mut bar = StepBar::with_options(3, Options::new().hidden())?;
//! bar.describe("copying")?;
//! bar.next()?;
//! bar.advance(2)?;
//! assert!(bar.is_finished());
//! assert_eq!(bar.state()?.current, 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Nil handles
//!
//! ```rust
//! use stepbar::StepBar;
//!
//! let mut bar = StepBar::new();
//! assert!(bar.next().is_err());
//! assert!(bar.describe("never shown").is_err());
//! assert_eq!(bar.error().unwrap().to_string(), "progress bar is nil; progress bar is nil");
//! ```

use super::config::BarConfig;
use super::options::Options;
use super::state::{BarState, Probe};
use super::widget::Widget;
use crate::error::{Error, Result};
use crate::metrics::{Exporter, ExporterConfig};
use crate::task::{runner, AutoAdvance, ProgressTask};

use indicatif::ProgressDrawTarget;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Total that builds a spinner instead of a determinate bar.
pub const INDETERMINATE: i64 = -1;

/// Handle over a single progress widget.
#[derive(Debug, Default)]
pub struct StepBar {
    total: i64,
    options: Options,
    config: BarConfig,
    widget: Option<Arc<Widget>>,
    tasks: Vec<ProgressTask>,
    errors: Vec<Error>,
}

impl StepBar {
    /// Creates a nil handle. Configure it, then call [`StepBar::create`].
    pub fn new() -> Self {
        StepBar::default()
    }

    /// Creates a bar of `total` steps drawn according to `options`.
    pub fn with_options(total: i64, options: Options) -> Result<Self> {
        StepBar::new().total(total).options(options).create()
    }

    /// Set the number of steps, or [`INDETERMINATE`] for a spinner.
    pub fn total(mut self, total: i64) -> Self {
        self.total = total;
        self
    }

    /// Set the display directives.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Register a task for [`StepBar::run`].
    pub fn task(mut self, task: ProgressTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Register several tasks for [`StepBar::run`].
    pub fn tasks<I>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = ProgressTask>,
    {
        self.tasks.extend(tasks);
        self
    }

    /// Register a task on an existing handle.
    pub fn push_task(&mut self, task: ProgressTask) {
        self.tasks.push(task);
    }

    /// Build the widget. Calling it again replaces the current widget.
    pub fn create(mut self) -> Result<Self> {
        let len = match self.total {
            INDETERMINATE => None,
            total if total > 0 => Some(total as u64),
            total => return Err(Error::InvalidTotal(total)),
        };

        self.config = BarConfig::from_options(&self.options);
        let widget = Widget::build(self.total, len, self.config.clone())?;
        self.widget = Some(Arc::new(widget));

        debug!(total = self.total, directives = self.options.len(), "progress bar created");
        Ok(self)
    }

    /// The declared total.
    pub fn total_steps(&self) -> i64 {
        self.total
    }

    /// Return `true` for spinner bars.
    pub fn is_indeterminate(&self) -> bool {
        self.total == INDETERMINATE
    }

    /// The settings the widget was built with.
    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    /// Number of tasks waiting for [`StepBar::run`].
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    fn widget(&mut self, operation: &'static str) -> Result<Arc<Widget>> {
        match &self.widget {
            Some(widget) => Ok(widget.clone()),
            None => {
                debug!(operation, "progress bar is nil");
                self.errors.push(Error::NilBar);
                Err(Error::NilBar)
            }
        }
    }

    fn record(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = &result {
            self.errors.push(err.replicate());
        }
        result
    }

    /// Add `n` steps. Negative values move the bar back.
    ///
    /// A finished bar stays finished: moving it back afterwards only changes
    /// the position, and the completion callback does not fire again.
    pub fn advance(&mut self, n: i64) -> Result<()> {
        let widget = self.widget("advance")?;
        self.record(widget.advance(n))
    }

    /// Add one step.
    pub fn next(&mut self) -> Result<()> {
        self.advance(1)
    }

    /// Move the bar to exactly `position`.
    pub fn set(&mut self, position: u64) -> Result<()> {
        let widget = self.widget("set")?;
        self.record(widget.set(position))
    }

    /// Fill the bar to its total and draw its final state.
    pub fn finish(&mut self) -> Result<()> {
        self.widget("finish")?.finish();
        Ok(())
    }

    /// Stop the bar, leaving its current state on screen.
    pub fn exit(&mut self) -> Result<()> {
        self.widget("exit")?.exit();
        Ok(())
    }

    /// Erase the bar from its line. The next update draws it again.
    pub fn clear(&mut self) -> Result<()> {
        let widget = self.widget("clear")?;
        self.record(widget.clear())
    }

    /// Draw the bar now, regardless of the refresh rate.
    pub fn redraw(&mut self) -> Result<()> {
        self.widget("redraw")?.redraw();
        Ok(())
    }

    /// Draw the bar somewhere else from now on.
    pub fn set_draw_target(&mut self, target: ProgressDrawTarget) -> Result<()> {
        self.widget("set_draw_target")?.set_draw_target(target);
        Ok(())
    }

    /// Replace the label shown with the bar.
    pub fn describe(&mut self, description: impl Into<String>) -> Result<()> {
        self.widget("describe")?.describe(description.into());
        Ok(())
    }

    /// Same as [`StepBar::describe`].
    pub fn prefix(&mut self, prefix: impl Into<String>) -> Result<()> {
        self.describe(prefix)
    }

    /// Append to the current label.
    pub fn suffix(&mut self, suffix: impl AsRef<str>) -> Result<()> {
        self.widget("suffix")?.suffix(suffix.as_ref());
        Ok(())
    }

    /// Add a detail row under the bar.
    ///
    /// Only the last `max_detail_rows` rows are kept. Without detail rows the
    /// text is printed above the bar instead.
    pub fn add_detail(&mut self, detail: impl Into<String>) -> Result<()> {
        self.widget("add_detail")?.add_detail(detail.into());
        Ok(())
    }

    /// The detail rows currently drawn under the bar.
    pub fn details(&self) -> Vec<String> {
        self.widget
            .as_ref()
            .map(|widget| widget.details())
            .unwrap_or_default()
    }

    /// Return `true` once the bar reached its total or [`StepBar::finish`] ran.
    pub fn is_finished(&self) -> bool {
        self.widget.as_ref().is_some_and(|widget| widget.is_finished())
    }

    /// Return `true` once the bar moved at least once.
    pub fn is_started(&self) -> bool {
        self.widget.as_ref().is_some_and(|widget| widget.is_started())
    }

    /// Return `true` once [`StepBar::exit`] ran.
    pub fn is_exited(&self) -> bool {
        self.widget.as_ref().is_some_and(|widget| widget.is_exited())
    }

    /// Snapshot of the displayed values.
    pub fn state(&self) -> Result<BarState> {
        self.widget
            .as_ref()
            .map(|widget| widget.state())
            .ok_or(Error::NilBar)
    }

    /// The current state encoded as JSON.
    pub fn to_json(&self) -> Result<String> {
        self.state()?.to_json()
    }

    /// All recorded errors joined into one, or `None` if nothing failed.
    pub fn error(&self) -> Option<Error> {
        if self.errors.is_empty() {
            return None;
        }
        Some(Error::Combined {
            messages: self.errors.iter().map(ToString::to_string).collect(),
        })
    }

    /// The recorded errors in call order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// A shared view of the widget.
    pub fn probe(&mut self) -> Result<Probe> {
        Ok(Probe::new(self.widget("probe")?))
    }

    /// Prepare an HTTP exporter serving this bar's state.
    ///
    /// The exporter runs until the process ends, so start it with
    /// [`Exporter::spawn`] or on a separate task.
    pub fn exporter(&mut self, config: ExporterConfig) -> Result<Exporter> {
        Ok(Exporter::new(config, self.probe()?))
    }

    /// Advance the bar by `step` every `interval` on a background thread.
    ///
    /// Ticks complete the bar like [`StepBar::advance`] does, and the thread
    /// stops once the bar is finished, exited or refuses to overflow.
    pub fn auto_advance(&mut self, interval: Duration, step: u64) -> Result<AutoAdvance> {
        Ok(AutoAdvance::spawn(self.probe()?, interval, step))
    }

    /// Run the registered tasks in order, one step each.
    ///
    /// See [`TaskRunner`](crate::TaskRunner) for the halting rules.
    pub fn run(&mut self) -> Result<()> {
        let tasks = std::mem::take(&mut self.tasks);
        runner::run_tasks(self, tasks)
    }
}
