//! The live widget shared by a [`StepBar`](crate::StepBar) and its probes.
//!
//! Every position change goes through [`Widget`], whether it comes from the
//! owning handle or from an auto-advance thread, so completion, the overflow
//! check and the completion callback behave the same for both.

use super::config::BarConfig;
use super::state::BarState;
use super::style::DetailRows;
use crate::error::{Error, Result};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
struct Lifecycle {
    started: bool,
    finished: bool,
    exited: bool,
}

pub(crate) struct Widget {
    multi: MultiProgress,
    bar: ProgressBar,
    total: i64,
    config: BarConfig,
    finish_style: ProgressStyle,
    details: DetailRows,
    lifecycle: Mutex<Lifecycle>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("bar", &self.bar)
            .field("total", &self.total)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// Build the widget for `total`, with `len` already validated from it.
    pub(crate) fn build(total: i64, len: Option<u64>, config: BarConfig) -> Result<Self> {
        let details = DetailRows::default();
        let (multi, bar) = config.to_progress_bar(len, &details)?;
        let finish_style = config.to_progress_style(len.is_some(), true, &details)?;
        Ok(Self {
            multi,
            bar,
            total,
            config,
            finish_style,
            details,
            lifecycle: Mutex::new(Lifecycle::default()),
        })
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn total(&self) -> i64 {
        self.total
    }

    fn check_overflow(&self, next: u64) -> Result<()> {
        if self.config.error_on_overflow && self.total > 0 && next > self.total as u64 {
            return Err(Error::Overflow {
                current: next,
                total: self.total as u64,
            });
        }
        Ok(())
    }

    pub(crate) fn advance(&self, n: i64) -> Result<()> {
        let mut lifecycle = self.lifecycle();
        if lifecycle.exited {
            return Ok(());
        }

        if n >= 0 {
            let delta = n as u64;
            self.check_overflow(self.bar.position().saturating_add(delta))?;
            self.bar.inc(delta);
        } else {
            self.bar.dec(n.unsigned_abs());
        }
        lifecycle.started = true;
        let completed = self.complete_if_full(&mut lifecycle);
        drop(lifecycle);
        self.notify(completed);
        Ok(())
    }

    pub(crate) fn set(&self, position: u64) -> Result<()> {
        let mut lifecycle = self.lifecycle();
        if lifecycle.exited {
            return Ok(());
        }

        self.check_overflow(position)?;
        self.bar.set_position(position);
        lifecycle.started = true;
        let completed = self.complete_if_full(&mut lifecycle);
        drop(lifecycle);
        self.notify(completed);
        Ok(())
    }

    fn complete_if_full(&self, lifecycle: &mut Lifecycle) -> bool {
        if self.total > 0 && !lifecycle.finished && self.bar.position() >= self.total as u64 {
            self.complete(lifecycle);
            return true;
        }
        false
    }

    fn complete(&self, lifecycle: &mut Lifecycle) {
        lifecycle.finished = true;
        let position = self.bar.position();
        if self.config.clear_on_finish {
            self.bar.finish_and_clear();
        } else {
            self.bar.set_style(self.finish_style.clone());
            self.bar.finish();
        }
        // The widget snaps to its length on finish; keep an overshoot visible.
        if self.bar.position() != position {
            self.bar.set_position(position);
        }
        debug!(position, "progress bar finished");
    }

    /// Runs the completion callback outside the lifecycle lock.
    fn notify(&self, completed: bool) {
        if !completed {
            return;
        }
        if let Some(callback) = &self.config.on_completion {
            callback();
        }
    }

    pub(crate) fn finish(&self) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.exited || lifecycle.finished {
            return;
        }
        if self.total > 0 {
            self.bar.set_position(self.total as u64);
        }
        self.complete(&mut lifecycle);
        drop(lifecycle);
        self.notify(true);
    }

    pub(crate) fn exit(&self) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.exited {
            return;
        }
        self.bar.abandon();
        lifecycle.exited = true;
        debug!(position = self.bar.position(), "progress bar exited");
    }

    pub(crate) fn clear(&self) -> Result<()> {
        self.multi.clear()?;
        Ok(())
    }

    pub(crate) fn redraw(&self) {
        self.bar.force_draw();
    }

    pub(crate) fn set_draw_target(&self, target: ProgressDrawTarget) {
        self.multi.set_draw_target(target);
    }

    pub(crate) fn describe(&self, description: String) {
        self.bar.set_message(description);
    }

    pub(crate) fn suffix(&self, suffix: &str) {
        // Serializes label updates.
        let _lifecycle = self.lifecycle();
        let mut label = self.bar.message();
        label.push_str(suffix);
        self.bar.set_message(label);
    }

    pub(crate) fn description(&self) -> String {
        self.bar.message()
    }

    pub(crate) fn add_detail(&self, detail: String) {
        let max = self.config.max_detail_rows;
        if max == 0 {
            self.bar.println(detail);
            return;
        }

        {
            let mut rows = self.details.lock().unwrap_or_else(PoisonError::into_inner);
            rows.push_back(detail);
            while rows.len() > max {
                rows.pop_front();
            }
        }
        self.bar.tick();
    }

    pub(crate) fn details(&self) -> Vec<String> {
        let rows = self.details.lock().unwrap_or_else(PoisonError::into_inner);
        rows.iter().cloned().collect()
    }

    pub(crate) fn is_started(&self) -> bool {
        self.lifecycle().started
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.lifecycle().finished
    }

    pub(crate) fn is_exited(&self) -> bool {
        self.lifecycle().exited
    }

    pub(crate) fn state(&self) -> BarState {
        let lifecycle = *self.lifecycle();
        let current = self.bar.position();
        let percent = match self.bar.length() {
            Some(len) if len > 0 => (current as f64 * 100.0 / len as f64).min(100.0),
            _ => 0.0,
        };
        BarState {
            description: self.bar.message(),
            current,
            total: self.total,
            percent,
            elapsed_secs: self.bar.elapsed().as_secs_f64(),
            remaining_secs: self.bar.eta().as_secs_f64(),
            per_sec: self.bar.per_sec(),
            finished: lifecycle.finished || lifecycle.exited,
        }
    }
}
