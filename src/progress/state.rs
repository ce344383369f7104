//! Snapshots and shared views of a live bar.
//!
//! [`BarState`] is a value copy of what a bar currently displays. [`Probe`] is a
//! cheap handle on the widget itself, shared with the metrics exporter and the
//! auto-advance helper so they never need the owning [`StepBar`](crate::StepBar).

use super::widget::Widget;
use crate::error::Result;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of a bar's displayed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarState {
    /// Label text.
    pub description: String,
    /// Current position.
    pub current: u64,
    /// Declared total, [`INDETERMINATE`](crate::INDETERMINATE) for spinners.
    pub total: i64,
    /// Completion percentage, `0.0` for spinners.
    pub percent: f64,
    /// Seconds since the bar was created.
    pub elapsed_secs: f64,
    /// Estimated seconds left.
    pub remaining_secs: f64,
    /// Steps per second.
    pub per_sec: f64,
    /// The widget stopped drawing, either finished or exited.
    pub finished: bool,
}

impl BarState {
    /// Encode the snapshot as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a snapshot previously produced by [`BarState::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Shared access to a bar's widget.
///
/// Position changes made through a probe follow the same rules as the owning
/// handle's: reaching the total completes the bar and the overflow check applies.
#[derive(Debug, Clone)]
pub struct Probe {
    widget: Arc<Widget>,
}

impl Probe {
    pub(crate) fn new(widget: Arc<Widget>) -> Self {
        Self { widget }
    }

    /// Take a snapshot of the widget.
    pub fn state(&self) -> BarState {
        self.widget.state()
    }

    /// The current label.
    pub fn description(&self) -> String {
        self.widget.description()
    }

    /// The declared total.
    pub fn total(&self) -> i64 {
        self.widget.total()
    }

    /// Return `true` once the bar reached its total or was finished.
    pub fn is_finished(&self) -> bool {
        self.widget.is_finished()
    }

    /// Return `true` once the bar was exited.
    pub fn is_exited(&self) -> bool {
        self.widget.is_exited()
    }

    /// Move the widget forward without going through the owning handle.
    pub(crate) fn advance(&self, step: u64) -> Result<()> {
        self.widget.advance(step.min(i64::MAX as u64) as i64)
    }
}
