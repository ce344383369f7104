//! Stepbar is a crate aiming at providing a simple way to declare a unit of
//! work, run its tasks and watch a terminal progress bar fill.
//!
//! Drawing, throttling, spinners and rate computation are done by
//! [`indicatif`]; stepbar assembles the configuration and forwards calls.
//!
//! # Quick Start
//!
//! ```rust
//! use stepbar::{progress::Options, ProgressTask, TaskRunner};
//!
//! fn check(name: &str) -> Result<(), String> {
//!     if name.ends_with(".txt") {
//!         Ok(())
//!     } else {
//!         Err(format!("unexpected file {name}"))
//!     }
//! }
//!
//! # fn main() -> stepbar::Result<()> {
//! let files = ["a.txt", "b.txt", "c.txt"];
//! TaskRunner::new(Options::new().show_count().hidden())
//!     .tasks(files.map(|file| ProgressTask::new(move || check(file)).named(file)))
//!     .run()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`progress`] - The [`StepBar`] handle, its [`Options`](progress::Options) builder and styling
//! - [`task`] - [`ProgressTask`], the [`TaskRunner`] and the [`AutoAdvance`] helper
//! - [`metrics`] - The HTTP [`Exporter`](metrics::Exporter) serving a bar's state
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`logging`] - Optional `tracing` subscriber setup

pub mod error;
pub mod logging;
pub mod metrics;
pub mod progress;
pub mod task;

pub use error::{Error, Result, TaskError};
pub use metrics::{Exporter, ExporterConfig};
pub use progress::{BarState, Options, StepBar, INDETERMINATE};
pub use task::{AutoAdvance, ProgressTask, TaskRunner};
