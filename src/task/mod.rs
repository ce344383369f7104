//! Task registration and execution.
//!
//! - `task` - [`ProgressTask`], a closure with its arguments captured
//! - `runner` - [`TaskRunner`] and the run loop shared with [`StepBar::run`](crate::StepBar::run)
//! - `ticker` - [`AutoAdvance`], a background thread that advances a bar on an interval
//!
//! # Examples
//!
//! ```rust
//! use stepbar::{progress::Options, ProgressTask, StepBar};
//!
//! # fn main() -> stepbar::Result<()> {
//! let mut bar = StepBar::new()
//!     .total(2)
//!     .options(Options::new().hidden())
//!     .task(ProgressTask::infallible(|| println!("one")))
//!     .task(ProgressTask::new(|| -> Result<(), std::io::Error> { Ok(()) }))
//!     .create()?;
//! bar.run()?;
//! assert!(bar.is_finished());
//! # Ok(())
//! # }
//! ```

pub(crate) mod runner;
#[allow(clippy::module_inception)]
pub(crate) mod task;
pub(crate) mod ticker;

pub use runner::TaskRunner;
pub use task::ProgressTask;
pub use ticker::AutoAdvance;
