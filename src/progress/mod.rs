//! Progress module containing the bar handle and its configuration.
//!
//! # Overview
//!
//! - `options` - [`Options`], the directive builder
//! - `config` - [`BarConfig`], directives resolved into settings
//! - `style` - [`Theme`], [`SpinnerStyle`] and template assembly
//! - `bar` - [`StepBar`], the handle over one widget
//! - `state` - [`BarState`] snapshots and the shared [`Probe`]
//! - `widget` - the live widget and its lifecycle, shared by handle and probes
//!
//! # Examples
//!
//! ## Custom styling
//!
//! ```rust
//! use stepbar::progress::{Options, StepBar, Theme};
//!
//! # fn main() -> stepbar::Result<()> {
//! let options = Options::new()
//!     .theme(Theme::from_chars(Theme::CHARS_LINE).with_ends("[", "]"))
//!     .show_count()
//!     .hidden();
//! let mut bar = StepBar::with_options(100, options)?;
//! bar.set(40)?;
//! assert_eq!(bar.state()?.percent, 40.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Spinners
//!
//! ```rust
//! use std::time::Duration;
//! use stepbar::progress::{Options, SpinnerStyle, StepBar, INDETERMINATE};
//!
//! # fn main() -> stepbar::Result<()> {
//! let options = Options::new()
//!     .spinner(SpinnerStyle::Arc)
//!     .spinner_interval(Duration::from_millis(120))
//!     .hidden();
//! let mut bar = StepBar::with_options(INDETERMINATE, options)?;
//! bar.describe("waiting for lock")?;
//! bar.finish()?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod bar;
pub(crate) mod config;
pub(crate) mod options;
pub(crate) mod state;
pub(crate) mod style;
pub(crate) mod widget;

pub use bar::{StepBar, INDETERMINATE};
pub use config::{BarConfig, BarWidth};
pub use options::{CompletionCallback, Directive, Options, Target};
pub use state::{BarState, Probe};
pub use style::{SpinnerStyle, Theme};
