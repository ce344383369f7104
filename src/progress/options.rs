//! Builder for progress bar display directives.
//!
//! [`Options`] accumulates an ordered list of [`Directive`]s. Nothing is
//! validated here: the list is folded into a [`BarConfig`](super::BarConfig)
//! when the bar is created, and later directives addressing the same concern
//! override earlier ones.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use stepbar::progress::{Options, Theme};
//!
//! let options = Options::new()
//!     .width(30)
//!     .theme(Theme::ascii())
//!     .throttle(Duration::from_millis(65))
//!     .show_count()
//!     .show_rate()
//!     .clear_on_finish();
//! assert_eq!(options.len(), 6);
//! ```

use super::style::{SpinnerStyle, Theme};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Callback fired once when a bar completes.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// Where the bar is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Draw to standard error.
    #[default]
    Stderr,
    /// Draw to standard output.
    Stdout,
    /// Draw nothing. State is still tracked.
    Hidden,
}

/// A single configuration instruction.
#[derive(Clone)]
pub enum Directive {
    Target(Target),
    Width(u16),
    FullWidth,
    Throttle(Duration),
    SpinnerInterval(Duration),
    Spinner(SpinnerStyle),
    SpinnerFrames(Vec<String>),
    Theme(Theme),
    Visible(bool),
    RenderBlankState(bool),
    ShowCount(bool),
    ShowRate(bool),
    RateUnit(String),
    ShowBytes(bool),
    ShowTotalBytes(bool),
    IecUnits(bool),
    ElapsedTime(bool),
    PredictTime(bool),
    ElapsedOnFinish(bool),
    ClearOnFinish(bool),
    ColorCodes(bool),
    AnsiCodes(bool),
    DescriptionAtLineEnd(bool),
    MaxDetailRows(usize),
    OnCompletion(CompletionCallback),
    ErrorOnOverflow(bool),
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Target(t) => f.debug_tuple("Target").field(t).finish(),
            Directive::Width(w) => f.debug_tuple("Width").field(w).finish(),
            Directive::FullWidth => f.write_str("FullWidth"),
            Directive::Throttle(d) => f.debug_tuple("Throttle").field(d).finish(),
            Directive::SpinnerInterval(d) => f.debug_tuple("SpinnerInterval").field(d).finish(),
            Directive::Spinner(s) => f.debug_tuple("Spinner").field(s).finish(),
            Directive::SpinnerFrames(v) => f.debug_tuple("SpinnerFrames").field(v).finish(),
            Directive::Theme(t) => f.debug_tuple("Theme").field(t).finish(),
            Directive::Visible(b) => f.debug_tuple("Visible").field(b).finish(),
            Directive::RenderBlankState(b) => f.debug_tuple("RenderBlankState").field(b).finish(),
            Directive::ShowCount(b) => f.debug_tuple("ShowCount").field(b).finish(),
            Directive::ShowRate(b) => f.debug_tuple("ShowRate").field(b).finish(),
            Directive::RateUnit(s) => f.debug_tuple("RateUnit").field(s).finish(),
            Directive::ShowBytes(b) => f.debug_tuple("ShowBytes").field(b).finish(),
            Directive::ShowTotalBytes(b) => f.debug_tuple("ShowTotalBytes").field(b).finish(),
            Directive::IecUnits(b) => f.debug_tuple("IecUnits").field(b).finish(),
            Directive::ElapsedTime(b) => f.debug_tuple("ElapsedTime").field(b).finish(),
            Directive::PredictTime(b) => f.debug_tuple("PredictTime").field(b).finish(),
            Directive::ElapsedOnFinish(b) => f.debug_tuple("ElapsedOnFinish").field(b).finish(),
            Directive::ClearOnFinish(b) => f.debug_tuple("ClearOnFinish").field(b).finish(),
            Directive::ColorCodes(b) => f.debug_tuple("ColorCodes").field(b).finish(),
            Directive::AnsiCodes(b) => f.debug_tuple("AnsiCodes").field(b).finish(),
            Directive::DescriptionAtLineEnd(b) => {
                f.debug_tuple("DescriptionAtLineEnd").field(b).finish()
            }
            Directive::MaxDetailRows(n) => f.debug_tuple("MaxDetailRows").field(n).finish(),
            Directive::OnCompletion(_) => f.write_str("OnCompletion(..)"),
            Directive::ErrorOnOverflow(b) => f.debug_tuple("ErrorOnOverflow").field(b).finish(),
        }
    }
}

/// An ordered sequence of display directives.
///
/// ```rust
/// use stepbar::progress::Options;
///
/// // `full_width` and `width` address the same concern, so the bar ends up 25 wide.
/// let options = Options::new().full_width().width(25);
/// assert_eq!(options.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    directives: Vec<Directive>,
}

impl Options {
    /// Creates an empty directive sequence.
    pub fn new() -> Self {
        Options::default()
    }

    fn push(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// The directives in call order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Number of accumulated directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Return `true` if no directive was added.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Set where the bar is drawn.
    pub fn target(self, target: Target) -> Self {
        self.push(Directive::Target(target))
    }

    /// Set the width of the bar segment.
    pub fn width(self, width: u16) -> Self {
        self.push(Directive::Width(width))
    }

    /// Let the bar segment take the remaining terminal width.
    pub fn full_width(self) -> Self {
        self.push(Directive::FullWidth)
    }

    /// Set the minimum interval between two redraws.
    pub fn throttle(self, interval: Duration) -> Self {
        self.push(Directive::Throttle(interval))
    }

    /// Animate the spinner on a steady interval instead of on updates only.
    pub fn spinner_interval(self, interval: Duration) -> Self {
        self.push(Directive::SpinnerInterval(interval))
    }

    /// Set the spinner used for indeterminate bars.
    pub fn spinner(self, style: SpinnerStyle) -> Self {
        self.push(Directive::Spinner(style))
    }

    /// Use custom spinner frames for indeterminate bars.
    pub fn spinner_frames<I, S>(self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Directive::SpinnerFrames(
            frames.into_iter().map(Into::into).collect(),
        ))
    }

    /// Set the glyphs the bar is drawn with.
    pub fn theme(self, theme: Theme) -> Self {
        self.push(Directive::Theme(theme))
    }

    /// Show or hide the bar.
    pub fn visible(self, visible: bool) -> Self {
        self.push(Directive::Visible(visible))
    }

    /// Convenience function to hide the bar.
    pub fn hidden(self) -> Self {
        self.visible(false)
    }

    /// Draw the empty bar as soon as it is created.
    pub fn render_blank_state(self, render: bool) -> Self {
        self.push(Directive::RenderBlankState(render))
    }

    /// Print the current count out of total.
    pub fn show_count(self) -> Self {
        self.show_count_with(true)
    }

    /// Set whether the current count is printed.
    pub fn show_count_with(self, show: bool) -> Self {
        self.push(Directive::ShowCount(show))
    }

    /// Print the iterations per second.
    pub fn show_rate(self) -> Self {
        self.show_rate_with(true)
    }

    /// Set whether the iterations per second are printed.
    pub fn show_rate_with(self, show: bool) -> Self {
        self.push(Directive::ShowRate(show))
    }

    /// Set the unit label of the rate counter, `it` by default.
    pub fn rate_unit(self, unit: impl Into<String>) -> Self {
        self.push(Directive::RateUnit(unit.into()))
    }

    /// Render counters and rate as byte quantities.
    pub fn show_bytes(self, show: bool) -> Self {
        self.push(Directive::ShowBytes(show))
    }

    /// Include the total in the byte counter.
    pub fn show_total_bytes(self, show: bool) -> Self {
        self.push(Directive::ShowTotalBytes(show))
    }

    /// Use IEC units (e.g. MiB) instead of SI units (e.g. MB).
    pub fn iec_units(self, iec: bool) -> Self {
        self.push(Directive::IecUnits(iec))
    }

    /// Show the elapsed time.
    pub fn elapsed_time(self, show: bool) -> Self {
        self.push(Directive::ElapsedTime(show))
    }

    /// Show the predicted remaining time.
    pub fn predict_time(self, show: bool) -> Self {
        self.push(Directive::PredictTime(show))
    }

    /// Keep the elapsed time on screen once the bar is finished.
    pub fn elapsed_on_finish(self) -> Self {
        self.push(Directive::ElapsedOnFinish(true))
    }

    /// Erase the bar once finished.
    pub fn clear_on_finish(self) -> Self {
        self.push(Directive::ClearOnFinish(true))
    }

    /// Render the bar segments with colors.
    pub fn color_codes(self, enabled: bool) -> Self {
        self.push(Directive::ColorCodes(enabled))
    }

    /// Write through a buffered terminal handle.
    ///
    /// Only useful in environments with support for ANSI escape sequences.
    pub fn ansi_codes(self, enabled: bool) -> Self {
        self.push(Directive::AnsiCodes(enabled))
    }

    /// Write the description at the end of the line instead of its start.
    pub fn description_at_line_end(self) -> Self {
        self.push(Directive::DescriptionAtLineEnd(true))
    }

    /// Keep at most `rows` detail lines under the bar.
    pub fn max_detail_rows(self, rows: usize) -> Self {
        self.push(Directive::MaxDetailRows(rows))
    }

    /// Set a callback fired once when the bar completes.
    pub fn on_completion<F>(self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push(Directive::OnCompletion(Arc::new(callback)))
    }

    /// Make advancing past the total an error.
    pub fn error_on_overflow(self, enabled: bool) -> Self {
        self.push(Directive::ErrorOnOverflow(enabled))
    }
}
