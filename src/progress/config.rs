//! Resolved bar configuration.
//!
//! [`BarConfig`] is what an [`Options`] directive list folds into at bar creation.
//! Directives are applied in call order, so the last one addressing a concern
//! wins. The config then builds the widget's style, draw target and the widget
//! itself.
//!
//! # Examples
//!
//! ```rust
//! use stepbar::progress::{BarConfig, BarWidth, Options};
//!
//! let config = BarConfig::from_options(&Options::new().width(10).full_width());
//! assert_eq!(config.width, BarWidth::Full);
//! ```

use super::options::{CompletionCallback, Directive, Options, Target};
use super::style::{self, DetailRows, SpinnerStyle, Theme};
use crate::error::Result;

use console::Term;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::fmt::{self, Write};
use std::time::Duration;

/// Width of the bar segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarWidth {
    /// A fixed number of columns.
    Fixed(u16),
    /// Whatever the terminal leaves free.
    Full,
}

/// Settings resolved from a directive list.
#[derive(Clone)]
pub struct BarConfig {
    /// Where the bar is drawn.
    pub target: Target,
    /// Width of the bar segment.
    pub width: BarWidth,
    /// Minimum interval between two redraws.
    pub throttle: Duration,
    /// Steady spinner animation interval, if any.
    pub spinner_interval: Option<Duration>,
    /// Spinner frames, the last one drawn once finished.
    pub spinner: Vec<String>,
    /// Bar glyphs.
    pub theme: Theme,
    /// Draw the bar at all.
    pub visible: bool,
    /// Draw the empty bar at creation.
    pub render_blank_state: bool,
    /// Print `pos/len`.
    pub show_count: bool,
    /// Print the rate.
    pub show_rate: bool,
    /// Unit label of the rate counter.
    pub rate_unit: String,
    /// Render counters as bytes.
    pub show_bytes: bool,
    /// Include the total in the byte counter.
    pub show_total_bytes: bool,
    /// IEC instead of SI byte units.
    pub iec_units: bool,
    /// Print the elapsed time.
    pub elapsed_time: bool,
    /// Print the remaining time estimate.
    pub predict_time: bool,
    /// Keep the elapsed time once finished.
    pub elapsed_on_finish: bool,
    /// Erase the bar once finished.
    pub clear_on_finish: bool,
    /// Colored template segments.
    pub color_codes: bool,
    /// Buffered terminal output.
    pub ansi_codes: bool,
    /// Description at the end of the line.
    pub description_at_line_end: bool,
    /// Detail rows kept under the bar.
    pub max_detail_rows: usize,
    /// Fired once on completion.
    pub on_completion: Option<CompletionCallback>,
    /// Advancing past the total fails.
    pub error_on_overflow: bool,
}

impl fmt::Debug for BarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarConfig")
            .field("target", &self.target)
            .field("width", &self.width)
            .field("throttle", &self.throttle)
            .field("spinner_interval", &self.spinner_interval)
            .field("spinner", &self.spinner)
            .field("theme", &self.theme)
            .field("visible", &self.visible)
            .field("render_blank_state", &self.render_blank_state)
            .field("show_count", &self.show_count)
            .field("show_rate", &self.show_rate)
            .field("rate_unit", &self.rate_unit)
            .field("show_bytes", &self.show_bytes)
            .field("show_total_bytes", &self.show_total_bytes)
            .field("iec_units", &self.iec_units)
            .field("elapsed_time", &self.elapsed_time)
            .field("predict_time", &self.predict_time)
            .field("elapsed_on_finish", &self.elapsed_on_finish)
            .field("clear_on_finish", &self.clear_on_finish)
            .field("color_codes", &self.color_codes)
            .field("ansi_codes", &self.ansi_codes)
            .field("description_at_line_end", &self.description_at_line_end)
            .field("max_detail_rows", &self.max_detail_rows)
            .field("on_completion", &self.on_completion.is_some())
            .field("error_on_overflow", &self.error_on_overflow)
            .finish()
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            target: Target::Stderr,
            width: BarWidth::Fixed(40),
            throttle: Duration::from_millis(50),
            spinner_interval: None,
            spinner: frames(SpinnerStyle::default()),
            theme: Theme::default(),
            visible: true,
            render_blank_state: false,
            show_count: false,
            show_rate: false,
            rate_unit: "it".into(),
            show_bytes: false,
            show_total_bytes: true,
            iec_units: false,
            elapsed_time: true,
            predict_time: true,
            elapsed_on_finish: false,
            clear_on_finish: false,
            color_codes: false,
            ansi_codes: false,
            description_at_line_end: false,
            max_detail_rows: 0,
            on_completion: None,
            error_on_overflow: false,
        }
    }
}

fn frames(style: SpinnerStyle) -> Vec<String> {
    style.frames().iter().map(|f| f.to_string()).collect()
}

impl BarConfig {
    /// Fold a directive list into a config, starting from the defaults.
    pub fn from_options(options: &Options) -> Self {
        let mut config = BarConfig::default();
        for directive in options.directives() {
            config.apply(directive);
        }
        config
    }

    /// Apply a single directive on top of the current settings.
    pub fn apply(&mut self, directive: &Directive) {
        match directive {
            Directive::Target(target) => self.target = *target,
            Directive::Width(width) => self.width = BarWidth::Fixed(*width),
            Directive::FullWidth => self.width = BarWidth::Full,
            Directive::Throttle(interval) => self.throttle = *interval,
            Directive::SpinnerInterval(interval) => self.spinner_interval = Some(*interval),
            Directive::Spinner(style) => self.spinner = frames(*style),
            Directive::SpinnerFrames(custom) => self.spinner = custom.clone(),
            Directive::Theme(theme) => self.theme = theme.clone(),
            Directive::Visible(visible) => self.visible = *visible,
            Directive::RenderBlankState(render) => self.render_blank_state = *render,
            Directive::ShowCount(show) => self.show_count = *show,
            Directive::ShowRate(show) => self.show_rate = *show,
            Directive::RateUnit(unit) => self.rate_unit = unit.clone(),
            Directive::ShowBytes(show) => self.show_bytes = *show,
            Directive::ShowTotalBytes(show) => self.show_total_bytes = *show,
            Directive::IecUnits(iec) => self.iec_units = *iec,
            Directive::ElapsedTime(show) => self.elapsed_time = *show,
            Directive::PredictTime(show) => self.predict_time = *show,
            Directive::ElapsedOnFinish(show) => self.elapsed_on_finish = *show,
            Directive::ClearOnFinish(clear) => self.clear_on_finish = *clear,
            Directive::ColorCodes(enabled) => self.color_codes = *enabled,
            Directive::AnsiCodes(enabled) => self.ansi_codes = *enabled,
            Directive::DescriptionAtLineEnd(end) => self.description_at_line_end = *end,
            Directive::MaxDetailRows(rows) => self.max_detail_rows = *rows,
            Directive::OnCompletion(callback) => self.on_completion = Some(callback.clone()),
            Directive::ErrorOnOverflow(enabled) => self.error_on_overflow = *enabled,
        }
    }

    /// Redraw rate derived from the throttle interval, in Hz.
    pub fn refresh_rate(&self) -> u8 {
        let millis = self.throttle.as_millis();
        if millis == 0 {
            return u8::MAX;
        }
        (1000 / millis).clamp(1, u8::MAX as u128) as u8
    }

    /// Create the draw target described by the config.
    pub fn draw_target(&self) -> ProgressDrawTarget {
        if !self.visible {
            return ProgressDrawTarget::hidden();
        }
        let hz = self.refresh_rate();
        match (self.target, self.ansi_codes) {
            (Target::Hidden, _) => ProgressDrawTarget::hidden(),
            (Target::Stderr, false) => ProgressDrawTarget::stderr_with_hz(hz),
            (Target::Stdout, false) => ProgressDrawTarget::stdout_with_hz(hz),
            (Target::Stderr, true) => ProgressDrawTarget::term(Term::buffered_stderr(), hz),
            (Target::Stdout, true) => ProgressDrawTarget::term(Term::buffered_stdout(), hz),
        }
    }

    /// Create a [`ProgressStyle`] based on the config.
    pub(crate) fn to_progress_style(
        &self,
        determinate: bool,
        finishing: bool,
        details: &DetailRows,
    ) -> Result<ProgressStyle> {
        let template = style::template(self, determinate, finishing);
        let ticks: Vec<&str> = self.spinner.iter().map(String::as_str).collect();

        let unit = self.rate_unit.clone();
        let rows = details.clone();
        let style = ProgressStyle::with_template(&template)?
            .progress_chars(&self.theme.progress_chars())
            .tick_strings(&ticks)
            .with_key("rate", move |state: &ProgressState, w: &mut dyn Write| {
                let _ = write!(w, "{:.2} {unit}/s", state.per_sec());
            })
            .with_key("details", move |_: &ProgressState, w: &mut dyn Write| {
                if let Ok(rows) = rows.lock() {
                    let lines: Vec<&str> = rows.iter().map(String::as_str).collect();
                    let _ = w.write_str(&lines.join("\n"));
                }
            });
        Ok(style)
    }

    /// Create the widget for `len` steps, or a spinner when `len` is `None`.
    ///
    /// The bar is drawn through a [`MultiProgress`] owning the configured draw
    /// target, so its lines can be erased and drawn again later.
    pub(crate) fn to_progress_bar(
        &self,
        len: Option<u64>,
        details: &DetailRows,
    ) -> Result<(MultiProgress, ProgressBar)> {
        self.theme.check()?;
        style::check_frames(&self.spinner)?;

        let multi = MultiProgress::with_draw_target(self.draw_target());
        let bar = multi.add(
            ProgressBar::with_draw_target(len, ProgressDrawTarget::hidden())
                .with_style(self.to_progress_style(len.is_some(), false, details)?),
        );

        if len.is_none() {
            if let Some(interval) = self.spinner_interval {
                bar.enable_steady_tick(interval);
            }
        }
        if self.render_blank_state {
            bar.tick();
        }
        Ok((multi, bar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_directives_win() {
        let options = Options::new()
            .show_count()
            .width(10)
            .show_count_with(false)
            .full_width()
            .width(12);
        let config = BarConfig::from_options(&options);
        assert!(!config.show_count);
        assert_eq!(config.width, BarWidth::Fixed(12));
    }

    #[test]
    fn custom_frames_replace_style() {
        let options = Options::new()
            .spinner(SpinnerStyle::Line)
            .spinner_frames(["a", "b", "c"]);
        let config = BarConfig::from_options(&options);
        assert_eq!(config.spinner, ["a", "b", "c"]);
    }

    #[test]
    fn refresh_rate_from_throttle() {
        let rate = |ms| {
            BarConfig::from_options(&Options::new().throttle(Duration::from_millis(ms)))
                .refresh_rate()
        };
        assert_eq!(rate(50), 20);
        assert_eq!(rate(0), u8::MAX);
        assert_eq!(rate(1), u8::MAX);
        assert_eq!(rate(5000), 1);
    }

    #[test]
    fn hidden_overrides_target() {
        let options = Options::new().target(Target::Stdout).hidden();
        assert!(BarConfig::from_options(&options).draw_target().is_hidden());
    }

    #[test]
    fn invalid_theme_fails_construction() {
        let config = BarConfig::from_options(&Options::new().theme(Theme::from_chars("#")).hidden());
        let details = DetailRows::default();
        assert!(config.to_progress_bar(Some(3), &details).is_err());
    }
}
