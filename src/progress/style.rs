//! Progress bar themes, spinners and template assembly.
//!
//! This module provides the glyph sets a bar can be drawn with and turns a
//! resolved [`BarConfig`] into the template string handed to
//! [`indicatif::ProgressStyle`].
//!
//! # Examples
//!
//! ```rust
//! use stepbar::progress::{Options, SpinnerStyle, Theme};
//!
//! let options = Options::new()
//!     .theme(Theme::from_chars(Theme::CHARS_FADE_IN))
//!     .spinner(SpinnerStyle::Line);
//! ```

use super::config::{BarConfig, BarWidth};
use crate::error::{Error, Result};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Detail rows rendered under the bar, shared with the template key that draws them.
pub(crate) type DetailRows = Arc<Mutex<VecDeque<String>>>;

/// Glyphs the bar segment is built from.
///
/// `filled`, `head` and `empty` are concatenated into the progression character
/// set, so each must be a single glyph (`head` may be empty) and all must share
/// the same display width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Glyph for the completed part.
    pub filled: String,
    /// Glyph at the tip of the completed part.
    pub head: String,
    /// Glyph for the remaining part.
    pub empty: String,
    /// Text printed before the bar segment.
    pub bar_start: String,
    /// Text printed after the bar segment.
    pub bar_end: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::unicode()
    }
}

impl Theme {
    /// Use increasing quarter blocks as progress characters: `"█▛▌▖  "`.
    pub const CHARS_BLOCKY: &'static str = "█▛▌▖  ";
    /// Use fade-in blocks as progress characters: `"█▓▒░  "`.
    pub const CHARS_FADE_IN: &'static str = "█▓▒░  ";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾╴─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";
    /// Use rough blocks as progress characters: `"█  "`.
    pub const CHARS_ROUGH: &'static str = "█  ";

    /// `[===>-----]`
    pub fn ascii() -> Self {
        Self {
            filled: "=".into(),
            head: ">".into(),
            empty: "-".into(),
            bar_start: "[".into(),
            bar_end: "]".into(),
        }
    }

    /// `|████▌     |`
    pub fn unicode() -> Self {
        Self {
            filled: "█".into(),
            head: String::new(),
            empty: " ".into(),
            bar_start: "|".into(),
            bar_end: "|".into(),
        }
    }

    /// Build an unbracketed theme from a progression character set.
    ///
    /// The first character is the filled glyph, the last the empty glyph and
    /// everything in between the head.
    pub fn from_chars(chars: &str) -> Self {
        let glyphs: Vec<char> = chars.chars().collect();
        let (filled, empty) = match (glyphs.first(), glyphs.last()) {
            (Some(first), Some(last)) if glyphs.len() > 1 => (first.to_string(), last.to_string()),
            _ => (chars.to_string(), String::new()),
        };
        let head = if glyphs.len() > 2 {
            glyphs[1..glyphs.len() - 1].iter().collect()
        } else {
            String::new()
        };
        Self {
            filled,
            head,
            empty,
            bar_start: String::new(),
            bar_end: String::new(),
        }
    }

    /// Set the text around the bar segment.
    pub fn with_ends(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.bar_start = start.into();
        self.bar_end = end.into();
        self
    }

    /// The progression character set handed to the widget.
    pub fn progress_chars(&self) -> String {
        format!("{}{}{}", self.filled, self.head, self.empty)
    }

    pub(crate) fn check(&self) -> Result<()> {
        let glyphs: Vec<String> = self.progress_chars().chars().map(String::from).collect();
        if !drawable(&glyphs) {
            return Err(Error::InvalidGlyphs(format!(
                "theme {:?} needs at least 2 glyphs of equal width",
                self.progress_chars()
            )));
        }
        Ok(())
    }
}

/// Built-in spinner frame sets for indeterminate bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    #[default]
    Dots,
    Line,
    Arc,
    Arrow,
    Bounce,
}

impl SpinnerStyle {
    /// Frames of the spinner. The last frame is shown once the bar is finished.
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"],
            SpinnerStyle::Line => &["-", "\\", "|", "/", "-"],
            SpinnerStyle::Arc => &["◜", "◠", "◝", "◞", "◡", "◟", "○"],
            SpinnerStyle::Arrow => &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙", "•"],
            SpinnerStyle::Bounce => &["⠁", "⠂", "⠄", "⠂", "⠿"],
        }
    }
}

pub(crate) fn check_frames(frames: &[String]) -> Result<()> {
    if !drawable(frames) {
        return Err(Error::InvalidGlyphs(format!(
            "spinner {frames:?} needs at least 2 frames of equal width"
        )));
    }
    Ok(())
}

fn drawable(glyphs: &[String]) -> bool {
    let mut widths = glyphs.iter().map(|g| console::measure_text_width(g));
    match widths.next() {
        Some(first) => glyphs.len() >= 2 && widths.all(|w| w == first),
        None => false,
    }
}

fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Assemble the template for a bar.
///
/// `finishing` selects the variant drawn once the bar is complete: the remaining
/// time is dropped and the elapsed time only stays with `elapsed_on_finish`.
pub(crate) fn template(config: &BarConfig, determinate: bool, finishing: bool) -> String {
    let label = if config.color_codes { "{msg:.bold}" } else { "{msg}" };
    let mut segments: Vec<String> = Vec::new();

    if !config.description_at_line_end {
        segments.push(label.into());
    }

    if determinate {
        segments.push("{percent:>3}%".into());
        segments.push(bar_segment(config));
    } else if config.color_codes {
        segments.push("{spinner:.green}".into());
    } else {
        segments.push("{spinner}".into());
    }

    if let Some(counter) = counter_segment(config, determinate) {
        segments.push(counter);
    }
    if config.show_rate {
        segments.push(rate_segment(config));
    }
    if let Some(time) = time_segment(config, determinate, finishing) {
        segments.push(time.into());
    }

    if config.description_at_line_end {
        segments.push(label.into());
    }

    let mut template = segments.join(" ");
    if config.max_detail_rows > 0 {
        template.push_str("\n{details}");
    }
    template
}

fn bar_segment(config: &BarConfig) -> String {
    let key = match (config.width, config.color_codes) {
        (BarWidth::Full, true) => "{wide_bar:.cyan/blue}".to_string(),
        (BarWidth::Full, false) => "{wide_bar}".to_string(),
        (BarWidth::Fixed(width), true) => format!("{{bar:{width}.cyan/blue}}"),
        (BarWidth::Fixed(width), false) => format!("{{bar:{width}}}"),
    };
    format!(
        "{}{key}{}",
        escape(&config.theme.bar_start),
        escape(&config.theme.bar_end)
    )
}

fn counter_segment(config: &BarConfig, determinate: bool) -> Option<String> {
    if config.show_bytes {
        let (pos, len) = if config.iec_units {
            ("{binary_bytes}", "{binary_total_bytes}")
        } else {
            ("{decimal_bytes}", "{decimal_total_bytes}")
        };
        if determinate && config.show_total_bytes {
            Some(format!("({pos}/{len})"))
        } else {
            Some(format!("({pos})"))
        }
    } else if config.show_count {
        Some(if determinate { "({pos}/{len})" } else { "({pos})" }.into())
    } else {
        None
    }
}

fn rate_segment(config: &BarConfig) -> String {
    match (config.show_bytes, config.iec_units) {
        (true, true) => "({binary_bytes_per_sec})".into(),
        (true, false) => "({decimal_bytes_per_sec})".into(),
        // Drawn by the custom key registered in `BarConfig::to_progress_style`.
        (false, _) => "({rate})".into(),
    }
}

fn time_segment(config: &BarConfig, determinate: bool, finishing: bool) -> Option<&'static str> {
    let elapsed = if finishing {
        config.elapsed_on_finish
    } else {
        config.elapsed_time
    };
    let predict = config.predict_time && determinate && !finishing;
    match (elapsed, predict) {
        (true, true) => Some("[{elapsed}:{eta}]"),
        (true, false) => Some("[{elapsed}]"),
        (false, true) => Some("[{eta}]"),
        (false, false) => None,
    }
}
