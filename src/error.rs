//! Error handling for the stepbar library.
//!
//! This module provides centralized error handling for progress bar construction,
//! lifecycle operations and task execution. Every command issued on a
//! [`StepBar`](crate::StepBar) returns its error immediately and also records it
//! in the bar's error log, which can be read back as a single [`Error::Combined`].

use std::io;
use thiserror::Error;

/// Boxed error returned by a failing task.
pub type TaskError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can happen when using stepbar.
#[derive(Error, Debug)]
pub enum Error {
    /// A lifecycle operation was issued before the bar was created.
    ///
    /// The handle stays usable: the operation becomes a no-op and the error is
    /// recorded in the handle's error log.
    #[error("progress bar is nil")]
    NilBar,

    /// The total given for a determinate bar is not positive.
    ///
    /// Use [`INDETERMINATE`](crate::INDETERMINATE) to build a spinner instead.
    #[error("total must be greater than 0, got {0}")]
    InvalidTotal(i64),

    /// Advancing would move the bar past its total while `error_on_overflow` is set.
    #[error("current number {current} exceeds total {total}")]
    Overflow { current: u64, total: u64 },

    /// The assembled template was rejected by the rendering widget.
    #[error("invalid progress template")]
    Template {
        #[from]
        source: indicatif::style::TemplateError,
    },

    /// A theme or spinner frame set the widget cannot draw.
    ///
    /// Bars need at least two glyphs of the same display width.
    #[error("invalid glyphs: {0}")]
    InvalidGlyphs(String),

    /// A registered task reported a failure.
    ///
    /// The runner never retries: the first failing task halts the run.
    #[error("task {name} failed: {source}")]
    Task {
        index: usize,
        name: String,
        #[source]
        source: TaskError,
    },

    /// Every error recorded on a handle, in call order.
    #[error("{}", .messages.join("; "))]
    Combined { messages: Vec<String> },

    /// I/O Error.
    ///
    /// Raised by the metrics exporter when binding or serving fails.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from serde_json while encoding or decoding a state snapshot.
    #[error("JSON error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type alias for operations that can fail with a stepbar error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// A copy of this error for a handle's error log.
    ///
    /// Variants wrapping a foreign error keep only its message.
    pub(crate) fn replicate(&self) -> Error {
        match self {
            Error::NilBar => Error::NilBar,
            Error::InvalidTotal(total) => Error::InvalidTotal(*total),
            Error::Overflow { current, total } => Error::Overflow {
                current: *current,
                total: *total,
            },
            Error::InvalidGlyphs(reason) => Error::InvalidGlyphs(reason.clone()),
            Error::Combined { messages } => Error::Combined {
                messages: messages.clone(),
            },
            Error::IOError { source } => Error::IOError {
                source: io::Error::new(source.kind(), source.to_string()),
            },
            other => Error::Combined {
                messages: vec![other.to_string()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_joins_in_order() {
        let err = Error::Combined {
            messages: vec!["first".into(), "second".into()],
        };
        assert_eq!(err.to_string(), "first; second");
    }

    #[test]
    fn task_error_keeps_source() {
        let err = Error::Task {
            index: 1,
            name: "upload".into(),
            source: "connection reset".into(),
        };
        assert_eq!(err.to_string(), "task upload failed: connection reset");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn replicate_keeps_kind_and_message() {
        let err = Error::Overflow { current: 4, total: 3 };
        assert!(matches!(err.replicate(), Error::Overflow { current: 4, total: 3 }));

        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        match err.replicate() {
            Error::IOError { source } => assert_eq!(source.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected {other:?}"),
        }
    }
}
