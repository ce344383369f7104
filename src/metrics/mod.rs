//! Metrics module exposing a bar's state over HTTP.
//!
//! - `exporter` - [`Exporter`] and its [`ExporterConfig`]

pub(crate) mod exporter;

pub use exporter::{Exporter, ExporterConfig, DEFAULT_METRICS_ADDR, METRICS_ADDR_ENV};
