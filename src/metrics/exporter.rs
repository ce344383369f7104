//! HTTP exporter for a bar's state.
//!
//! Serves the live state of one bar so it can be shown elsewhere, for example
//! in an OS status bar. Every request renders a fresh snapshot.
//!
//! | Route    | Body                              |
//! |----------|-----------------------------------|
//! | `/state` | [`BarState`] as JSON              |
//! | `/desc`  | the current label as plain text   |
//!
//! # Examples
//!
//! ```rust,no_run
//! use stepbar::{metrics::ExporterConfig, progress::Options, StepBar};
//!
//! # fn main() -> stepbar::Result<()> {
//! let mut bar = StepBar::with_options(10, Options::new())?;
//! let server = bar.exporter(ExporterConfig::new("127.0.0.1:19999"))?.spawn();
//! for _ in 0..10 {
//!     bar.next()?;
//! }
//! # drop(server);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::progress::{BarState, Probe};

use axum::{extract::State, routing::get, Json, Router};
use std::future::Future;
use std::thread::{self, JoinHandle};
use tokio::net::TcpListener;
use tracing::info;

/// Address used when none is configured.
pub const DEFAULT_METRICS_ADDR: &str = "0.0.0.0:19999";

/// Environment variable read by [`ExporterConfig::from_env`].
pub const METRICS_ADDR_ENV: &str = "STEPBAR_METRICS_ADDR";

/// Configuration for the metrics exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    /// `host:port` to bind.
    pub addr: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_METRICS_ADDR.into(),
        }
    }
}

impl ExporterConfig {
    /// Bind to `addr`, falling back to [`DEFAULT_METRICS_ADDR`] when it is empty.
    pub fn new(addr: impl Into<String>) -> Self {
        let addr = addr.into();
        if addr.trim().is_empty() {
            return ExporterConfig::default();
        }
        Self { addr }
    }

    /// Read the address from `STEPBAR_METRICS_ADDR`, or use the default.
    pub fn from_env() -> Self {
        ExporterConfig::new(std::env::var(METRICS_ADDR_ENV).unwrap_or_default())
    }
}

/// HTTP listener serving one bar's state.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExporterConfig,
    probe: Probe,
}

impl Exporter {
    /// Creates an exporter for the bar behind `probe`.
    pub fn new(config: ExporterConfig, probe: Probe) -> Self {
        Self { config, probe }
    }

    /// The configured address.
    pub fn addr(&self) -> &str {
        &self.config.addr
    }

    /// The routes served by the exporter.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/state", get(state))
            .route("/desc", get(description))
            .with_state(self.probe.clone())
    }

    /// Bind the configured address and serve until the process ends.
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        info!(addr = %listener.local_addr()?, "metrics exporter listening");
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Serve on `listener` until `signal` completes.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %listener.local_addr()?, "metrics exporter listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await?;
        info!("metrics exporter stopped");
        Ok(())
    }

    /// Serve from a dedicated thread with its own runtime, so the caller's
    /// thread stays free to drive the bar.
    pub fn spawn(self) -> JoinHandle<Result<()>> {
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(self.serve())
        })
    }
}

async fn state(State(probe): State<Probe>) -> Json<BarState> {
    Json(probe.state())
}

async fn description(State(probe): State<Probe>) -> String {
    probe.description()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_addr_uses_default() {
        assert_eq!(ExporterConfig::new("").addr, DEFAULT_METRICS_ADDR);
        assert_eq!(ExporterConfig::new("  ").addr, DEFAULT_METRICS_ADDR);
        assert_eq!(ExporterConfig::new("127.0.0.1:8080").addr, "127.0.0.1:8080");
    }
}
