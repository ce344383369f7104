//! Logging setup.
//!
//! The library only emits `tracing` events. Binaries and demos call [`init`]
//! once to print them on stderr. `RUST_LOG` takes precedence over the default
//! directive:
//!
//! ```bash
//! RUST_LOG=stepbar=debug cargo run --example run_tasks
//! ```

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `RUST_LOG`, or by `default_directive`
/// (e.g. `"info"` or `"stepbar=debug"`) when it is unset.
///
/// Safe to call multiple times; only the first call takes effect. A subscriber
/// installed by someone else is left in place.
pub fn init(default_directive: &str) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(default_directive)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    });
}
