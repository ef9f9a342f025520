// SPDX-License-Identifier: MPL-2.0
//! Console logging.
//!
//! Filtering follows the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=photo_viewer::viewport=trace` - module-level filtering
//!
//! Without it only warnings and errors are printed.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    if let Err(err) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Warning: logging already initialized: {err}");
    }
}
