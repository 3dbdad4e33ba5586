//! Tracing setup for the command-line front end
//!
//! Console-only structured logging. Filtering follows RUST_LOG:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=tabcheck::classify=trace` - module-level filtering
//!
//! Defaults to `warn` so normal runs stay quiet.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber. Call once, before any engine work.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
