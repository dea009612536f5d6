//! Tracing subscriber setup
//!
//! Shared by the binary and the tests. The terminal belongs to the UI while
//! the picker runs, so everything is written to a log file.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, logging to `log_file_path`.
///
/// Filtering follows `RUST_LOG` with DEBUG as the default level.
pub fn init_global(log_file_path: &Path) -> io::Result<()> {
    if let Some(parent) = log_file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = File::create(log_file_path)?;

    build_subscriber(log_file).init();
    Ok(())
}

/// Build a subscriber that writes formatted events to `log_file`
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let mut env_filter =
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());
    // ureq and rustls are chatty at debug
    for directive in ["ureq=info", "rustls=info"] {
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
