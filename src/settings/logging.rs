use anyhow::Result;
use std::io::{stderr, IsTerminal};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use crate::settings::{
    consts::{DEFAULT_LOG_LEVEL, FILE_LOG_LEVEL, LOG_FILE},
    paths::data_dir,
};

/// Console filter from `RUST_LOG`, falling back to the default level when unset or invalid.
fn console_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Log to stderr, and as JSON to `beeline.log` next to the saved sessions.
pub fn init_logger() -> Result<()> {
    let directory = data_dir()?;

    let console_layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(console_filter(std::env::var("RUST_LOG").ok().as_deref()));

    // Response bodies are only logged at TRACE and stay off the disk.
    let file_layer = fmt::layer()
        .json()
        .with_writer(rolling::never(&directory, LOG_FILE))
        .with_target(true)
        .flatten_event(true)
        .with_filter(FILE_LOG_LEVEL);

    registry().with(console_layer).with(file_layer).try_init()?;

    Ok(())
}
