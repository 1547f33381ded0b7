//! This module sets up tracing for the app.

use std::path::Path;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

/// The common prefix for the app's log files.
const LOG_PREFIX: &str = "gesture-tree.log";

/// Initialise a subscriber for tracing to log to `stdout` and, if `log_dir` is given, to a daily
/// log file in that directory.
///
/// The returned guard flushes the log file when dropped, so it must be kept alive until the app
/// exits.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (appender, guard) = non_blocking(rolling::daily(dir, LOG_PREFIX));
            let layer = Layer::new()
                .with_writer(appender)
                .with_ansi(false)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::DEBUG.into())
                        .parse_lossy(""),
                );
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry().with(file_layer).with(
        Layer::new()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            ),
    );

    tracing::subscriber::set_global_default(subscriber)
        .expect_or_log("Setting the global default for tracing should be okay");

    guard
}
