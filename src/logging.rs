use std::io;

use chrono::Utc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogKind};

/// Installs the global subscriber.
///
/// The returned guard flushes the log file on drop, keep it alive until exit.
pub fn init(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match config.log_kind {
        LogKind::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
            None
        }
        LogKind::File => {
            let filename = format!("ls8-{}.log", Utc::now().timestamp());
            eprintln!(
                "Logging to file: {}",
                std::env::temp_dir().join(&filename).display()
            );

            let appender = tracing_appender::rolling::never(std::env::temp_dir(), filename);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
    }
}
