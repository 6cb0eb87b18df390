//! Logging initialization.
//!
//! Two profiles, selected by `HAVEN_ENV`:
//! - production: JSON logs to daily-rolling files plus compact stdout for
//!   the journal
//! - development: pretty stdout with span events
//!
//! `HAVEN_LOG_LEVEL` (or a standard `RUST_LOG` filter) controls verbosity.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Non-blocking writer guards must outlive the subscriber or buffered log
// lines are lost on shutdown.
static GUARDS: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log filter cannot be parsed.
pub fn init(is_production: bool) -> anyhow::Result<()> {
    let default_level =
        std::env::var("HAVEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&default_level))?;

    if is_production {
        let log_dir = log_directory();
        std::fs::create_dir_all(&log_dir).ok();

        let (file_writer, file_guard) = tracing_appender::non_blocking(
            RollingFileAppender::new(Rotation::DAILY, &log_dir, "haven"),
        );
        let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_file(true)
                    .with_line_number(true)
                    .with_thread_ids(true),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(stdout_writer)
                    .with_ansi(false),
            )
            .init();

        let _ = GUARDS.set(vec![file_guard, stdout_guard]);
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE),
            )
            .init();
    }

    Ok(())
}

/// Log directory for the current platform.
fn log_directory() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/var/log/haven")
    }
    #[cfg(not(target_os = "linux"))]
    {
        directories::ProjectDirs::from("", "", "haven")
            .map(|dirs| dirs.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("./logs"))
    }
}
