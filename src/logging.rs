//! Tracing subscriber setup for the binary.

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Subscriber;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log file name under the logs directory.
pub const LOG_FILE_NAME: &str = "inplace-translator.log";

/// Local-time timestamps (`YYYY-MM-DD-T HH:MM:SS`).
struct TranslatorTimer;

impl FormatTime for TranslatorTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S"))
    }
}

/// Keeps the non-blocking writer flushing until process exit.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// `RUST_LOG` when set, `level` otherwise.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Human-facing layer on stderr.
fn stderr_layer<S>() -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(true)
        .with_timer(TranslatorTimer)
        .with_writer(std::io::stderr)
        .boxed()
}

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `level`: Default filter directive when `RUST_LOG` is unset
/// - `mirror_stderr`: Also write events to stderr (used by `serve`)
///
/// Output:
/// - Path of the log file when file logging is active, `None` on the stderr fallback
///
/// Details:
/// - Writes to `<config_dir>/logs/inplace-translator.log` through a non-blocking writer.
/// - Falls back to stderr when the file cannot be opened.
/// - A second call is a no-op for the subscriber.
pub fn init(level: &str, mirror_stderr: bool) -> Option<PathBuf> {
    let log_path = crate::config::logs_dir().join(LOG_FILE_NAME);
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(TranslatorTimer);
            let installed = tracing_subscriber::registry()
                .with(env_filter(level))
                .with(file_layer)
                .with(mirror_stderr.then(|| stderr_layer()))
                .try_init()
                .is_ok();
            if installed {
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %log_path.display(), "logging initialized");
            }
            Some(log_path)
        }
        Err(e) => {
            // Fallback: stderr only, startup must not fail on logging
            let _ = tracing_subscriber::registry()
                .with(env_filter(level))
                .with(stderr_layer())
                .try_init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
            None
        }
    }
}
