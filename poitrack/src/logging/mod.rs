//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events. Binaries call
//! [`init_logging`] once at startup to route them to stderr and, when a
//! directory is configured, to a daily rolling log file.
//!
//! `RUST_LOG` overrides the default filter.

use std::path::PathBuf;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

/// File name prefix of the rolling log file.
pub const LOG_FILE_NAME: &str = "poitrack.log";

const DEFAULT_DIRECTIVE: &str = "poitrack=info";
const VERBOSE_DIRECTIVE: &str = "poitrack=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Logging options chosen by the host.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Log debug events from this crate.
    pub verbose: bool,
    /// Directory for the rolling log file. `None` logs to stderr only.
    pub directory: Option<PathBuf>,
}

impl LogOptions {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            VERBOSE_DIRECTIVE
        } else {
            DEFAULT_DIRECTIVE
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the life of the process. It is `None` when no log directory is set.
pub fn init_logging(options: &LogOptions) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(options.default_directive())?,
    };

    let timer = local_timer();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_target(false);

    let (file_layer, guard) = match &options.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_timer(timer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

/// RFC 3339 timestamps in the local offset, or UTC when the offset cannot
/// be determined (e.g. multi-threaded processes on some platforms).
fn local_timer() -> OffsetTime<Rfc3339> {
    OffsetTime::local_rfc_3339().unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339))
}
