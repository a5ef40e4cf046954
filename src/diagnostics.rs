//! Diagnostic log sink
//!
//! Installs a `tracing` subscriber that appends one line per event to a log
//! file:
//!
//! ```text
//! [2026-10-16T09:12:44.118203Z] [INFO] stmt-sequence is found
//! [2026-10-16T09:12:44.118251Z] [ERROR] Unexpected token: [write], expected: [then] at line 1, column 6
//! ```
//!
//! The file is truncated when the sink is installed. `RUST_LOG` takes
//! precedence over the configured filter.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

/// The diagnostic sink could not be installed; nothing has been parsed yet.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("cannot open log file {}: {source}", path.display())]
    OpenLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("a global logger is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// `[<timestamp>] [<LEVEL>] <message>` event format
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[")?;
        SystemTime.format_time(&mut writer)?;
        write!(writer, "] [{}] ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Create (or truncate) the log file.
pub fn open_log(path: &Path) -> Result<File, SetupError> {
    File::create(path).map_err(|source| SetupError::OpenLog {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the filter from `RUST_LOG`, falling back to `default_filter`.
pub fn build_filter(default_filter: &str) -> Result<EnvFilter, SetupError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_filter).map_err(|source| SetupError::InvalidFilter {
            filter: default_filter.to_string(),
            source,
        }),
    }
}

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path, default_filter: &str) -> Result<(), SetupError> {
    let filter = build_filter(default_filter)?;
    let file = open_log(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(filter),
        )
        .try_init()?;

    Ok(())
}
