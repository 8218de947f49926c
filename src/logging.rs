//! `tracing` setup.
//!
//! The TUI owns the terminal, so log output goes to a file through a
//! non-blocking appender. Headless commands may additionally mirror to
//! stderr. Call [`init_logging`] once near process start; later calls
//! return the already-resolved path.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_NAME: &str = "feedback-widget";
const LOG_FILE: &str = "feedback.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open log file {path}: {source}")]
    Appender {
        path: PathBuf,
        #[source]
        source: InitError,
    },
    #[error("tracing setup failed: {0}")]
    Init(String),
}

/// Options for [`init_logging`].
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Explicit log file. Takes precedence over `log_dir`.
    pub log_file: Option<PathBuf>,
    /// Directory for `feedback.log`. `None` means the platform data dir.
    pub log_dir: Option<PathBuf>,
    /// Mirror events to stderr. Never set while the TUI is running.
    pub emit_stderr: bool,
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset.
    pub verbose: bool,
}

/// Install the global subscriber. Returns the log file path.
pub fn init_logging(config: &LogConfig) -> Result<PathBuf, LoggingError> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let full_path = resolve_log_path(config);
    let dir = full_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = full_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE.to_string());

    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&dir)
        .map_err(|source| LoggingError::Appender {
            path: full_path.clone(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let default_filter = if config.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
    let stderr_layer = config
        .emit_stderr
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    // Guard and path are recorded only once a subscriber is installed
    let _ = LOG_GUARD.set(guard);
    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

/// Where the log file goes: explicit file, then configured dir, then the
/// platform data dir, then the working directory.
pub fn resolve_log_path(config: &LogConfig) -> PathBuf {
    if let Some(file) = &config.log_file {
        return file.clone();
    }
    let dir = config
        .log_dir
        .clone()
        .or_else(|| dirs::data_local_dir().map(|d| d.join(APP_NAME)))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(LOG_FILE)
}
