//! # Logger
//!
//! Global `tracing` setup for the workspace: a console layer, an optional
//! rolling file layer (plain or JSON) with non-blocking I/O, and filtering
//! that combines a programmatic default with `RUST_LOG`.
//!
//! The builder is typestate-driven: a logger name is required before `init`,
//! and the file-only knobs (`rotation`, `max_files`, `json`) only appear once
//! a path has been set.
//!
//! ## Example
//!
//! ```rust
//! # use sdash_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("my-app")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Configures and installs the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: LoggerConfig,
    name: N,
    file_state: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Names the logger; the name also prefixes rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { name: WithName(name.into()), config: self.config, file_state: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Caps how many rotated files are kept on disk.
    #[must_use = "call .init() to install the subscriber"]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Picks the rotation cadence for the file layer.
    #[must_use = "call .init() to install the subscriber"]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Switches the file layer to JSON lines.
    #[must_use = "call .init() to install the subscriber"]
    pub const fn json(mut self) -> Self {
        self.config.json = true;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Minimum level emitted when no filter directive matches.
    #[must_use = "call .init() to install the subscriber"]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Programmatic filter default, e.g. `sdash=debug,hyper=info`.
    ///
    /// `RUST_LOG` still wins when set. A filter that does not parse makes
    /// [`LoggerBuilder::init`] fail.
    #[must_use = "call .init() to install the subscriber"]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Toggles the console layer.
    #[must_use = "call .init() to install the subscriber"]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Enables the rolling file layer, writing under `path`.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.path = Some(path.into());
        LoggerBuilder { config, name: self.name, file_state: PhantomData }
    }

    /// Installs the global subscriber and hands back the [`Logger`] handle.
    ///
    /// The handle owns the non-blocking writer's [`WorkerGuard`]; keep it
    /// alive for the whole program run or buffered file output is lost.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] when a global subscriber is already set,
    /// [`LoggerError::InvalidConfiguration`] for bad builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        if name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration("Logger name cannot be empty".into()));
        }
        if self.config.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration(
                "max_files must be greater than zero".into(),
            ));
        }
        if !self.config.console && self.config.path.is_none() {
            return Err(LoggerError::InvalidConfiguration(
                "No logging layers enabled. Enable console or file output.".into(),
            ));
        }

        let env_filter = build_env_filter(&self.config)?;

        let mut layers = Vec::new();
        if self.config.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match self.config.path {
            Some(ref path) => {
                let (file_layer, guard) = build_file_layer(&self.config, path, &name)?;
                layers.push(file_layer);
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    match config.env_filter {
        None => Ok(builder.from_env_lossy()),
        Some(ref filter) => builder.parse(filter).map_err(|e| {
            LoggerError::InvalidConfiguration(format!("Invalid env filter '{filter}': {e}").into())
        }),
    }
}

fn build_file_layer<S>(
    config: &LoggerConfig,
    path: &PathBuf,
    name: &str,
) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard), LoggerError>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fs::create_dir_all(path).map_err(|e| {
        LoggerError::Internal(format!("Failed to create path {}: {e}", path.display()).into())
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.max_files)
        .build(path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let file_layer = layer().with_writer(non_blocking).with_ansi(false);

    let boxed = if config.json { file_layer.json().boxed() } else { file_layer.boxed() };
    Ok((boxed, guard))
}

/// Handle to the installed logging system.
///
/// Holds the background writer guard; drop it only on shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a [`LoggerBuilder`].
    ///
    /// Rolling files are named after the logger, e.g. `my-app.2026-08-26.log`.
    #[must_use = "call .init() to install the subscriber"]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName, file_state: PhantomData }
    }

    /// Best-effort synchronization point before shutdown; dropping the
    /// handle flushes as well.
    pub fn flush(&self) {
        tracing::debug!("Logger flushed");
    }

    /// The non-blocking writer guard, when file logging is on.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
