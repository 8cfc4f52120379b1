//! Stderr backend for the `log` facade.
//!
//! The library only emits records through `log` macros; binaries pick a
//! [`LogLevel`] with [`init_logger`] and call [`Logger::install`] once.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable consulted by [`init_logger`] when no flag is given.
pub const LOG_MODE_ENV: &str = "PREFSTACK_LOG_MODE";

static INSTALLED: OnceLock<Logger> = OnceLock::new();

/// How much the process writes to stderr.
///
/// # Examples
///
/// ```
/// use prefstack::LogLevel;
///
/// assert_eq!("VERBOSE".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing but the final error line.
    Quiet,
    /// Warnings, errors and resolution diagnostics.
    Normal,
    /// Everything, including debug traces from loading and resolving.
    Verbose,
}

impl LogLevel {
    /// The `log` facade filter for this level.
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log mode: {s}")),
        }
    }
}

/// Writes `log` records to stderr, prefixed with their level.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The level this logger was created with.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Installs this logger as the process-wide `log` backend.
    ///
    /// Returns false if a logger was already installed; the first one stays
    /// in place together with its level.
    pub fn install(self) -> bool {
        let logger = INSTALLED.get_or_init(|| self);
        if log::set_logger(logger).is_err() {
            return false;
        }
        log::set_max_level(logger.level.filter());
        true
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Picks the logger level: `verbose`, then `quiet`, then
/// `PREFSTACK_LOG_MODE`, then [`LogLevel::Normal`].
///
/// An unrecognised `PREFSTACK_LOG_MODE` value is ignored.
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = if verbose {
        LogLevel::Verbose
    } else if quiet {
        LogLevel::Quiet
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or(LogLevel::Normal)
    };
    Logger::new(level)
}
