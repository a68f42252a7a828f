//! Leveled logging for the Corvid compiler.
//!
//! A small, dependency-free logger shared by every crate in the workspace.
//! Messages carry the module path of the call site and are written to stderr,
//! coloured by level unless `NO_COLOR` is set.
//!
//! # Example
//!
//! ```
//! use corvid_log::{debug, info, Level};
//!
//! corvid_log::set_level(Level::Debug);
//!
//! let decls = 12;
//! info!("checking {} declarations", decls);
//! debug!("pass flags: {:?}", (true, false));
//! ```
//!
//! The level can also be taken from the environment:
//!
//! ```
//! // CORVID_LOG=trace cargo test
//! corvid_log::init_from_env();
//! ```

use std::fmt::Arguments;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Environment variable consulted by [`init_from_env`].
pub const LOG_ENV_VAR: &str = "CORVID_LOG";

/// Severity of a log message, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures the compiler cannot recover from.
    Error = 0,
    /// Recovered failures worth a second look.
    Warn = 1,
    /// Phase-level progress.
    Info = 2,
    /// Per-declaration detail.
    Debug = 3,
    /// Everything, including constraint bookkeeping.
    Trace = 4,
}

impl Level {
    const ALL: [Level; 5] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    const fn ansi(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Upper-case name used in log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    fn from_u8(raw: u8) -> Level {
        Level::ALL
            .get(usize::from(raw))
            .copied()
            .unwrap_or(Level::Info)
    }
}

/// Error returned when a level name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl std::fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid log level: {}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// Process-wide logger state.
pub struct Logger {
    level: AtomicU8,
    colour: AtomicBool,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            colour: AtomicBool::new(true),
        }
    }

    /// Sets the most verbose level that will be printed.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current maximum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Returns `true` if a message at `level` would be printed.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    /// Turns ANSI colouring on or off.
    pub fn set_colour(&self, on: bool) {
        self.colour.store(on, Ordering::Relaxed);
    }

    fn colour(&self) -> bool {
        self.colour.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at `Level::Warn` on first use.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the level of the global logger.
pub fn set_level(level: Level) {
    logger().set_level(level);
}

/// Parses `s` and sets the level of the global logger.
///
/// ```
/// corvid_log::set_level_from_str("debug").unwrap();
/// assert!(corvid_log::set_level_from_str("loud").is_err());
/// ```
pub fn set_level_from_str(s: &str) -> Result<(), ParseLevelError> {
    set_level(s.parse()?);
    Ok(())
}

/// Configures the global logger from `CORVID_LOG` and `NO_COLOR`.
///
/// An unset or unparsable `CORVID_LOG` leaves the level unchanged.
pub fn init_from_env() {
    if let Ok(value) = std::env::var(LOG_ENV_VAR) {
        if let Ok(level) = value.parse() {
            set_level(level);
        }
    }
    if std::env::var_os("NO_COLOR").is_some() {
        logger().set_colour(false);
    }
}

#[doc(hidden)]
pub fn __write(level: Level, target: &str, args: Arguments<'_>) {
    let logger = logger();
    if !logger.enabled(level) {
        return;
    }

    if logger.colour() {
        eprintln!("{}[{}]\x1b[0m {target}: {args}", level.ansi(), level.as_str());
    } else {
        eprintln!("[{}] {target}: {args}", level.as_str());
    }
}

/// Logs at an explicit level.
///
/// ```
/// use corvid_log::{log, Level};
///
/// log!(level: Level::Info, "{} pass complete", "first");
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $crate::logger().enabled(level) {
            $crate::__write(level, module_path!(), format_args!($($arg)*));
        }
    }};
}

/// Logs at `Level::Error`.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at `Level::Warn`.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at `Level::Info`.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at `Level::Debug`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at `Level::Trace`.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
