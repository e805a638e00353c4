//! Logging for the validates-url crates
//!
//! Leveled log macros whose threshold is read once from the environment and
//! can be changed at runtime. Records go to stderr as JSON lines by default.
//!
//! # Usage
//!
//! ```rust
//! use validates_url_log::{debug, info, warn};
//!
//! debug!("checking {}", "homepage");
//! info!(target: "validates_url::catalog", "loaded {} bundles", 2);
//! warn!("skipping unreadable catalog file");
//! ```
//!
//! # Environment Variables
//!
//! - `VALIDATES_URL_DEBUG=1` - Enable debug logging
//! - `VALIDATES_URL_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `VALIDATES_URL_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `VALIDATES_URL_LOG_COLOR=1|0` - Enable/disable colors
//! - `VALIDATES_URL_LOG_TIMESTAMPS=1|0` - Prefix records with a timestamp

use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::io::{IsTerminal, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

const ENV_PREFIX: &str = "VALIDATES_URL";

// ============================================================================
// Levels and formats
// ============================================================================

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Nothing is emitted
    Off = 5,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl FromStr for Level {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(UnknownSetting(s.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable, optionally colored
    Pretty,
    /// One short line per record
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            _ => Err(UnknownSetting(s.to_string())),
        }
    }
}

/// An environment value that names no known level or format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSetting(pub String);

impl fmt::Display for UnknownSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log setting: {}", self.0)
    }
}

impl std::error::Error for UnknownSetting {}

// ============================================================================
// Global state
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Output configuration, read from the environment on first use.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
            timestamps: true,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

fn env_flag(name: &str) -> Option<bool> {
    env_var(name).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Build the configuration from `VALIDATES_URL_*` variables and publish
    /// the resulting level to the global switches.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("DEBUG").unwrap_or(defaults.debug);

        let level = env_var("LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env_var("LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);

        let color = env_flag("LOG_COLOR").unwrap_or_else(|| {
            env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
        });

        let timestamps = env_flag("LOG_TIMESTAMPS").unwrap_or(defaults.timestamps);

        DEBUG_ENABLED.store(debug, Ordering::SeqCst);
        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Read the environment now instead of on the first emitted record.
pub fn init() {
    Lazy::force(&CONFIG);
}

#[inline]
pub fn is_debug_enabled() -> bool {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    Lazy::force(&CONFIG);
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the threshold at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode. Turning it on also lowers the threshold to `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Output
// ============================================================================

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let config = config();

    match config.format {
        Format::Pretty => write_pretty(level, target, message, config),
        Format::Compact => write_compact(level, target, message, config),
        Format::Json => write_json(level, target, message),
    }
}

fn write_pretty(level: Level, target: &str, message: &str, config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(stderr, "{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
    }

    #[cfg(feature = "color")]
    if config.color {
        let _ = write!(stderr, "{:5} ", level.colored());
    } else {
        let _ = write!(stderr, "{:5} ", level.as_str());
    }
    #[cfg(not(feature = "color"))]
    let _ = write!(stderr, "{:5} ", level.as_str());

    if !target.is_empty() {
        let _ = write!(stderr, "[{}] ", target);
    }

    let _ = writeln!(stderr, "{}", message);
}

fn write_compact(level: Level, target: &str, message: &str, config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();

    if config.timestamps {
        let _ = write!(stderr, "{} ", chrono::Local::now().format("%H:%M:%S"));
    }

    let initial = level.as_str().chars().next().unwrap_or('?');
    if target.is_empty() {
        let _ = writeln!(stderr, "{} {}", initial, message);
    } else {
        let _ = writeln!(stderr, "{} {}: {}", initial, target, message);
    }
}

#[cfg(feature = "json")]
fn write_json(level: Level, target: &str, message: &str) {
    #[derive(serde::Serialize)]
    struct Record<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    if let Ok(line) = serde_json::to_string(&record) {
        eprintln!("{}", line);
    }
}

#[cfg(not(feature = "json"))]
fn write_json(level: Level, target: &str, message: &str) {
    eprintln!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target.escape_default(),
        message.escape_default()
    );
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, $target, &format!($($arg)+));
        }
    };
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Trace, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Trace, module_path!(), $($arg)+)
    };
}

/// Log a debug message.
///
/// Emitted when `VALIDATES_URL_DEBUG=1` or the level is `debug` or lower.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Info, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Info, module_path!(), $($arg)+)
    };
}

/// Log a warning.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Warn, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Warn, module_path!(), $($arg)+)
    };
}

/// Log an error.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Error, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Error, module_path!(), $($arg)+)
    };
}

// ============================================================================
// Tracing bridge
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber that starts from the same level as the macros.
    //! `RUST_LOG` still wins when it is set.

    use super::*;

    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let directive = match config.level {
            Level::Off => "off".to_string(),
            other => other.as_str().to_lowercase(),
        };

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }
}
