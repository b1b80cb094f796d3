//! Logging utilities and structured logging support
//!
//! [`Logger`] writes timestamped, leveled lines to the console and appends
//! them to a log file:
//!
//! ```text
//! [2024-05-01 18:42:07] CRITICAL: Failed to initialize GLFW
//! ```
//!
//! It implements [`log::Log`], so once [`init`] has installed it the usual
//! `log` macros route through it. `log` has no level above `Error`; use the
//! crate's `critical!` macro for [`LogLevel::Critical`].

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use env_logger::filter::{Builder as FilterBuilder, Filter};
use log::{LevelFilter, Metadata, Record};
use serde::{Deserialize, Serialize};

use crate::core::config::LoggingConfig;

pub use log::{debug, error, info, trace, warn};

/// Target carried by records emitted through `critical!`
pub const CRITICAL_TARGET: &str = "critical";

/// Environment variable whose filter replaces the configured one
pub const FILTER_ENV: &str = "RUST_LOG";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity of a log entry, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Diagnostic detail
    Debug,
    /// Normal operation
    Info,
    /// Something unexpected that the engine can continue past
    Warning,
    /// An operation failed
    Error,
    /// The engine cannot continue in its current state
    Critical,
}

impl LogLevel {
    /// Name written into log entries
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Level of a `log` record, treating `Error` records on the
    /// [`CRITICAL_TARGET`] target as critical
    pub fn of_record(record: &Record<'_>) -> Self {
        if record.level() == log::Level::Error && record.target() == CRITICAL_TARGET {
            Self::Critical
        } else {
            record.level().into()
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warning => Self::Warn,
            LogLevel::Error | LogLevel::Critical => Self::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging setup errors
#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
    /// A global logger was installed before this one
    #[error("a global logger is already installed: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Format a single log line, including the trailing newline
pub fn format_entry(timestamp: &str, level: LogLevel, message: &str) -> String {
    format!("[{timestamp}] {level}: {message}\n")
}

/// Console and file sink for leveled log messages
pub struct Logger {
    file: Option<Mutex<File>>,
    path: PathBuf,
    filter: Filter,
    min_level: Option<LogLevel>,
    echo_to_console: bool,
}

impl Logger {
    /// Create a logger from configuration.
    ///
    /// `RUST_LOG`, when set, takes precedence over `config.filter`. If the log
    /// file cannot be opened the logger keeps working console-only.
    pub fn new(config: &LoggingConfig) -> Self {
        let spec = filter_spec(config, std::env::var(FILTER_ENV).ok());
        Self::with_filter(config, &spec)
    }

    fn with_filter(config: &LoggingConfig, spec: &str) -> Self {
        let filter = FilterBuilder::new().parse(spec).build();
        let min_level = default_minimum(&filter);
        let path = config.log_dir.join(&config.file_name);

        let file = match open_log_file(&config.log_dir, &path) {
            Ok(file) => Some(Mutex::new(file)),
            Err(err) => {
                eprintln!("WARNING : Log file could not be opened... ({}: {err})", path.display());
                None
            }
        };

        Self {
            file,
            path,
            filter,
            min_level,
            echo_to_console: config.echo_to_console,
        }
    }

    /// Path of the log file this logger appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether entries are reaching the log file
    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Whether a message at `level` would be written by [`Logger::log`].
    ///
    /// The threshold comes from the filter's default directive; module
    /// directives only apply to records arriving through the `log` facade.
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.min_level.is_some_and(|min| level >= min)
    }

    /// Record `message` at `level`
    pub fn log(&self, level: LogLevel, message: &str) {
        if self.accepts(level) {
            self.write_entry(level, message);
        }
    }

    fn write_entry(&self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let entry = format_entry(&timestamp, level, message);

        if self.echo_to_console {
            print!("{entry}");
        }

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                // Nowhere left to report a failing log write.
                let _ = file.write_all(entry.as_bytes()).and_then(|()| file.flush());
            }
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        let level = LogLevel::of_record(record);
        // Critical entries bypass per-module directives, but not `off`.
        if (level == LogLevel::Critical && self.accepts(level)) || self.filter.matches(record) {
            self.write_entry(level, &record.args().to_string());
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Filter to parse: the environment value when present, the configured one otherwise
fn filter_spec(config: &LoggingConfig, env_value: Option<String>) -> String {
    env_value.unwrap_or_else(|| config.filter.clone())
}

/// Lowest level enabled by the target-less directive. Without one, only
/// critical entries pass unless the whole filter is `off`.
fn default_minimum(filter: &Filter) -> Option<LogLevel> {
    let untargeted = [LogLevel::Debug, LogLevel::Info, LogLevel::Warning, LogLevel::Error]
        .into_iter()
        .find(|&level| filter.enabled(&Metadata::builder().level(level.into()).target("").build()));

    match untargeted {
        Some(level) => Some(level),
        None if filter.filter() == LevelFilter::Off => None,
        None => Some(LogLevel::Critical),
    }
}

fn open_log_file(dir: &Path, path: &Path) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install a [`Logger`] built from `config` as the global `log` logger
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let logger = Logger::new(config);
    let max_level = logger.filter.filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Log at [`LogLevel::Critical`] through the `log` facade
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::log::error!(target: $crate::foundation::logging::CRITICAL_TARGET, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn temp_log_config(name: &str) -> LoggingConfig {
        let dir = std::env::temp_dir().join(format!("nt_engine_logging_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        LoggingConfig {
            log_dir: dir,
            file_name: "engine.log".to_string(),
            filter: "info".to_string(),
            echo_to_console: false,
        }
    }

    fn read_log(logger: &Logger) -> String {
        fs::read_to_string(logger.path()).unwrap_or_default()
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn test_level_names() {
        let names: Vec<_> = [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Critical,
        ]
        .iter()
        .map(|level| level.to_string())
        .collect();
        assert_eq!(names, ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]);
    }

    #[test]
    fn test_log_crate_level_mapping() {
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Debug);
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warning);
        assert_eq!(log::Level::from(LogLevel::Critical), log::Level::Error);
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry("2024-01-02 03:04:05", LogLevel::Warning, "low memory"),
            "[2024-01-02 03:04:05] WARNING: low memory\n"
        );
    }

    #[test]
    fn test_writes_entries_at_or_above_min_level() {
        let config = temp_log_config("levels");
        let logger = Logger::with_filter(&config, "info");
        assert!(logger.has_file());

        logger.log(LogLevel::Debug, "hidden detail");
        logger.log(LogLevel::Info, "engine started");
        logger.log(LogLevel::Critical, "shader link failed");

        let contents = read_log(&logger);
        assert!(!contents.contains("hidden detail"));
        assert!(contents.contains("] INFO: engine started\n"));
        assert!(contents.contains("] CRITICAL: shader link failed\n"));
        assert!(contents.starts_with('['));
    }

    #[test]
    fn test_appends_across_loggers() {
        let config = temp_log_config("append");
        Logger::with_filter(&config, "debug").log(LogLevel::Info, "first run");
        let second = Logger::with_filter(&config, "debug");
        second.log(LogLevel::Info, "second run");

        let contents = read_log(&second);
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().next().is_some_and(|line| line.ends_with("first run")));
    }

    #[test]
    fn test_off_filter_drops_everything() {
        let config = temp_log_config("off");
        let logger = Logger::with_filter(&config, "off");
        logger.log(LogLevel::Critical, "never written");
        assert!(!logger.accepts(LogLevel::Critical));
        assert_eq!(read_log(&logger), "");
    }

    #[test]
    fn test_unopenable_file_falls_back_to_console() {
        let config = temp_log_config("blocked");
        fs::create_dir_all(config.log_dir.parent().unwrap_or(Path::new("."))).unwrap();
        // A regular file where the log directory should be.
        fs::write(&config.log_dir, b"not a directory").unwrap();

        let logger = Logger::with_filter(&config, "info");
        assert!(!logger.has_file());
        logger.log(LogLevel::Error, "still fine");

        fs::remove_file(&config.log_dir).unwrap();
    }

    #[test]
    fn test_log_facade_records() {
        let config = temp_log_config("facade");
        let logger = Logger::with_filter(&config, "warn");

        Log::log(
            &logger,
            &Record::builder()
                .args(format_args!("ignored info"))
                .level(log::Level::Info)
                .target("nt_engine")
                .build(),
        );
        Log::log(
            &logger,
            &Record::builder()
                .args(format_args!("disk almost full"))
                .level(log::Level::Warn)
                .target("nt_engine")
                .build(),
        );
        Log::log(
            &logger,
            &Record::builder()
                .args(format_args!("context lost"))
                .level(log::Level::Error)
                .target(CRITICAL_TARGET)
                .build(),
        );

        let contents = read_log(&logger);
        assert!(!contents.contains("ignored info"));
        assert!(contents.contains("WARNING: disk almost full"));
        assert!(contents.contains("CRITICAL: context lost"));
    }

    #[test]
    fn test_direct_api_follows_default_directive() {
        let config = temp_log_config("default_directive");
        let logger = Logger::with_filter(&config, "info,nt_engine=debug,sandbox=debug");

        assert!(!logger.accepts(LogLevel::Debug));
        assert!(logger.accepts(LogLevel::Info));
        logger.log(LogLevel::Debug, "frame timings");
        logger.log(LogLevel::Info, "window opened");

        let contents = read_log(&logger);
        assert!(!contents.contains("frame timings"));
        assert!(contents.contains("INFO: window opened"));

        // Module directives still apply through the facade.
        Log::log(
            &logger,
            &Record::builder()
                .args(format_args!("engine detail"))
                .level(log::Level::Debug)
                .target("nt_engine::render")
                .build(),
        );
        assert!(read_log(&logger).contains("DEBUG: engine detail"));
    }

    #[test]
    fn test_module_only_filter_keeps_critical() {
        let config = temp_log_config("module_only");
        let logger = Logger::with_filter(&config, "nt_engine=debug");

        assert!(!logger.accepts(LogLevel::Error));
        assert!(logger.accepts(LogLevel::Critical));
    }

    #[test]
    fn test_env_filter_overrides_config() {
        let config = temp_log_config("env");
        assert_eq!(filter_spec(&config, None), "info");
        assert_eq!(filter_spec(&config, Some("warn,nt_engine=trace".to_string())), "warn,nt_engine=trace");

        let logger = Logger::with_filter(&config, &filter_spec(&config, Some("error".to_string())));
        assert!(!logger.accepts(LogLevel::Warning));
        assert!(logger.accepts(LogLevel::Error));
    }

    #[test]
    fn test_new_reads_env_filter() {
        let config = temp_log_config("env_new");
        let expected = std::env::var(FILTER_ENV).unwrap_or_else(|_| config.filter.clone());
        let reference = Logger::with_filter(&config, &expected);
        let logger = Logger::new(&config);

        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warning, LogLevel::Error, LogLevel::Critical] {
            assert_eq!(logger.accepts(level), reference.accepts(level));
        }
    }

    #[test]
    fn test_critical_bypasses_module_directives() {
        let config = temp_log_config("directives");
        let logger = Logger::with_filter(&config, "some_other_crate=debug");

        Log::log(
            &logger,
            &Record::builder()
                .args(format_args!("fatal"))
                .level(log::Level::Error)
                .target(CRITICAL_TARGET)
                .build(),
        );
        assert!(read_log(&logger).contains("CRITICAL: fatal"));
    }
}
