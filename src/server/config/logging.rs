use std::fmt;

use clap::ValueEnum;
use tracing::{level_filters::LevelFilter, Level};

use super::{non_empty, parse_flag, RawAppConfig};

/// Console/file template used when `LOG_FORMAT` is unset.
pub const DEFAULT_LOG_FORMAT: &str = "{timestamp} - {name} - {level} - {message}";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Severity threshold for the application logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Case-insensitive lookup; `WARN` is accepted for `WARNING`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("WARN") {
            return Some(LogLevel::Warning);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }

    /// `tracing` has no level above `ERROR`, so `CRITICAL` shares it.
    pub const fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }

    /// Name printed for an event emitted at `level`.
    pub fn for_event(level: &Level) -> Self {
        if *level == Level::ERROR {
            LogLevel::Error
        } else if *level == Level::WARN {
            LogLevel::Warning
        } else if *level == Level::INFO {
            LogLevel::Info
        } else {
            LogLevel::Debug
        }
    }

    pub fn accepts(&self, level: &Level) -> bool {
        *level <= self.as_level_filter()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: String,
    pub file_enabled: bool,
    pub file_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: DEFAULT_LOG_FORMAT.to_string(),
            file_enabled: true,
            file_dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

pub fn parse_logging_section(raw: &RawAppConfig) -> LoggingConfig {
    let level = raw
        .log_level
        .as_deref()
        .and_then(LogLevel::from_name)
        .unwrap_or_default();
    let format = raw
        .log_format
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string());
    let file_enabled = parse_flag(raw.log_file_enabled.as_deref(), true);
    let file_dir = non_empty(raw.log_file_dir.as_deref())
        .unwrap_or(DEFAULT_LOG_DIR)
        .to_string();

    LoggingConfig {
        level,
        format,
        file_enabled,
        file_dir,
    }
}
