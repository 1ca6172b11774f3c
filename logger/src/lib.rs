use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Severity of a log message, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(LoggerError::InvalidLevel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    fn to_ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
            Color::Magenta => "\x1b[35m",
            Color::White => "\x1b[37m",
        }
    }
}

/// Leveled logger that appends to a file and optionally echoes to the console.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: Option<PathBuf>,
    min_level: LogLevel,
    to_console: bool,
}

impl Logger {
    /// Creates a new `Logger` writing to `<log_dir>/<name>.log`.
    ///
    /// # Parameters
    /// - `log_dir`: Directory where the log file is created. Missing directories are created.
    /// - `name`: Base name of the log file.
    ///
    /// # Returns
    /// A new `Logger` that echoes to the console, or `LoggerError::InvalidPath` if
    /// `log_dir` exists but is not a directory.
    pub fn new(log_dir: &Path, name: &str) -> Result<Self, LoggerError> {
        if log_dir.exists() && !log_dir.is_dir() {
            return Err(LoggerError::InvalidPath(format!(
                "{} is not a directory",
                log_dir.display()
            )));
        }
        std::fs::create_dir_all(log_dir)?;

        let sanitized = name.replace([':', '/', '\\'], "_");
        let log_file = log_dir.join(format!("{}.log", sanitized));

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;

        Ok(Logger {
            log_file: Some(log_file),
            min_level: LogLevel::Info,
            to_console: true,
        })
    }

    /// Creates a `Logger` that only writes to the console.
    pub fn console_only() -> Self {
        Logger {
            log_file: None,
            min_level: LogLevel::Info,
            to_console: true,
        }
    }

    /// Sets the least severe level that gets written.
    pub fn with_level(mut self, min_level: LogLevel) -> Self {
        self.min_level = min_level;
        self
    }

    /// Enables or disables echoing messages to the console.
    pub fn with_console(mut self, to_console: bool) -> Self {
        self.to_console = to_console;
        self
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    fn log(&self, level: LogLevel, color: Option<Color>, message: &str) -> Result<(), LoggerError> {
        if level < self.min_level {
            return Ok(());
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let log_message = format!("[{}] [{}]: {}\n", level.tag(), timestamp, message);

        if self.to_console {
            let ansi = match (level, color) {
                (LogLevel::Warn, _) => "\x1b[93m",
                (LogLevel::Error, _) => "\x1b[91m",
                (_, Some(color)) => color.to_ansi_code(),
                (_, None) => Color::White.to_ansi_code(),
            };
            print!("{}{}\x1b[0m", ansi, log_message);
            io::stdout().flush()?;
        }

        if let Some(log_file) = &self.log_file {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            file.write_all(log_message.as_bytes())?;
            file.flush()?;
        }

        Ok(())
    }

    /// Logs a debug message.
    pub fn debug(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Debug, None, message)
    }

    /// Logs an informational message.
    ///
    /// # Parameters
    /// - `message`: The informational message to log.
    /// - `color`: The color to use for the console output.
    pub fn info(&self, message: &str, color: Color) -> Result<(), LoggerError> {
        self.log(LogLevel::Info, Some(color), message)
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Warn, None, message)
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Error, None, message)
    }
}

#[derive(Debug)]
pub enum LoggerError {
    IoError(std::io::Error),
    InvalidPath(String),
    InvalidLevel(String),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::IoError(e) => write!(f, "I/O Error: {}", e),
            LoggerError::InvalidPath(msg) => write!(f, "Invalid Path: {}", msg),
            LoggerError::InvalidLevel(level) => write!(f, "Invalid Level: {}", level),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::IoError(e) => Some(e),
            LoggerError::InvalidPath(_) | LoggerError::InvalidLevel(_) => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(err: std::io::Error) -> Self {
        LoggerError::IoError(err)
    }
}
