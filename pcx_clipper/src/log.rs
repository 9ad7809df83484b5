//! Internal logging for the Pcx clipper
//!
//! Every entry is tagged with the component that raised it:
//!
//! | Source               | Emits                                                      |
//! |----------------------|------------------------------------------------------------|
//! | `pcx::scan`          | Trace: point, block and survivor counts per scan           |
//! | `pcx::ClipperSystem` | Info on pool start, Debug per membership change and publish |
//! | `pcx::ClipperSystem` | Warn on a rejected `begin_cycle()`                         |
//! | `pcx::ClipperSystem` | Error on pool failure, lost workers, unknown meshes        |
//! | `pcx::PointClipper`  | Debug on open and close                                    |
//! | `pcx::XyzImporter`   | Info per imported cloud, Error per malformed record        |
//! | `pcx::PointCloud`    | Error when a cloud is rejected at construction             |
//!
//! Errors are logged once, where they are raised (see `engine_err!`);
//! callers that add context to an error do not log it again.
//!
//! Entries go to a colored stdout logger unless the host installs its
//! own with `Engine::set_logger`. Anything below `Engine::min_severity()`
//! (Info by default) is dropped before reaching the logger.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route clipper logs elsewhere (file, host
/// application console, test capture).
///
/// # Example
///
/// ```no_run
/// use pcx_clipper::pcx::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "pcx::ClipperSystem", "pcx::XyzImporter")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-scan chatter (block counts, survivor counts)
    Trace,

    /// Registry and cycle bookkeeping
    Debug,

    /// Important informational messages
    Info,

    /// Contract misuse that was rejected without side effects
    Warn,

    /// Error messages with file:line details
    Error,
}

/// Default logger writing colored lines to stdout
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        // YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```ignore
/// engine_trace!("pcx::scan", "Scanned {} blocks", blocks);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::pcx::Engine::log(
            $crate::pcx::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::pcx::Engine::log(
            $crate::pcx::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::pcx::Engine::log(
            $crate::pcx::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::pcx::Engine::log(
            $crate::pcx::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```ignore
/// engine_error!("pcx::XyzImporter", "Failed to open {}: {}", path, err);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::pcx::Engine::log_detailed(
            $crate::pcx::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and build the matching `Error` variant
///
/// Evaluates to an `Error`, so it composes with `ok_or_else` and `map_err`.
///
/// # Example
///
/// ```ignore
/// let value = field.parse::<f32>()
///     .map_err(|_| engine_err!("pcx::XyzImporter", ImportFailed, "line {}: bad float", n))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::pcx::Engine::log_detailed(
            $crate::pcx::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::pcx::Error::$variant(message)
    }};
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
