/// Pcx clipper - process-wide logging host
///
/// The clip registry itself is an explicit value owned by the caller
/// (see `ClipperSystem`). The only process-wide state kept here is the
/// logger, so every module can report through the same sink.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn severity_from_u8(value: u8) -> LogSeverity {
    match value {
        0 => LogSeverity::Trace,
        1 => LogSeverity::Debug,
        2 => LogSeverity::Info,
        3 => LogSeverity::Warn,
        _ => LogSeverity::Error,
    }
}

// ===== PUBLIC API =====

/// Logging entry point shared by all clipper modules
///
/// # Example
///
/// ```no_run
/// use pcx_clipper::pcx::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct HostLogger;
/// impl Logger for HostLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}: {}", entry.source, entry.message);
///     }
/// }
///
/// Engine::set_logger(HostLogger);
/// Engine::set_min_severity(LogSeverity::Debug);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the global logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Set the lowest severity that is forwarded to the logger.
    ///
    /// Defaults to `Info`; per-scan `Trace` output is noisy at frame rate.
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Current minimum forwarded severity
    pub fn min_severity() -> LogSeverity {
        severity_from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if severity < Self::min_severity() {
            return;
        }
        if let Ok(lock) = self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by the engine_error! and engine_err! macros.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if severity < Self::min_severity() {
            return;
        }
        if let Ok(lock) = self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
