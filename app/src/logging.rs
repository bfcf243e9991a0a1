//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging for the reporting layer.
// FORMAT: seq|level|category|message
// CONTEXT: Lines go to the `log` facade and, once `init_log_file` has run, are
// mirrored to a file so a support session can be replayed line by line.

use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

// ============================================================================
// LEVELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Single-letter code written in the level column.
    pub fn code(self) -> &'static str {
        match self {
            LogLevel::Debug => "D",
            LogLevel::Info => "I",
            LogLevel::Warn => "W",
            LogLevel::Error => "E",
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

struct LogSink {
    file: File,
    path: PathBuf,
}

static LOG_SINK: Lazy<Mutex<Option<LogSink>>> = Lazy::new(|| Mutex::new(None));

pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Opens (truncating) the log file at `path`, creating parent directories.
pub fn init_log_file(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    if let Ok(mut sink) = LOG_SINK.lock() {
        *sink = Some(LogSink {
            file,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

pub fn get_log_path() -> Option<PathBuf> {
    LOG_SINK
        .lock()
        .ok()
        .and_then(|sink| sink.as_ref().map(|s| s.path.clone()))
}

/// Flushes and detaches the log file.
pub fn close_log_file() {
    if let Ok(mut sink) = LOG_SINK.lock() {
        if let Some(mut s) = sink.take() {
            let _ = s.file.flush();
        }
    }
}

pub fn write_log(level: LogLevel, category: &str, message: &str) {
    let line = format!("{}|{}|{}|{}", next_seq(), level.code(), category, message);

    if let Ok(mut sink) = LOG_SINK.lock() {
        if let Some(s) = sink.as_mut() {
            if let Err(e) = writeln!(s.file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
        }
    }

    log::log!(target: "estimator", level.into(), "{}", line);
}

/// ENTER/EXIT line around a command; `detail` may be empty.
pub fn write_log_span(level: LogLevel, category: &str, marker: &str, func: &str, detail: &str) {
    if detail.is_empty() {
        write_log(level, category, &format!("{} {}", marker, func));
    } else {
        write_log(level, category, &format!("{} {} {}", marker, func, detail));
    }
}

// ============================================================================
// MACROS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::LogLevel::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::LogLevel::Info, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::LogLevel::Warn, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::LogLevel::Error, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_enter_info {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_span($crate::logging::LogLevel::Info, $cat, "ENTER", $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_span(
            $crate::logging::LogLevel::Info, $cat, "ENTER", $func, &format!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! log_exit_info {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_span($crate::logging::LogLevel::Info, $cat, "EXIT", $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_span(
            $crate::logging::LogLevel::Info, $cat, "EXIT", $func, &format!($($arg)*)
        )
    };
}

pub use log_debug;
pub use log_enter_info;
pub use log_error;
pub use log_exit_info;
pub use log_info;
pub use log_warn;
