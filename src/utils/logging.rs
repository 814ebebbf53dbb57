//! # Diagnostic Logging
//!
//! A single severity gate in front of a line-oriented diagnostic sink.
//!
//! A [`Logger`] holds the threshold in an atomic, so one instance can be shared
//! across threads and retuned at runtime with [`Logger::set_level`]. A call at
//! `level` is emitted iff `level <= logger.level()`; the message is formatted
//! in full and handed to the sink as one line, so concurrent callers never
//! interleave bytes of each other's output.
//!
//! Components that want their own gate hold a `Logger` (or an `Arc` of one).
//! Code that just needs "the" logger uses the process-wide default through
//! [`global`], the free functions in this module and the [`diag_log!`] /
//! [`diag_perror!`] macros.
//!
//! Sink failures are swallowed: logging never fails the caller's operation.
//!
//! ## Example
//! ```rust
//! use gep_utils::utils::logging::{LogLevel, Logger, MemorySink};
//! use gep_utils::diag_log;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::new(LogLevel::Warning, sink.clone());
//!
//! diag_log!(logger => LogLevel::Debug, "dropped: {}", 1);
//! diag_log!(logger => LogLevel::Error, "kept: {}", 2);
//! assert_eq!(sink.lines(), vec!["[ERROR] kept: 2".to_string()]);
//! ```
//!
//! [`diag_log!`]: crate::diag_log
//! [`diag_perror!`]: crate::diag_perror

use crate::config::{LoggingConfig, SinkKind};
use crate::error::{constants, Result, UtilsError};
use once_cell::sync::OnceCell;
use std::fmt::{self, Write as _};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Threshold a fresh logger starts with
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Warning;

/// Diagnostic severity. Lower value means more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    Error = 1,
    Warning = 2,
    Debug = 3,
}

impl LogLevel {
    /// All levels, most severe first
    pub const ALL: [LogLevel; 3] = [LogLevel::Error, LogLevel::Warning, LogLevel::Debug];

    /// Tag written in front of every emitted line
    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Lowercase name, as used in config files
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = UtilsError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(LogLevel::Error),
            2 => Ok(LogLevel::Warning),
            3 => Ok(LogLevel::Debug),
            other => Err(UtilsError::InvalidLogLevel(other.to_string())),
        }
    }
}

impl FromStr for LogLevel {
    type Err = UtilsError;

    /// Accepts names in any case, `warn` as an alias and the numeric values 1..=3.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "error" | "1" => Ok(LogLevel::Error),
            "warning" | "warn" | "2" => Ok(LogLevel::Warning),
            "debug" | "3" => Ok(LogLevel::Debug),
            _ => Err(UtilsError::InvalidLogLevel(trimmed.to_string())),
        }
    }
}

/// Destination for formatted diagnostic lines.
///
/// `line` carries no trailing newline. Implementations must write each line as
/// one unit with respect to other callers of the same sink.
pub trait LogSink: Send + Sync {
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()>;
}

/// Write `line` plus a trailing newline to `out` in a single `write_all`.
///
/// Byte-stream sinks go through this so a line never reaches the stream in
/// pieces.
pub fn write_framed<W: Write + ?Sized>(out: &mut W, line: &str) -> io::Result<()> {
    let mut buf = Vec::with_capacity(line.len() + 1);
    buf.extend_from_slice(line.as_bytes());
    buf.push(b'\n');
    out.write_all(&buf)
}

/// Writes lines to standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write_line(&self, _level: LogLevel, line: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        write_framed(&mut stderr, line)?;
        stderr.flush()
    }
}

/// Appends lines to a file
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) `path` for appending
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write_line(&self, _level: LogLevel, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        write_framed(&mut *file, line)
    }
}

/// Keeps emitted lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, _level: LogLevel, line: &str) -> io::Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory sink lock poisoned"))?;
        lines.push(line.to_string());
        Ok(())
    }
}

/// Forwards lines to the `tracing` subscriber of the host process
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()> {
        match level {
            LogLevel::Error => tracing::error!(target: "gep_utils::diag", "{line}"),
            LogLevel::Warning => tracing::warn!(target: "gep_utils::diag", "{line}"),
            LogLevel::Debug => tracing::debug!(target: "gep_utils::diag", "{line}"),
        }
        Ok(())
    }
}

/// Severity gate plus sink
pub struct Logger {
    level: AtomicU8,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            sink,
        }
    }

    /// Logger writing to standard error
    pub fn stderr(level: LogLevel) -> Self {
        Self::new(level, Arc::new(StderrSink))
    }

    /// Build a logger from its configuration section
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let sink: Arc<dyn LogSink> = match config.sink {
            SinkKind::Stderr => Arc::new(StderrSink),
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::File => {
                let path = config.file_path.as_deref().ok_or_else(|| {
                    UtilsError::ConfigError(constants::ERR_LOG_FILE_MISSING.to_string())
                })?;
                Arc::new(FileSink::open(path)?)
            }
        };
        Ok(Self::new(config.level, sink))
    }

    /// Replace the threshold. Visible to every subsequent call.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Current threshold
    pub fn level(&self) -> LogLevel {
        LogLevel::try_from(self.level.load(Ordering::SeqCst)).unwrap_or(DEFAULT_LEVEL)
    }

    /// Whether a call at `level` would be emitted
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level()
    }

    /// Emit `args` at `level` if the gate allows it
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let mut line = String::new();
        let _ = write!(line, "[{}] {}", level.tag(), args);
        self.emit(level, &line);
    }

    /// Emit `args` at error level followed by the description of OS error `errno`
    pub fn perror(&self, errno: i32, args: fmt::Arguments<'_>) {
        if !self.enabled(LogLevel::Error) {
            return;
        }
        let description = io::Error::from_raw_os_error(errno);
        let mut line = String::new();
        let _ = write!(line, "[{}] {}: {}", LogLevel::Error.tag(), args, description);
        self.emit(LogLevel::Error, &line);
    }

    /// Make this logger the process-wide default.
    ///
    /// Fails if the default was already installed or already used.
    pub fn install_global(self) -> Result<()> {
        GLOBAL
            .set(self)
            .map_err(|_| UtilsError::ConfigError("global logger already initialized".to_string()))
    }

    fn emit(&self, level: LogLevel, line: &str) {
        if let Err(e) = self.sink.write_line(level, line) {
            warn!(error = %e, "Diagnostic sink write failed");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::stderr(DEFAULT_LEVEL)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceCell<Logger> = OnceCell::new();

/// The process-wide default logger (stderr, [`DEFAULT_LEVEL`] unless installed)
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::default)
}

/// Set the threshold of the default logger
pub fn set_level(level: LogLevel) {
    global().set_level(level);
}

/// Threshold of the default logger
pub fn get_level() -> LogLevel {
    global().level()
}

/// Log through the default logger
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) {
    global().log(level, args);
}

/// Log an OS error through the default logger
pub fn perror(errno: i32, args: fmt::Arguments<'_>) {
    global().perror(errno, args);
}

/// Format and emit a diagnostic line.
///
/// `diag_log!(LogLevel::Debug, "x = {}", x)` goes through the default logger;
/// `diag_log!(logger => LogLevel::Debug, "x = {}", x)` through `logger`.
#[macro_export]
macro_rules! diag_log {
    ($logger:expr => $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::utils::logging::log($level, format_args!($($arg)+))
    };
}

/// Format and emit an error line followed by the description of an OS error code.
#[macro_export]
macro_rules! diag_perror {
    ($logger:expr => $errno:expr, $($arg:tt)+) => {
        $logger.perror($errno, format_args!($($arg)+))
    };
    ($errno:expr, $($arg:tt)+) => {
        $crate::utils::logging::perror($errno, format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::thread;

    struct FailingSink;

    impl LogSink for FailingSink {
        fn write_line(&self, _level: LogLevel, _line: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
    }

    // Records every write call so tests can see how a line was chunked
    #[derive(Default)]
    struct ChunkRecorder {
        chunks: Vec<Vec<u8>>,
    }

    impl Write for ChunkRecorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.chunks.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // Byte-stream sink over the shared framing, as StderrSink is over stderr
    #[derive(Default)]
    struct StreamSink {
        out: Mutex<ChunkRecorder>,
    }

    impl LogSink for StreamSink {
        fn write_line(&self, _level: LogLevel, line: &str) -> io::Result<()> {
            let mut out = self.out.lock().unwrap();
            write_framed(&mut *out, line)
        }
    }

    fn memory_logger(level: LogLevel) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Logger::new(level, sink.clone()), sink)
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Debug);
        assert_eq!(LogLevel::Error as u8, 1);
        assert_eq!(LogLevel::Debug as u8, 3);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("ERROR".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" Debug ".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("2".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert!("trace".parse::<LogLevel>().is_err());
        assert!(LogLevel::try_from(0u8).is_err());
        assert!(LogLevel::try_from(4u8).is_err());
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::try_from(level as u8).unwrap(), level);
            assert_eq!(level.name().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_gating_at_warning() {
        let (logger, sink) = memory_logger(LogLevel::Warning);

        diag_log!(logger => LogLevel::Debug, "hidden {}", 1);
        assert!(sink.is_empty());

        diag_log!(logger => LogLevel::Warning, "shown {}", 2);
        diag_log!(logger => LogLevel::Error, "shown {}", 3);
        assert_eq!(
            sink.lines(),
            vec!["[WARNING] shown 2".to_string(), "[ERROR] shown 3".to_string()]
        );
    }

    #[test]
    fn test_error_threshold_hides_warnings() {
        let (logger, sink) = memory_logger(LogLevel::Error);
        logger.log(LogLevel::Warning, format_args!("nope"));
        logger.log(LogLevel::Debug, format_args!("nope"));
        assert!(sink.is_empty());
        assert!(logger.enabled(LogLevel::Error));
        assert!(!logger.enabled(LogLevel::Warning));
    }

    #[test]
    fn test_set_level_takes_effect_immediately() {
        let (logger, sink) = memory_logger(LogLevel::Warning);
        logger.set_level(LogLevel::Debug);
        assert_eq!(logger.level(), LogLevel::Debug);

        diag_log!(logger => LogLevel::Debug, "now visible");
        assert_eq!(sink.lines(), vec!["[DEBUG] now visible".to_string()]);
    }

    #[test]
    fn test_perror_appends_os_description() {
        let (logger, sink) = memory_logger(LogLevel::Error);
        // ENOENT on every supported platform
        diag_perror!(logger => 2, "open {}", "/missing");

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let expected_prefix = format!(
            "[ERROR] open /missing: {}",
            io::Error::from_raw_os_error(2)
        );
        assert_eq!(lines[0], expected_prefix);
    }

    #[test]
    fn test_perror_is_always_emitted() {
        // Error is the most severe level, so every threshold lets it through
        for level in LogLevel::ALL {
            let (logger, sink) = memory_logger(level);
            logger.perror(2, format_args!("x"));
            assert_eq!(sink.len(), 1);
        }
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let logger = Logger::new(LogLevel::Debug, Arc::new(FailingSink));
        logger.log(LogLevel::Error, format_args!("goes nowhere"));
        logger.perror(5, format_args!("still fine"));
    }

    #[test]
    fn test_concurrent_lines_stay_whole() {
        let (logger, sink) = memory_logger(LogLevel::Debug);
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..100 {
                        diag_log!(logger => LogLevel::Debug, "thread={t} seq={i} payload={}", "x".repeat(64));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = sink.lines();
        assert_eq!(lines.len(), 800);
        for t in 0..8 {
            for i in 0..100 {
                let expected = format!("[DEBUG] thread={t} seq={i} payload={}", "x".repeat(64));
                assert!(lines.contains(&expected), "missing line: {expected}");
            }
        }
    }

    #[test]
    fn test_concurrent_level_changes_never_tear() {
        let (logger, _sink) = memory_logger(LogLevel::Warning);
        let logger = Arc::new(logger);

        let writer = {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..10_000 {
                    logger.set_level(LogLevel::ALL[i % 3]);
                }
            })
        };
        for _ in 0..10_000 {
            assert!(LogLevel::ALL.contains(&logger.level()));
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_file_sink_requires_path() {
        let config = LoggingConfig {
            sink: SinkKind::File,
            file_path: None,
            ..LoggingConfig::default()
        };
        assert!(matches!(
            Logger::from_config(&config),
            Err(UtilsError::ConfigError(_))
        ));
    }

    #[test]
    fn test_debug_output_shows_level() {
        let (logger, _sink) = memory_logger(LogLevel::Debug);
        assert!(format!("{logger:?}").contains("Debug"));
    }

    #[test]
    fn test_write_framed_single_chunk() {
        let mut out = ChunkRecorder::default();
        write_framed(&mut out, "[WARNING] disk at 91%").unwrap();
        assert_eq!(out.chunks, vec![b"[WARNING] disk at 91%\n".to_vec()]);
    }

    #[test]
    fn test_stream_sink_framing() {
        let sink = Arc::new(StreamSink::default());
        let logger = Logger::new(LogLevel::Debug, sink.clone());

        logger.log(LogLevel::Warning, format_args!("peer {} gone", 4));
        logger.log(LogLevel::Debug, format_args!(""));

        let out = sink.out.lock().unwrap();
        assert_eq!(
            out.chunks,
            vec![b"[WARNING] peer 4 gone\n".to_vec(), b"[DEBUG] \n".to_vec()]
        );
    }

    #[test]
    fn test_stderr_sink_accepts_line() {
        assert!(StderrSink.write_line(LogLevel::Error, "[ERROR] stderr check").is_ok());
    }
}
