//! Per-run log file.
//!
//! [`RunLog`] is opened once at the start of a run and handed by reference to
//! every component that reports progress. Each line is timestamped and also
//! forwarded to the `log` facade so `RUST_LOG` still controls console
//! diagnostics. The handle is flushed by [`RunLog::close`] or on drop.

use crate::error::{ErrorExt, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Log file name prefix
const LOG_PREFIX: &str = "rso-packager";

/// Default log folder under the work directory
pub const LOG_DIR_NAME: &str = "logs";

/// Severity of a run log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress
    Info,
    /// Recoverable problem
    Warn,
    /// Fatal problem
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Explicit logging handle for one packaging run
pub struct RunLog {
    sink: Mutex<Box<dyn Write + Send>>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for RunLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLog").field("path", &self.path).finish()
    }
}

impl RunLog {
    /// Open a new timestamped log file in `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).fs_context("creating log directory", dir)?;

        let name = format!("{}-{}.log", LOG_PREFIX, Local::now().format("%Y%m%d-%H%M%S"));
        let path = dir.join(name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .fs_context("opening log file", &path)?;

        log::debug!("Run log opened at {}", path.display());
        Ok(Self {
            sink: Mutex::new(Box::new(BufWriter::new(file))),
            path: Some(path),
        })
    }

    /// Log into an arbitrary writer
    pub fn to_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            path: None,
        }
    }

    /// Handle that discards file output (entries still reach the `log` facade)
    pub fn disabled() -> Self {
        Self::to_writer(io::sink())
    }

    /// Location of the log file, if logging to a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a progress entry
    pub fn info(&self, message: impl AsRef<str>) {
        self.record(Level::Info, message.as_ref());
    }

    /// Record a recoverable problem
    pub fn warn(&self, message: impl AsRef<str>) {
        self.record(Level::Warn, message.as_ref());
    }

    /// Record a fatal problem
    pub fn error(&self, message: impl AsRef<str>) {
        self.record(Level::Error, message.as_ref());
    }

    fn record(&self, level: Level, message: &str) {
        match level {
            Level::Info => log::info!("{message}"),
            Level::Warn => log::warn!("{message}"),
            Level::Error => log::error!("{message}"),
        }

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Ok(mut sink) = self.sink.lock()
            && let Err(e) = writeln!(sink, "{stamp} [{}] {message}", level.label())
        {
            log::debug!("Failed to write run log entry: {e}");
        }
    }

    /// Flush buffered entries to disk
    pub fn flush(&self) -> io::Result<()> {
        match self.sink.lock() {
            Ok(mut sink) => sink.flush(),
            Err(_) => Err(io::Error::other("run log lock poisoned")),
        }
    }

    /// Flush and release the log file
    pub fn close(self) -> io::Result<()> {
        self.flush()
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        if let Ok(sink) = self.sink.get_mut() {
            let _ = sink.flush();
        }
    }
}
