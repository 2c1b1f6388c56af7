//! Rolling Logger
//!
//! File logging for desktop apps: a `tracing-subscriber` fmt layer writing to
//! `<dir>/<app>.log`, rotated by size into `<app>.log.1` .. `<app>.log.N`,
//! with the most recent lines kept in memory for an in-app log viewer.
//! Records emitted through the `log` facade are bridged into the same output.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),

    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("logger not initialized")]
    NotInitialized,

    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub dir: PathBuf,
    pub app_name: String,
    /// Rotate once the live file would grow past this
    pub max_bytes: u64,
    /// Rotated files kept besides the live one
    pub max_files: usize,
    /// Lines kept for [`recent_lines`]
    pub ring_capacity: usize,
    pub level: Level,
}

impl LoggerConfig {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            dir: dir.into(),
            app_name: app_name.to_string(),
            max_bytes: 1024 * 1024,
            max_files: 3,
            ring_capacity: 500,
            level: if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO },
        }
    }
}

// ========================
// Size-rotated file
// ========================

struct RollingFile {
    dir: PathBuf,
    base: String,
    max_bytes: u64,
    max_files: usize,
    file: Option<File>,
    written: u64,
}

impl RollingFile {
    fn open(config: &LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(&config.dir)?;
        let mut rolling = Self {
            dir: config.dir.clone(),
            base: format!("{}.log", config.app_name),
            max_bytes: config.max_bytes,
            max_files: config.max_files,
            file: None,
            written: 0,
        };
        rolling.reopen()?;
        Ok(rolling)
    }

    /// `<app>.log` for 0, `<app>.log.<n>` otherwise
    fn path(&self, n: usize) -> PathBuf {
        if n == 0 {
            self.dir.join(&self.base)
        } else {
            self.dir.join(format!("{}.{}", self.base, n))
        }
    }

    fn reopen(&mut self) -> io::Result<()> {
        let path = self.path(0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        self.written = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        if self.max_files == 0 {
            fs::remove_file(self.path(0))?;
            return self.reopen();
        }
        let oldest = self.path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.max_files).rev() {
            let from = self.path(n);
            if from.exists() {
                fs::rename(&from, self.path(n + 1))?;
            }
        }
        fs::rename(self.path(0), self.path(1))?;
        self.reopen()
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let len = buf.len() as u64;
        if self.written > 0 && self.written + len > self.max_bytes {
            self.rotate()?;
        }
        if self.file.is_none() {
            self.reopen()?;
        }
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        self.written += len;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

// ========================
// Circular buffer
// ========================

struct Ring {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    fn push_text(&mut self, text: &str) {
        for line in text.lines().filter(|l| !l.is_empty()) {
            if self.capacity == 0 {
                return;
            }
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }
}

struct Inner {
    file: RollingFile,
    ring: Ring,
}

/// Shared writer behind the subscriber; clones write to the same file
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
    path: PathBuf,
}

impl RollingWriter {
    pub fn open(config: &LoggerConfig) -> Result<Self, LoggerError> {
        let file = RollingFile::open(config)?;
        let path = file.path(0);
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                file,
                ring: Ring::new(config.ring_capacity),
            })),
            path,
        })
    }

    /// The live log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => inner.ring.lines.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "log writer lock poisoned")
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        inner.ring.push_text(&String::from_utf8_lossy(buf));
        inner.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Local wall-clock timestamps
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

// ========================
// Global logger
// ========================

static WRITER: OnceCell<RollingWriter> = OnceCell::new();

/// Install the global subscriber writing under `dir`. Returns the live file.
pub fn init_logger(dir: impl Into<PathBuf>, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_with(LoggerConfig::new(dir, app_name))
}

pub fn init_with(config: LoggerConfig) -> Result<PathBuf, LoggerError> {
    if WRITER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let writer = RollingWriter::open(&config)?;

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_max_level(config.level)
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    let path = writer.path().to_path_buf();
    WRITER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!("{} logging to {}", config.app_name, path.display());
    Ok(path)
}

fn ensure_init() -> Result<(), LoggerError> {
    WRITER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Lines from the in-memory buffer, oldest first. Empty before init.
pub fn recent_lines() -> Vec<String> {
    WRITER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}

pub fn log_file() -> Option<PathBuf> {
    WRITER.get().map(|w| w.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &Path) -> LoggerConfig {
        LoggerConfig {
            max_bytes: 64,
            max_files: 2,
            ring_capacity: 3,
            ..LoggerConfig::new(dir, "test")
        }
    }

    #[test]
    fn test_writes_to_live_file() {
        let dir = TempDir::new().unwrap();
        let mut writer = RollingWriter::open(&config(dir.path())).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.path(), dir.path().join("test.log"));
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "hello\n");
    }

    #[test]
    fn test_rotates_by_size_and_caps_backups() {
        let dir = TempDir::new().unwrap();
        let mut writer = RollingWriter::open(&config(dir.path())).unwrap();
        let line = [b'x'; 40];
        for _ in 0..5 {
            writer.write_all(&line).unwrap();
        }
        writer.flush().unwrap();

        assert!(dir.path().join("test.log").exists());
        assert!(dir.path().join("test.log.1").exists());
        assert!(dir.path().join("test.log.2").exists());
        assert!(!dir.path().join("test.log.3").exists());
        assert_eq!(fs::metadata(dir.path().join("test.log")).unwrap().len(), 40);
    }

    #[test]
    fn test_ring_keeps_latest_lines() {
        let dir = TempDir::new().unwrap();
        let mut writer = RollingWriter::open(&config(dir.path())).unwrap();
        writer.write_all(b"one\ntwo\n").unwrap();
        writer.write_all(b"three\n").unwrap();
        writer.write_all(b"four\n").unwrap();
        assert_eq!(writer.recent_lines(), vec!["two", "three", "four"]);
    }

    #[test]
    fn test_helpers_require_init() {
        if WRITER.get().is_none() {
            assert!(matches!(info("x"), Err(LoggerError::NotInitialized)));
            assert!(recent_lines().is_empty());
        }
    }
}
