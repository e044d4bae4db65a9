//! Process-wide addon logging
//!
//! Installs a fan-out logger with two sinks sharing one formatter: a
//! stderr stream sink and a size-rotating file sink. Installation is
//! idempotent so that activating the addon twice never doubles the
//! sink set.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use thiserror::Error;

/// File sink rotation threshold
pub const ROTATE_BYTES: u64 = 5 * 1024 * 1024;

/// Number of sinks installed by this module (0 = not installed)
static SINK_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Errors from logger installation
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to open log file {path}: {source}")]
    OpenLogFile { path: PathBuf, source: io::Error },
}

/// Shared log line formatter.
///
/// Layout: time of day, level initial, target padded/truncated to 36
/// characters, message padded/truncated to 80 characters.
pub struct Formatter;

impl Formatter {
    /// Format a record for output
    pub fn format(record: &Record) -> String {
        let message = record.args().to_string();
        Self::format_line(
            SystemTime::now(),
            record.level(),
            record.target(),
            &message,
        )
    }

    fn level_initial(level: Level) -> char {
        match level {
            Level::Error => 'E',
            Level::Warn => 'W',
            Level::Info => 'I',
            Level::Debug => 'D',
            Level::Trace => 'T',
        }
    }

    pub(crate) fn format_line(
        now: SystemTime,
        level: Level,
        target: &str,
        message: &str,
    ) -> String {
        let duration = now.duration_since(UNIX_EPOCH).unwrap_or_default();
        let secs = duration.as_secs() % 86400; // Time of day in seconds
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let secs = secs % 60;
        let millis = duration.subsec_millis();

        format!(
            "{:02}:{:02}:{:02}.{:03} {} {:<36.36}  - {:<80.80}",
            hours,
            mins,
            secs,
            millis,
            Self::level_initial(level),
            target,
            message
        )
    }
}

/// A formatted-line destination
trait Sink: Send {
    fn write_line(&mut self, line: &str);
    fn flush(&mut self);
}

/// Stream sink writing to stderr
struct StreamSink;

impl Sink for StreamSink {
    fn write_line(&mut self, line: &str) {
        let _ = writeln!(io::stderr(), "{}", line);
    }

    fn flush(&mut self) {
        let _ = io::stderr().flush();
    }
}

/// File sink with single-step size rotation: when the file passes the
/// limit it is renamed to `<name>.1` and a fresh file is started.
struct RotatingFileSink {
    path: PathBuf,
    file: File,
    written: u64,
    limit: u64,
}

impl RotatingFileSink {
    fn open(path: &Path, limit: u64) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path: path.to_path_buf(),
            file,
            written,
            limit,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        let _ = self.file.flush();
        let rotated = self.path.with_extension(rotated_extension(&self.path));
        fs::rename(&self.path, &rotated)?;
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

fn rotated_extension(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.1", ext),
        None => "1".to_string(),
    }
}

impl Sink for RotatingFileSink {
    fn write_line(&mut self, line: &str) {
        let bytes = line.len() as u64 + 1;
        if self.written > 0 && self.written + bytes > self.limit {
            // Rotation failure falls back to appending in place
            let _ = self.rotate();
        }
        if writeln!(self.file, "{}", line).is_ok() {
            self.written += bytes;
        }
    }

    fn flush(&mut self) {
        let _ = self.file.flush();
    }
}

/// Logger fanning each record out to every sink
struct FanOutLogger {
    sinks: Mutex<Vec<Box<dyn Sink>>>,
}

impl Log for FanOutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Formatter::format(record);
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            sink.write_line(&line);
        }
    }

    fn flush(&self) {
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            sink.flush();
        }
    }
}

/// Install the addon logger, unless one is already installed.
///
/// Returns `Ok(true)` when this call performed the installation and
/// `Ok(false)` when a logger was already in place (either ours from an
/// earlier activation, or a foreign global logger).
pub fn install(log_path: &Path, level: LevelFilter) -> Result<bool, InstallError> {
    if sink_count() > 0 {
        return Ok(false);
    }

    let file_sink =
        RotatingFileSink::open(log_path, ROTATE_BYTES).map_err(|source| InstallError::OpenLogFile {
            path: log_path.to_path_buf(),
            source,
        })?;
    let sinks: Vec<Box<dyn Sink>> = vec![Box::new(StreamSink), Box::new(file_sink)];
    let count = sinks.len();

    let logger = FanOutLogger {
        sinks: Mutex::new(sinks),
    };
    match log::set_boxed_logger(Box::new(logger)) {
        Ok(()) => {
            log::set_max_level(level);
            SINK_COUNT.store(count, Ordering::SeqCst);
            Ok(true)
        }
        // Another logger owns the process; leave it alone.
        Err(_) => Ok(false),
    }
}

/// Number of sinks installed by this module
pub fn sink_count() -> usize {
    SINK_COUNT.load(Ordering::SeqCst)
}

/// Default per-user log file path
pub fn log_file() -> PathBuf {
    ProjectDirs::from("com", "scenelink", "scenelink")
        .map(|dirs| dirs.cache_dir().join("logs").join("scenelink.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("scenelink.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64, millis: u32) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs) + Duration::from_millis(millis as u64)
    }

    #[test]
    fn test_format_line_layout() {
        // 01:02:03 into the day
        let line = Formatter::format_line(at(3723, 45), Level::Warn, "scenelink.core", "hello");
        assert!(line.starts_with("01:02:03.045 W "));
        // target padded to 36, two spaces, dash, message padded to 80
        let rest = &line["01:02:03.045 W ".len()..];
        assert_eq!(rest[..36].trim_end(), "scenelink.core");
        assert_eq!(&rest[36..40], "  - ");
        assert_eq!(rest[40..].len(), 80);
        assert!(rest[40..].starts_with("hello "));
        assert_eq!(rest[40..].trim_end(), "hello");
    }

    #[test]
    fn test_format_line_truncates_long_fields() {
        let target = "x".repeat(50);
        let message = "y".repeat(100);
        let line = Formatter::format_line(at(0, 0), Level::Info, &target, &message);
        assert!(line.contains(&"x".repeat(36)));
        assert!(!line.contains(&"x".repeat(37)));
        assert!(line.ends_with(&"y".repeat(80)));
        assert!(!line.contains(&"y".repeat(81)));
    }

    #[test]
    fn test_level_initials() {
        assert_eq!(Formatter::level_initial(Level::Error), 'E');
        assert_eq!(Formatter::level_initial(Level::Trace), 'T');
    }

    #[test]
    fn test_rotating_sink_rotates_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let mut sink = RotatingFileSink::open(&path, 64).unwrap();

        let line = "a".repeat(40);
        sink.write_line(&line);
        sink.write_line(&line);
        sink.flush();

        let rotated = path.with_extension("log.1");
        assert!(rotated.exists(), "expected rotation at size limit");
        assert_eq!(fs::read_to_string(&rotated).unwrap().len(), 41);
        assert_eq!(fs::read_to_string(&path).unwrap().len(), 41);
    }

    #[test]
    fn test_rotating_sink_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        fs::write(&path, "previous\n").unwrap();

        let sink = RotatingFileSink::open(&path, ROTATE_BYTES).unwrap();
        assert_eq!(sink.written, 9);
    }

    #[test]
    fn test_rotated_extension() {
        assert_eq!(rotated_extension(Path::new("a/scenelink.log")), "log.1");
        assert_eq!(rotated_extension(Path::new("a/scenelink")), "1");
    }
}
