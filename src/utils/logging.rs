// Tue Jan 20 2026 - Alex

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the stderr logger. Uses `env_logger` instead when `RUST_LOG`
    /// is set.
    pub fn init(level: LevelFilter, log_file: Option<&Path>) -> std::io::Result<()> {
        if std::env::var_os("RUST_LOG").is_some() {
            env_logger::try_init().ok();
            return Ok(());
        }

        let file = match log_file {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };

        let logger = Box::new(SigscanLogger::new(level, file));
        log::set_boxed_logger(logger).ok();
        log::set_max_level(level);
        Ok(())
    }

    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

struct SigscanLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl SigscanLogger {
    fn new(level: LevelFilter, file: Option<File>) -> Self {
        Self {
            level,
            file: file.map(Mutex::new),
        }
    }

    fn colored_level(level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }
}

impl Log for SigscanLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match self.file {
            Some(ref file) => {
                let line = format!(
                    "{} {:5} [{}] {}\n",
                    timestamp(),
                    record.level(),
                    record.target(),
                    record.args()
                );
                if let Ok(mut file) = file.lock() {
                    let _ = file.write_all(line.as_bytes());
                }
            }
            None => {
                let target = format!("[{}]", record.target());
                eprintln!(
                    "{} {} {}",
                    Self::colored_level(record.level()),
                    target.dimmed(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

fn timestamp() -> String {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", duration.as_secs(), duration.subsec_millis())
}

/// Logs the lifetime of a scope at debug level.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!(
            "[TIMER] {} took {:.2}ms",
            self.name,
            self.start.elapsed().as_secs_f64() * 1000.0
        );
    }
}

pub fn scoped_timer(name: &'static str) -> ScopedTimer {
    ScopedTimer {
        name,
        start: Instant::now(),
    }
}
