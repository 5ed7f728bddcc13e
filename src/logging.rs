//! File-backed logger for the terminal binary.
//!
//! The terminal belongs to the renderer, so log records go to a file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
    started: Instant,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f32();
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{elapsed:>9.3} {:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Append log records at or above `level` to `path`.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let logger = FileLogger {
        file: Mutex::new(file),
        level,
        started: Instant::now(),
    };
    log::set_boxed_logger(Box::new(logger)).context("installing logger")?;
    log::set_max_level(level);
    Ok(())
}
