use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::config::Settings;

/// Writes `[timestamp] [LEVEL] [target] message` lines to stderr or to an appended log file.
/// Stdout is left to the interactive session.
struct SessionLogger {
    level: LevelFilter,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl SessionLogger {
    fn format(record: &Record) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl log::Log for SessionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Ok(mut sink) = self.sink.lock() {
            _ = writeln!(sink, "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            _ = sink.flush();
        }
    }
}

/// Install the process-wide logger.  A log file that can't be opened falls back to stderr.
pub fn setup(settings: &Settings) -> Result<(), SetLoggerError> {
    let sink: Box<dyn Write + Send> = match settings.log_file() {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Could not open log file {}: {}", path.display(), e);
                Box::new(io::stderr())
            },
        },
        None => Box::new(io::stderr()),
    };

    let logger = SessionLogger {
        level: settings.log_level(),
        sink: Mutex::new(sink),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(settings.log_level());
    Ok(())
}
