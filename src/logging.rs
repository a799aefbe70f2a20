//! File-backed `log` backend.
//!
//! The terminal is the game's canvas, so log records go to a file instead
//! of stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

fn format_record(secs: u64, millis: u32, record: &Record) -> String {
    format!(
        "{secs}.{millis:03} {:<5} {}: {}",
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let line = format_record(now.as_secs(), now.subsec_millis(), record);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Append log records at or above `level` to `path`.
///
/// Fails if the file cannot be opened or a logger is already installed.
pub fn init(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let logger: &'static FileLogger = Box::leak(Box::new(FileLogger {
        level,
        file: Mutex::new(file),
    }));
    log::set_logger(logger)
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use log::Level;

    #[test]
    fn record_line_layout() {
        assert_eq!(
            format_record(
                12,
                5,
                &Record::builder()
                    .args(format_args!("pipe spawned at {}", 800))
                    .level(Level::Debug)
                    .target("weather_flappy::compute")
                    .build()
            ),
            "12.005 DEBUG weather_flappy::compute: pipe spawned at 800"
        );
    }

    #[test]
    fn init_installs_file_logger_once() {
        let dir = std::env::temp_dir().join(format!("weather-flappy-log-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("game.log");
        let _ = fs::remove_file(&path);

        init(&path, LevelFilter::Info).unwrap();
        log::info!(target: "weather_flappy::test", "first frame");
        log::debug!(target: "weather_flappy::test", "below the threshold");
        log::logger().flush();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("INFO  weather_flappy::test: first frame"));
        assert!(!written.contains("below the threshold"));

        let again = init(&path, LevelFilter::Info).unwrap_err();
        assert_eq!(again.kind(), io::ErrorKind::AlreadyExists);

        let _ = fs::remove_dir_all(&dir);
    }
}
