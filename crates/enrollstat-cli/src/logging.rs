use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Install the global subscriber.
///
/// Without a log file, human-readable events go to stderr at `warn` unless
/// `RUST_LOG` says otherwise, keeping stdout for the report. With a log file,
/// JSON events are appended to it at `info`.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), LoggingError> {
    match log_file {
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false);
            tracing_subscriber::registry()
                .with(env_filter("warn"))
                .with(layer)
                .try_init()
                .map_err(|err| LoggingError::Install(err.to_string()))
        }
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(Mutex::new(file));

            let make_writer = BoxMakeWriter::new(move || SharedWriter {
                file: Arc::clone(&file),
            });

            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(make_writer);

            tracing_subscriber::registry()
                .with(env_filter("info"))
                .with(layer)
                .try_init()
                .map_err(|err| LoggingError::Install(err.to_string()))
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

struct SharedWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedWriter {
    fn locked(&self) -> io::Result<MutexGuard<'_, std::fs::File>> {
        self.file.lock().map_err(|_| {
            io::Error::other("failed to lock log file")
        })
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.locked()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.locked()?.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_writers_append_to_one_file() {
        let path = std::env::temp_dir().join(format!(
            "enrollstat_log_{}.ndjson",
            std::process::id()
        ));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .expect("open log file");
        let file = Arc::new(Mutex::new(file));

        let mut first = SharedWriter {
            file: Arc::clone(&file),
        };
        let mut second = SharedWriter { file };
        first.write_all(b"{\"event\":\"a\"}\n").expect("write a");
        second.write_all(b"{\"event\":\"b\"}\n").expect("write b");
        second.flush().expect("flush");

        let contents = std::fs::read_to_string(&path).expect("read log file");
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.ends_with("{\"event\":\"b\"}\n"));
        let _ = std::fs::remove_file(&path);
    }
}
