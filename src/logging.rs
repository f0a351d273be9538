//! Tracing setup.
//!
//! Logging is off unless `RUST_LOG` is set. Output goes to stderr, or to a
//! file when one is given, since stderr shares the terminal with the prompt.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Open a log file for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// Does nothing when `RUST_LOG` is unset or unparsable.
pub fn install_tracing(log_file: Option<&Path>) -> io::Result<()> {
    let Ok(filter_layer) = EnvFilter::try_from_default_env() else {
        return Ok(());
    };

    let (stderr_layer, file_layer) = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false);
            (None, Some(layer))
        }
        None => {
            let layer = fmt::layer().with_writer(io::stderr).with_target(false);
            (Some(layer), None)
        }
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn log_file_is_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitadd.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn events_reach_the_file_writer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.log");

        let subscriber = fmt()
            .with_writer(Mutex::new(open_log_file(&path).unwrap()))
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(path = "src/lib.rs", "staged");
        });

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("staged"));
        assert!(content.contains("src/lib.rs"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("gitadd.log");
        assert!(open_log_file(&path).is_err());
    }
}
