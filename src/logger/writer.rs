//! Log writer module
//!
//! Chooses where formatted log lines go: an append-mode file or stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Writer for the subscriber, a file when `log_file` is set
pub fn make_writer(log_file: Option<&str>) -> io::Result<BoxMakeWriter> {
    Ok(match log_file {
        Some(path) => BoxMakeWriter::new(Mutex::new(open_log_file(path)?)),
        None => BoxMakeWriter::new(io::stderr),
    })
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = std::env::temp_dir().join(format!("http-freshness-log-{}", std::process::id()));
        let path = dir.join("nested").join("freshness.log");
        let path_str = path.to_str().unwrap();

        let mut file = open_log_file(path_str).unwrap();
        writeln!(file, "first").unwrap();
        drop(file);
        let mut file = open_log_file(path_str).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_make_writer_stderr() {
        assert!(make_writer(None).is_ok());
    }
}
