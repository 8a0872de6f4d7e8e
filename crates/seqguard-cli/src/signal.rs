//! Alert file signalizer.
//!
//! Appends one JSON object per alert to a JSON-lines file so that an
//! external shipper can forward it to a pager.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use seqguard_analyzer::Signalizer;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
struct SignalRecord<'a> {
    at: u64,
    message: &'a str,
}

pub struct FileSignalizer {
    path: PathBuf,
}

impl FileSignalizer {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn append(&self, message: &str) -> anyhow::Result<()> {
        let record = SignalRecord {
            at: epoch_secs(),
            message,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl Signalizer for FileSignalizer {
    fn signalize(&self, message: &str) {
        if let Err(e) = self.append(message) {
            error!(
                path = %self.path.display(),
                error = %e,
                "failed to write overflow signal"
            );
        }
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_line_per_signal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.jsonl");
        let signalizer = FileSignalizer::new(&path);

        signalizer.signalize("Overflowed tables: [a]. Overflow soon tables: []");
        signalizer.signalize("Overflowed tables: []. Overflow soon tables: [b]");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(
            first["message"],
            "Overflowed tables: [a]. Overflow soon tables: []"
        );
        assert!(first["at"].as_u64().unwrap() > 0);
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let signalizer = FileSignalizer::new(Path::new("/nonexistent/dir/alerts.jsonl"));
        signalizer.signalize("Overflowed tables: [a]. Overflow soon tables: []");
    }
}
