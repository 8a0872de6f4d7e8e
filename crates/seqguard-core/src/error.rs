//! Error types for seqguard.

use thiserror::Error;

use crate::types::AnalysisReport;

/// Errors surfaced by an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A primary key type has no known ceiling. The runner resolves this
    /// locally by skipping the table; it never ends a run.
    #[error("table {table} has primary key {column} with unsupported type {sql_type}")]
    UnsupportedType {
        table: String,
        column: String,
        sql_type: String,
    },

    /// One or more tables are overflowed or will overflow within the horizon.
    #[error("{}", .0.overflow_message())]
    Overflow(Box<AnalysisReport>),

    /// A read against the data source failed.
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

impl AnalysisError {
    /// The report carried by an `Overflow` error.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisError::Overflow(report) => Some(report.as_ref()),
            _ => None,
        }
    }
}

/// Errors loading `seqguard.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Errors loading a JSON snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}
