//! In-memory sequence source loaded from a JSON snapshot.
//!
//! A snapshot lists models with their table, primary key, and rows. It is
//! what the CLI analyzes and what the tests build fixtures from.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SnapshotError;
use crate::types::{Entry, PrimaryKey, SequenceDescriptor, Timestamp};

/// One row of a snapshot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// A model mapped onto a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotModel {
    pub name: String,
    pub table: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    pub primary_key: PrimaryKey,
    #[serde(default)]
    pub rows: Vec<SnapshotRow>,
}

impl SnapshotModel {
    pub fn new(name: &str, table: &str, pk_type: &str) -> Self {
        Self {
            name: name.to_string(),
            table: table.to_string(),
            is_abstract: false,
            primary_key: PrimaryKey {
                name: "id".to_string(),
                sql_type: pk_type.to_string(),
            },
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, id: u64, created_at: Option<Timestamp>) -> Self {
        self.rows.push(SnapshotRow { id, created_at });
        self
    }

    pub fn abstract_model(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

impl SequenceDescriptor for SnapshotModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn table_name(&self) -> &str {
        &self.table
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn primary_key(&self) -> anyhow::Result<PrimaryKey> {
        Ok(self.primary_key.clone())
    }

    fn last_entry(&self) -> anyhow::Result<Option<Entry>> {
        Ok(self.rows.iter().max_by_key(|r| r.id).map(|r| Entry {
            identifier: r.id,
            created_at: r.created_at,
        }))
    }

    fn count_created_between(&self, from: Timestamp, to: Timestamp) -> anyhow::Result<u64> {
        let count = self
            .rows
            .iter()
            .filter_map(|r| r.created_at)
            .filter(|t| (from..=to).contains(t))
            .count();
        Ok(count as u64)
    }
}

/// The full contents of a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSource {
    pub models: Vec<SnapshotModel>,
}

impl SnapshotSource {
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let source = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            models = source.models.len(),
            "loaded snapshot"
        );
        Ok(source)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_model(mut self, model: SnapshotModel) -> Self {
        self.models.push(model);
        self
    }

    pub fn descriptors(&self) -> &[SnapshotModel] {
        &self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DAY_SECS;

    const SAMPLE: &str = r#"{
        "models": [
            {
                "name": "User",
                "table": "users",
                "primary_key": { "name": "id", "sql_type": "integer" },
                "rows": [
                    { "id": 3, "created_at": 1700000000 },
                    { "id": 9, "created_at": 1700086400 },
                    { "id": 5 }
                ]
            },
            {
                "name": "ApplicationRecord",
                "table": "application_records",
                "abstract": true,
                "primary_key": { "name": "id", "sql_type": "bigint" }
            }
        ]
    }"#;

    #[test]
    fn parses_models() {
        let source = SnapshotSource::from_json_str(SAMPLE).unwrap();
        assert_eq!(source.models.len(), 2);
        assert!(!source.models[0].is_abstract());
        assert!(source.models[1].is_abstract());
        assert!(source.models[1].rows.is_empty());
    }

    #[test]
    fn last_entry_is_highest_id() {
        let source = SnapshotSource::from_json_str(SAMPLE).unwrap();
        let last = source.models[0].last_entry().unwrap().unwrap();
        assert_eq!(last.identifier, 9);
        assert_eq!(last.created_at, Some(1_700_086_400));
    }

    #[test]
    fn empty_table_has_no_last_entry() {
        let model = SnapshotModel::new("Log", "logs", "integer");
        assert!(model.last_entry().unwrap().is_none());
    }

    #[test]
    fn count_window_is_inclusive() {
        let model = SnapshotModel::new("Event", "events", "bigint")
            .with_row(1, Some(0))
            .with_row(2, Some(DAY_SECS))
            .with_row(3, Some(2 * DAY_SECS))
            .with_row(4, None);
        assert_eq!(model.count_created_between(0, 2 * DAY_SECS).unwrap(), 3);
        assert_eq!(model.count_created_between(1, 2 * DAY_SECS).unwrap(), 2);
        assert_eq!(model.count_created_between(DAY_SECS, DAY_SECS).unwrap(), 1);
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = SnapshotSource::from_json_str("{ \"models\": 3 }").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let source = SnapshotSource::from_file(&path).unwrap();
        assert_eq!(source.descriptors()[0].table_name(), "users");
    }
}
