//! Snapshot driver
//!
//! Serves a recorded controller from a YAML file instead of a live session.
//! Selected with a `snapshot:<file>` connection path; handy for offline
//! exports, demos and tests.
//!
//! ```yaml
//! controller: PLC01
//! tags:
//!   Inst1:
//!     data_type_name: P_DIn
//!   Valves:
//!     data_type_name: P_ValveSO
//!     dim: 1
//!     dimensions: [3, 0, 0]
//! values:
//!   Inst1.Sts.Run: { type: BOOL, value: true }
//!   Inst1.Val: { type: REAL, value: 12.5 }
//! ```

use super::traits::{PlcDriver, TagDatabase, TagReading};
use crate::domain::{ControllerError, Result, TagPath, TagValue};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Connection-path prefix selecting this driver
pub const SNAPSHOT_SCHEME: &str = "snapshot:";

/// One recorded tag value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedValue {
    #[serde(rename = "type")]
    pub data_type: String,
    pub value: TagValue,
}

/// Contents of a snapshot file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// Controller name reported by `plc_name()`
    pub controller: String,

    /// Tag database
    #[serde(default)]
    pub tags: TagDatabase,

    /// Values keyed by absolute tag path
    #[serde(default)]
    pub values: IndexMap<String, RecordedValue>,
}

impl ControllerSnapshot {
    pub fn new(controller: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            ..Self::default()
        }
    }

    /// Parses snapshot YAML
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| ControllerError::Snapshot(format!("Invalid snapshot: {e}")).into())
    }
}

enum Source {
    File(PathBuf),
    Loaded,
}

/// Driver backed by a [`ControllerSnapshot`]
pub struct SnapshotDriver {
    source: Source,
    snapshot: ControllerSnapshot,
    open: bool,
}

impl SnapshotDriver {
    /// Driver that loads `path` on `open()`
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
            snapshot: ControllerSnapshot::default(),
            open: false,
        }
    }

    /// Driver over an in-memory snapshot
    pub fn from_snapshot(snapshot: ControllerSnapshot) -> Self {
        Self {
            source: Source::Loaded,
            snapshot,
            open: false,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(ControllerError::NotConnected.into())
        }
    }
}

#[async_trait]
impl PlcDriver for SnapshotDriver {
    async fn open(&mut self) -> Result<()> {
        if let Source::File(path) = &self.source {
            let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                ControllerError::Snapshot(format!(
                    "Failed to read snapshot {}: {e}",
                    path.display()
                ))
            })?;
            self.snapshot = ControllerSnapshot::from_yaml(&text)?;
            tracing::debug!(
                path = %path.display(),
                tags = self.snapshot.tags.len(),
                values = self.snapshot.values.len(),
                "Snapshot loaded"
            );
        }
        self.open = true;
        Ok(())
    }

    async fn plc_name(&mut self) -> Result<String> {
        self.ensure_open()?;
        Ok(self.snapshot.controller.clone())
    }

    fn tags(&self) -> &TagDatabase {
        &self.snapshot.tags
    }

    async fn read(&mut self, paths: &[TagPath]) -> Result<Vec<TagReading>> {
        self.ensure_open()?;
        Ok(paths
            .iter()
            .map(|path| match self.snapshot.values.get(path.as_str()) {
                Some(recorded) => TagReading::ok(
                    path.clone(),
                    recorded.value.clone().coerce_to(&recorded.data_type),
                    recorded.data_type.clone(),
                ),
                None => TagReading::failed(path.clone(), "Tag not present in snapshot"),
            })
            .collect())
    }

    async fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::plc::traits::TagDefinition;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"
controller: PLC01
tags:
  Inst1:
    data_type_name: P_DIn
  Valves:
    data_type_name: P_ValveSO
    dim: 1
    dimensions: [3, 0, 0]
values:
  Inst1.Sts.Run: { type: BOOL, value: true }
  Inst1.Val: { type: REAL, value: 12 }
"#;

    fn path(s: &str) -> TagPath {
        TagPath::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_file_snapshot_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        file.flush().unwrap();

        let mut driver = SnapshotDriver::from_file(file.path());
        assert!(driver.tags().is_empty());
        driver.open().await.unwrap();

        assert_eq!(driver.plc_name().await.unwrap(), "PLC01");
        assert_eq!(driver.tags().len(), 2);
        assert_eq!(
            driver.tags()["Valves"],
            TagDefinition {
                data_type_name: "P_ValveSO".to_string(),
                alias: false,
                dim: 1,
                dimensions: vec![3, 0, 0],
            }
        );

        let readings = driver
            .read(&[path("Inst1.Sts.Run"), path("Inst1.Val"), path("Inst1.Nope")])
            .await
            .unwrap();
        assert_eq!(readings[0].value, Some(TagValue::Bool(true)));
        assert_eq!(readings[1].value, Some(TagValue::Float(12.0)));
        assert_eq!(readings[1].data_type.as_deref(), Some("REAL"));
        assert!(!readings[2].is_ok());
    }

    #[tokio::test]
    async fn test_read_before_open_fails() {
        let mut driver = SnapshotDriver::from_snapshot(ControllerSnapshot::new("PLC01"));
        assert!(driver.read(&[path("A")]).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_fails_on_open() {
        let mut driver = SnapshotDriver::from_file("/nonexistent/controller.yaml");
        let err = driver.open().await.unwrap_err();
        assert!(err.to_string().contains("Snapshot"));
    }
}
