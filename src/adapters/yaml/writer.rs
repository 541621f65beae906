//! Writes one record per file

use crate::domain::{PaxError, Record, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize `record` to `directory/filename`
///
/// Creates `directory` recursively if needed and truncates an existing file.
/// The write is not atomic.
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written, or a
/// serialization error if the record cannot be rendered.
pub fn write_record(record: &Record, directory: &Path, filename: &str) -> Result<PathBuf> {
    fs::create_dir_all(directory).map_err(|e| {
        PaxError::Io(format!(
            "Failed to create directory {}: {}",
            directory.display(),
            e
        ))
    })?;

    let yaml = serde_yaml::to_string(record)?;
    let path = directory.join(filename);
    fs::write(&path, yaml)
        .map_err(|e| PaxError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(path)
}

/// Writes records under a fixed output root
///
/// With `dry_run` set nothing touches the filesystem; the path that would have
/// been written is still returned.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    root: PathBuf,
    dry_run: bool,
}

impl DocumentWriter {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
        }
    }

    /// Writes `record` to `<root>/<relative_dir>/<filename>`
    pub fn write(&self, record: &Record, relative_dir: &Path, filename: &str) -> Result<PathBuf> {
        let directory = self.root.join(relative_dir);
        if self.dry_run {
            tracing::debug!(path = %directory.join(filename).display(), "Dry run, not writing");
            return Ok(directory.join(filename));
        }
        write_record(record, &directory, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AoiType, NormalizedValue, Section};
    use tempfile::TempDir;

    fn record() -> Record {
        let mut record = Record::new(AoiType::new("P_DIn").unwrap());
        let mut status = Section::new();
        status.insert("Sts.Run", NormalizedValue::Integer(1));
        status.insert("Sts.Fail", NormalizedValue::Integer(0));
        record.insert_section("Status", status);
        record
    }

    #[test]
    fn test_write_creates_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("TagData_PLC01").join("P_DIn");

        let path = write_record(&record(), &dir, "Inst1.yml").unwrap();

        assert_eq!(path, dir.join("Inst1.yml"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "AOI: P_DIn\nStatus:\n  Sts.Run: 1\n  Sts.Fail: 0\n"
        );
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Inst1.yml");
        fs::write(&path, "stale: content\n".repeat(50)).unwrap();

        write_record(&record(), tmp.path(), "Inst1.yml").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.starts_with("AOI: P_DIn\n"));
    }

    #[test]
    fn test_bracketed_file_names_are_literal() {
        let tmp = TempDir::new().unwrap();
        let path = write_record(&record(), tmp.path(), "Base[2][0].yml").unwrap();
        assert!(path.ends_with("Base[2][0].yml"));
        assert!(path.exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let writer = DocumentWriter::new(tmp.path(), true);
        let path = writer
            .write(&record(), Path::new("TagData_PLC01"), "Inst1.yml")
            .unwrap();
        assert_eq!(path, tmp.path().join("TagData_PLC01").join("Inst1.yml"));
        assert!(!tmp.path().join("TagData_PLC01").exists());
    }
}
