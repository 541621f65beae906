//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{AoiType, TagPath};
use std::time::Duration;

/// A tag that could not be read during the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTag {
    /// AOI type of the instance the tag belongs to
    pub aoi: AoiType,

    /// Absolute tag path
    pub path: TagPath,

    /// Reason reported by the controller
    pub reason: String,
}

impl FailedTag {
    pub fn new(aoi: AoiType, path: TagPath, reason: impl Into<String>) -> Self {
        Self {
            aoi,
            path,
            reason: reason.into(),
        }
    }
}

/// Summary of an export operation
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Controller name as reported by the driver
    pub controller: String,

    /// AOI types with at least one instance
    pub aoi_types_processed: usize,

    /// AOI types with no instances on the controller
    pub aoi_types_skipped: usize,

    /// Instances discovered across all AOI types
    pub instances_found: usize,

    /// Documents written (or that would have been, in a dry run)
    pub records_written: usize,

    /// Tags read successfully
    pub tags_read: usize,

    /// Tags the controller refused to read
    pub failed_tags: Vec<FailedTag>,

    /// Duration of the export
    pub duration: Duration,

    /// Whether this was a dry run
    pub dry_run: bool,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a tag read failure
    pub fn add_failed_tag(&mut self, failed: FailedTag) {
        self.failed_tags.push(failed);
    }

    /// Failed tags belonging to one AOI type
    pub fn failed_for<'a>(&'a self, aoi: &'a AoiType) -> impl Iterator<Item = &'a FailedTag> {
        self.failed_tags.iter().filter(move |f| &f.aoi == aoi)
    }

    /// Check if the export was successful (every tag read)
    pub fn is_successful(&self) -> bool {
        self.failed_tags.is_empty()
    }

    /// Get success rate as a percentage of tags read
    pub fn success_rate(&self) -> f64 {
        let total = self.tags_read + self.failed_tags.len();
        if total == 0 {
            return 100.0;
        }
        (self.tags_read as f64 / total as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            controller = %self.controller,
            aoi_types = self.aoi_types_processed,
            aoi_types_skipped = self.aoi_types_skipped,
            instances = self.instances_found,
            records = self.records_written,
            tags_read = self.tags_read,
            failed = self.failed_tags.len(),
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            dry_run = self.dry_run,
            "Export completed"
        );

        if !self.failed_tags.is_empty() {
            tracing::warn!(
                failed_count = self.failed_tags.len(),
                "Export completed with failed tags"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(aoi: &str, path: &str) -> FailedTag {
        FailedTag::new(
            AoiType::new(aoi).unwrap(),
            TagPath::new(path).unwrap(),
            "Path destination unknown",
        )
    }

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.instances_found, 0);
        assert_eq!(summary.records_written, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.failed_tags.is_empty());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_failed_tags_make_export_unsuccessful() {
        let mut summary = ExportSummary::new();
        summary.add_failed_tag(failed("P_DIn", "Inst1.Sts.Bad"));

        assert!(!summary.is_successful());
    }

    #[test]
    fn test_failed_for_filters_by_aoi() {
        let mut summary = ExportSummary::new();
        summary.add_failed_tag(failed("P_DIn", "Inst1.A"));
        summary.add_failed_tag(failed("P_AIn", "LT101.B"));
        summary.add_failed_tag(failed("P_DIn", "Inst2.A"));

        let aoi = AoiType::new("P_DIn").unwrap();
        let paths: Vec<&str> = summary.failed_for(&aoi).map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["Inst1.A", "Inst2.A"]);
    }

    #[test]
    fn test_success_rate() {
        let mut summary = ExportSummary::new();
        assert_eq!(summary.success_rate(), 100.0);

        summary.tags_read = 3;
        summary.add_failed_tag(failed("P_DIn", "Inst1.A"));
        assert_eq!(summary.success_rate(), 75.0);
    }
}
