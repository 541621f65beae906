//! Export coordinator - main orchestrator for the export process
//!
//! Drives the double loop over configured AOI types and their instances:
//! discover, read each section, assemble the record, write the document.

use crate::adapters::plc::PlcDriver;
use crate::adapters::yaml::DocumentWriter;
use crate::config::{AoiConfig, AoiDefinition, OutputConfig, OutputLayout};
use crate::core::assemble::assemble;
use crate::core::discovery::discover;
use crate::core::export::summary::{ExportSummary, FailedTag};
use crate::core::paths::build_paths;
use crate::core::reader::read_and_normalize;
use crate::domain::{AoiType, PaxError, Record, Result, TagPath};
use crate::{log_failed_tag, log_record_written};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

/// Per-AOI bar: type name, bar, position and the instance being read
const PROGRESS_TEMPLATE: &str = "{prefix:>12} [{bar:30}] {pos}/{len} {msg}";

/// Where and how documents are written
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output root; the controller folder is created below it
    pub root: PathBuf,

    /// Folder layout below the controller folder
    pub layout: OutputLayout,

    /// Prefix of the controller folder name
    pub folder_prefix: String,

    /// Discover and read, but write nothing
    pub dry_run: bool,

    /// Abort on the first tag the controller refuses to read
    pub strict: bool,

    /// Show a progress bar per AOI type
    pub show_progress: bool,
}

impl ExportOptions {
    /// Options from the `[output]` configuration section
    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            root: PathBuf::from(&output.directory),
            layout: output.layout,
            folder_prefix: output.folder_prefix.clone(),
            dry_run: false,
            strict: false,
            show_progress: false,
        }
    }

    /// Directory, relative to the root, holding documents of `aoi`
    pub fn relative_dir(&self, controller: &str, aoi: &AoiType) -> PathBuf {
        let controller_dir = PathBuf::from(format!("{}{}", self.folder_prefix, controller));
        match self.layout {
            OutputLayout::PerAoi => controller_dir.join(aoi.as_str()),
            OutputLayout::Flat => controller_dir,
        }
    }
}

/// Notice for an AOI type the controller has no instances of
fn no_instances_line(aoi: &AoiType, controller: &str) -> String {
    format!("No instances of {aoi} found in {controller} PLC.")
}

/// Export coordinator
pub struct ExportCoordinator<'a> {
    driver: &'a mut dyn PlcDriver,
    aoi_config: &'a AoiConfig,
    options: ExportOptions,
}

impl<'a> ExportCoordinator<'a> {
    /// Create a coordinator over an opened driver
    pub fn new(
        driver: &'a mut dyn PlcDriver,
        aoi_config: &'a AoiConfig,
        options: ExportOptions,
    ) -> Self {
        Self {
            driver,
            aoi_config,
            options,
        }
    }

    /// Execute the export
    ///
    /// For each configured AOI type, in configured order, discovers its
    /// instances and writes one document per instance. AOI types without
    /// instances are reported and skipped.
    ///
    /// # Errors
    ///
    /// Transport and filesystem errors abort the export. With
    /// [`ExportOptions::strict`] set, the first failed tag aborts it too.
    pub async fn execute_export(&mut self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.options.dry_run;

        let controller = self.driver.plc_name().await?;
        summary.controller = controller.clone();
        let writer = DocumentWriter::new(&self.options.root, self.options.dry_run);

        tracing::info!(
            controller = %controller,
            aoi_types = self.aoi_config.len(),
            dry_run = self.options.dry_run,
            "Starting export"
        );

        let aoi_config = self.aoi_config;
        for (aoi, definition) in aoi_config.iter() {
            let instances = discover(&*self.driver, aoi);
            if instances.is_empty() {
                println!("{}", no_instances_line(aoi, &controller));
                tracing::info!(aoi = %aoi, "No instances found");
                summary.aoi_types_skipped += 1;
                continue;
            }

            tracing::info!(
                aoi = %aoi,
                count = instances.len(),
                tags_per_instance = definition.tag_count(),
                "Exporting instances"
            );
            summary.aoi_types_processed += 1;
            summary.instances_found += instances.len();

            let progress = self.progress_bar(aoi, instances.len());
            let directory = self.options.relative_dir(&controller, aoi);
            for instance in &instances {
                progress.set_message(instance.to_string());
                let record = self
                    .collect_record(aoi, definition, instance, &mut summary)
                    .await?;
                let path = writer.write(&record, &directory, &instance.document_file_name())?;
                log_record_written!(aoi, instance, path, record.value_count());
                summary.records_written += 1;
                progress.inc(1);
            }
            progress.finish_and_clear();

            let failed = summary.failed_for(aoi).count();
            if failed > 0 {
                println!("{aoi}: {failed} tag(s) could not be read");
                for tag in summary.failed_for(aoi) {
                    println!("  {}: {}", tag.path, tag.reason);
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Reads every configured section of one instance
    async fn collect_record(
        &mut self,
        aoi: &AoiType,
        definition: &AoiDefinition,
        instance: &TagPath,
        summary: &mut ExportSummary,
    ) -> Result<Record> {
        let mut record = Record::new(aoi.clone());
        for (section_name, sub_tags) in definition.sections() {
            let paths = build_paths(instance, sub_tags);
            let batch = read_and_normalize(&mut *self.driver, &paths).await?;
            summary.tags_read += batch.values.len();

            for failure in batch.failures {
                log_failed_tag!(aoi, failure.path, failure.reason);
                if self.options.strict {
                    return Err(PaxError::Read(format!(
                        "{}: {}",
                        failure.path, failure.reason
                    )));
                }
                summary.add_failed_tag(FailedTag::new(aoi.clone(), failure.path, failure.reason));
            }

            record.insert_section(section_name, assemble(batch.values, instance));
        }
        Ok(record)
    }

    fn progress_bar(&self, aoi: &AoiType, len: usize) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }
        let progress = ProgressBar::new(len as u64);
        match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
            Ok(style) => progress.set_style(style),
            Err(e) => tracing::debug!(error = %e, "Default progress style kept"),
        }
        progress.set_prefix(aoi.to_string());
        progress
    }
}
