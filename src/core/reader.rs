//! Batched read and normalization of sub-tags

use super::normalize::normalize;
use crate::adapters::plc::PlcDriver;
use crate::domain::{ControllerError, NormalizedValue, Result, TagPath};

/// A tag the controller refused to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRead {
    pub path: TagPath,
    pub reason: String,
}

/// Normalized values in request order, plus the paths that failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadBatch {
    pub values: Vec<(TagPath, NormalizedValue)>,
    pub failures: Vec<FailedRead>,
}

impl ReadBatch {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Read `paths` in one driver call and normalize each value by its PLC type
///
/// A single path is issued as a single-tag read by the driver; several paths
/// go out as one batch. An empty list makes no call at all.
///
/// # Errors
///
/// Transport errors from the driver, or a driver that returns a different
/// number of readings than requested. Per-tag failures are not errors; they
/// are returned in [`ReadBatch::failures`].
pub async fn read_and_normalize<D: PlcDriver + ?Sized>(
    driver: &mut D,
    paths: &[TagPath],
) -> Result<ReadBatch> {
    let mut batch = ReadBatch::default();
    if paths.is_empty() {
        return Ok(batch);
    }

    let readings = driver.read(paths).await?;
    if readings.len() != paths.len() {
        return Err(ControllerError::InvalidResponse(format!(
            "requested {} tags, driver returned {} readings",
            paths.len(),
            readings.len()
        ))
        .into());
    }

    for reading in readings {
        match (reading.value, reading.error) {
            (Some(value), None) => {
                let normalized = match reading.data_type.as_deref() {
                    Some(data_type) => normalize(value, data_type),
                    None => value.into(),
                };
                batch.values.push((reading.path, normalized));
            }
            (_, error) => batch.failures.push(FailedRead {
                path: reading.path,
                reason: error.unwrap_or_else(|| "No value returned".to_string()),
            }),
        }
    }

    tracing::trace!(
        count = paths.len(),
        failed = batch.failures.len(),
        "Tags read"
    );
    Ok(batch)
}
