//! Export orchestration
//!
//! This module provides the core export logic for pax2yaml, including:
//! - Export coordination and orchestration
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::{ExportCoordinator, ExportOptions};
pub use summary::{ExportSummary, FailedTag};
