//! Controller driver trait definition
//!
//! The `PlcDriver` trait is the only way the export core talks to a controller.
//! It exposes the session lifecycle, the resident tag database and batched
//! reads; the Logix EtherNet/IP driver, the snapshot driver and test fakes all
//! implement it.

use crate::domain::{Result, TagPath, TagValue};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metadata for one tag in the controller's database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    /// Declared data type name (atomic type such as `REAL`, or the UDT/AOI name)
    pub data_type_name: String,

    /// Whether the tag is an alias for another tag
    #[serde(default)]
    pub alias: bool,

    /// Number of array dimensions (0 for scalars)
    #[serde(default)]
    pub dim: u8,

    /// Size of each dimension as reported by the controller; unused axes are 0
    #[serde(default)]
    pub dimensions: Vec<usize>,
}

impl TagDefinition {
    /// Scalar, non-alias tag of the given type
    pub fn scalar(data_type_name: impl Into<String>) -> Self {
        Self {
            data_type_name: data_type_name.into(),
            alias: false,
            dim: 0,
            dimensions: Vec::new(),
        }
    }

    /// Array tag of the given type and dimension sizes
    pub fn array(data_type_name: impl Into<String>, dimensions: Vec<usize>) -> Self {
        let dim = dimensions.iter().filter(|d| **d != 0).count() as u8;
        Self {
            data_type_name: data_type_name.into(),
            alias: false,
            dim,
            dimensions,
        }
    }

    /// Marks the tag as an alias
    pub fn aliased(mut self) -> Self {
        self.alias = true;
        self
    }

    pub fn is_array(&self) -> bool {
        self.dim > 0
    }
}

/// Tag database keyed by tag name, in controller order
pub type TagDatabase = IndexMap<String, TagDefinition>;

/// Result of reading one tag
#[derive(Debug, Clone, PartialEq)]
pub struct TagReading {
    /// Path as requested
    pub path: TagPath,

    /// Decoded value, `None` when the controller rejected this tag
    pub value: Option<TagValue>,

    /// PLC data type name of the value (e.g. `BOOL`, `REAL`)
    pub data_type: Option<String>,

    /// Reason the tag could not be read
    pub error: Option<String>,
}

impl TagReading {
    /// Successful reading
    pub fn ok(path: TagPath, value: TagValue, data_type: impl Into<String>) -> Self {
        Self {
            path,
            value: Some(value),
            data_type: Some(data_type.into()),
            error: None,
        }
    }

    /// Failed reading with the controller's reason
    pub fn failed(path: TagPath, error: impl Into<String>) -> Self {
        Self {
            path,
            value: None,
            data_type: None,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.value.is_some()
    }
}

/// Trait for controller drivers
///
/// Calls are issued one at a time by a single task; implementations do not
/// need interior synchronization.
///
/// # Errors
///
/// Transport failures (connection refused, timeouts, malformed replies) are
/// returned as [`ControllerError`](crate::domain::ControllerError)s. A tag the
/// controller refuses to read is not an error; it comes back as a failed
/// [`TagReading`].
#[async_trait]
pub trait PlcDriver: Send {
    /// Open the session and load the tag database
    async fn open(&mut self) -> Result<()>;

    /// Name of the controller program (the controller's configured name)
    async fn plc_name(&mut self) -> Result<String>;

    /// Tag database loaded by `open()`; empty before that
    fn tags(&self) -> &TagDatabase;

    /// Read the given paths, returning one reading per path in request order
    async fn read(&mut self, paths: &[TagPath]) -> Result<Vec<TagReading>>;

    /// Close the session
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_counts_nonzero_dimensions() {
        let def = TagDefinition::array("P_AIn", vec![4, 0, 0]);
        assert_eq!(def.dim, 1);
        assert!(def.is_array());
        assert!(!TagDefinition::scalar("P_AIn").is_array());
    }

    #[test]
    fn test_reading_constructors() {
        let path = TagPath::new("Inst1.Val").unwrap();
        let ok = TagReading::ok(path.clone(), TagValue::Float(1.5), "REAL");
        assert!(ok.is_ok());

        let failed = TagReading::failed(path, "Path destination unknown");
        assert!(!failed.is_ok());
        assert!(failed.value.is_none());
    }

    #[test]
    fn test_tag_definition_yaml_defaults() {
        let def: TagDefinition = serde_yaml::from_str("data_type_name: P_DIn").unwrap();
        assert_eq!(def, TagDefinition::scalar("P_DIn"));
    }
}
