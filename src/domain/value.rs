//! Tag values as read from a controller and as written to documents

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Raw value returned by a driver for one tag
///
/// Drivers decode the controller's wire representation into the closest of
/// these variants; the PLC data type name travels alongside in
/// [`TagReading`](crate::adapters::plc::TagReading).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl TagValue {
    /// Converts a value recorded loosely (e.g. `3` for a REAL) into the
    /// variant a live driver would produce for `data_type`
    pub fn coerce_to(self, data_type: &str) -> Self {
        match (data_type, self) {
            ("REAL" | "LREAL", TagValue::Int(v)) => TagValue::Float(v as f64),
            ("REAL" | "LREAL", TagValue::UInt(v)) => TagValue::Float(v as f64),
            ("BOOL", TagValue::Int(v)) => TagValue::Bool(v != 0),
            ("BOOL", TagValue::UInt(v)) => TagValue::Bool(v != 0),
            (_, value) => value,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Bool(v) => write!(f, "{v}"),
            TagValue::Int(v) => write!(f, "{v}"),
            TagValue::UInt(v) => write!(f, "{v}"),
            TagValue::Float(v) => write!(f, "{v}"),
            TagValue::Text(v) => write!(f, "{v}"),
            TagValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

/// Value stored in an output document
///
/// REAL values keep the notation they were normalized to so that `Display`
/// renders them the same way they were rounded.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    Integer(i64),
    Unsigned(u64),
    /// Floating value passed through untouched (e.g. LREAL)
    Float(f64),
    /// REAL rounded to 6 decimal places
    Fixed(f64),
    /// REAL rounded to a 6-digit mantissa
    Scientific(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
}

impl From<TagValue> for NormalizedValue {
    fn from(value: TagValue) -> Self {
        match value {
            TagValue::Bool(v) => NormalizedValue::Bool(v),
            TagValue::Int(v) => NormalizedValue::Integer(v),
            TagValue::UInt(v) => NormalizedValue::Unsigned(v),
            TagValue::Float(v) => NormalizedValue::Float(v),
            TagValue::Text(v) => NormalizedValue::Text(v),
            TagValue::Bytes(v) => NormalizedValue::Bytes(v),
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Integer(v) => write!(f, "{v}"),
            NormalizedValue::Unsigned(v) => write!(f, "{v}"),
            NormalizedValue::Float(v) => write!(f, "{v}"),
            NormalizedValue::Fixed(v) => write!(f, "{v:.6}"),
            NormalizedValue::Scientific(v) => write!(f, "{v:.6e}"),
            NormalizedValue::Bool(v) => write!(f, "{v}"),
            NormalizedValue::Text(v) => write!(f, "{v}"),
            NormalizedValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl Serialize for NormalizedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NormalizedValue::Integer(v) => serializer.serialize_i64(*v),
            NormalizedValue::Unsigned(v) => serializer.serialize_u64(*v),
            NormalizedValue::Float(v)
            | NormalizedValue::Fixed(v)
            | NormalizedValue::Scientific(v) => serializer.serialize_f64(*v),
            NormalizedValue::Bool(v) => serializer.serialize_bool(*v),
            NormalizedValue::Text(v) => serializer.serialize_str(v),
            NormalizedValue::Bytes(v) => serializer.collect_seq(v),
        }
    }
}
