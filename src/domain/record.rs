//! Output document model
//!
//! One [`Record`] is written per AOI instance. It has three fixed levels:
//! the document (AOI type plus sections), each [`Section`], and the leaf
//! values keyed by relative sub-tag name. Key order is insertion order at
//! every level.

use super::ids::AoiType;
use super::value::NormalizedValue;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Key holding the AOI type name, always first in a document
pub const AOI_KEY: &str = "AOI";

/// Leaf values of one configured section, keyed by relative sub-tag name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Section(IndexMap<String, NormalizedValue>);

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value; a repeated key keeps its position and takes the new value
    pub fn insert(&mut self, key: impl Into<String>, value: NormalizedValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&NormalizedValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NormalizedValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, NormalizedValue)> for Section {
    fn from_iter<T: IntoIterator<Item = (String, NormalizedValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Document for one AOI instance
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    aoi: AoiType,
    sections: IndexMap<String, Section>,
}

impl Record {
    pub fn new(aoi: AoiType) -> Self {
        Self {
            aoi,
            sections: IndexMap::new(),
        }
    }

    pub fn aoi(&self) -> &AoiType {
        &self.aoi
    }

    /// Stores a section under `name`, after any sections already present
    pub fn insert_section(&mut self, name: impl Into<String>, section: Section) {
        self.sections.insert(name.into(), section);
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Top-level keys in document order, starting with `AOI`
    pub fn keys(&self) -> Vec<&str> {
        std::iter::once(AOI_KEY)
            .chain(self.sections.keys().map(String::as_str))
            .collect()
    }

    /// Number of leaf values across all sections
    pub fn value_count(&self) -> usize {
        self.sections.values().map(Section::len).sum()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len() + 1))?;
        map.serialize_entry(AOI_KEY, self.aoi.as_str())?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        let mut record = Record::new(AoiType::new("P_DIn").unwrap());
        let mut status = Section::new();
        status.insert("Sts.Run", NormalizedValue::Integer(1));
        status.insert("Sts.Fail", NormalizedValue::Integer(0));
        record.insert_section("Status", status);
        let mut cfg = Section::new();
        cfg.insert("Cfg.Delay", NormalizedValue::Fixed(1.5));
        record.insert_section("Config", cfg);
        record
    }

    #[test]
    fn test_keys_start_with_aoi_then_configured_order() {
        assert_eq!(record().keys(), vec!["AOI", "Status", "Config"]);
    }

    #[test]
    fn test_value_count() {
        assert_eq!(record().value_count(), 3);
    }

    #[test]
    fn test_section_insert_last_write_wins_in_place() {
        let mut section = Section::new();
        section.insert("a", NormalizedValue::Integer(1));
        section.insert("b", NormalizedValue::Integer(2));
        section.insert("a", NormalizedValue::Integer(3));
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(section.get("a"), Some(&NormalizedValue::Integer(3)));
    }

    #[test]
    fn test_record_serializes_block_yaml_in_order() {
        let yaml = serde_yaml::to_string(&record()).unwrap();
        assert_eq!(
            yaml,
            "AOI: P_DIn\nStatus:\n  Sts.Run: 1\n  Sts.Fail: 0\nConfig:\n  Cfg.Delay: 1.5\n"
        );
    }
}
