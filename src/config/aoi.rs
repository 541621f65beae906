//! AOI configuration table
//!
//! Maps each AOI type to its ordered output sections, and each section to the
//! ordered relative sub-tag names read for it:
//!
//! ```toml
//! [aoi.P_DIn]
//! Status = ["Sts.Run", "Sts.Fail"]
//! Config = ["Cfg_Delay", "Cfg_Inv"]
//! ```
//!
//! The table is loaded once and passed to the export routines by reference.

use crate::domain::record::AOI_KEY;
use crate::domain::AoiType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sections of one AOI type, in output order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AoiDefinition {
    sections: IndexMap<String, Vec<String>>,
}

impl AoiDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style section insert
    pub fn with_section<I, S>(mut self, name: impl Into<String>, sub_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections
            .insert(name.into(), sub_tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sections with their relative sub-tag names, in configured order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(name, tags)| (name.as_str(), tags.as_slice()))
    }

    /// Total number of sub-tags read per instance
    pub fn tag_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    fn validate(&self, aoi: &AoiType) -> Result<(), String> {
        if self.sections.is_empty() {
            return Err(format!("aoi.{aoi} must define at least one section"));
        }
        for (name, sub_tags) in &self.sections {
            if name.trim().is_empty() {
                return Err(format!("aoi.{aoi} has an empty section name"));
            }
            if name == AOI_KEY {
                return Err(format!(
                    "aoi.{aoi} cannot use the reserved section name '{AOI_KEY}'"
                ));
            }
            if sub_tags.is_empty() {
                return Err(format!("aoi.{aoi}.{name} must list at least one sub-tag"));
            }
            if let Some(bad) = sub_tags.iter().find(|t| t.trim().is_empty()) {
                return Err(format!(
                    "aoi.{aoi}.{name} contains an empty sub-tag name ('{bad}')"
                ));
            }
        }
        Ok(())
    }
}

/// The full AOI table, in configured order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AoiConfig {
    types: IndexMap<AoiType, AoiDefinition>,
}

impl AoiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style AOI type insert
    pub fn with_type(mut self, aoi: AoiType, definition: AoiDefinition) -> Self {
        self.types.insert(aoi, definition);
        self
    }

    pub fn get(&self, aoi: &AoiType) -> Option<&AoiDefinition> {
        self.types.get(aoi)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AoiType, &AoiDefinition)> {
        self.types.iter()
    }

    pub fn types(&self) -> impl Iterator<Item = &AoiType> {
        self.types.keys()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Keeps only the named AOI types, preserving configured order
    ///
    /// # Errors
    ///
    /// Returns an error naming any requested type that is not configured
    pub fn restrict_to(&mut self, names: &[AoiType]) -> Result<(), String> {
        let unknown: Vec<&str> = names
            .iter()
            .filter(|n| !self.types.contains_key(*n))
            .map(AoiType::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(format!(
                "AOI type(s) not present in configuration: {}",
                unknown.join(", ")
            ));
        }
        self.types.retain(|aoi, _| names.contains(aoi));
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.types.is_empty() {
            return Err("at least one [aoi.<Type>] table must be configured".to_string());
        }
        for (aoi, definition) in &self.types {
            definition.validate(aoi)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aoi(name: &str) -> AoiType {
        AoiType::new(name).unwrap()
    }

    #[test]
    fn test_toml_preserves_section_order() {
        let config: AoiConfig = toml::from_str(
            r#"
[P_DIn]
Status = ["Sts.Run", "Sts.Fail"]
Alarm = ["Alm_Fail"]
Config = ["Cfg_Delay"]

[P_AIn]
Value = ["Val"]
"#,
        )
        .unwrap();

        let types: Vec<&str> = config.types().map(AoiType::as_str).collect();
        assert_eq!(types, vec!["P_DIn", "P_AIn"]);

        let din = config.get(&aoi("P_DIn")).unwrap();
        let names: Vec<&str> = din.sections().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Status", "Alarm", "Config"]);
        assert_eq!(din.tag_count(), 4);
    }

    #[test]
    fn test_duplicate_section_names_are_rejected_by_parser() {
        let result: Result<AoiConfig, _> = toml::from_str(
            r#"
[P_DIn]
Status = ["Sts.Run"]
Status = ["Sts.Fail"]
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_reserved_section() {
        let config = AoiConfig::new().with_type(
            aoi("P_DIn"),
            AoiDefinition::new().with_section("AOI", ["Sts.Run"]),
        );
        let err = config.validate().unwrap_err();
        assert!(err.contains("reserved"));
    }

    #[test]
    fn test_validate_rejects_empty_section() {
        let config = AoiConfig::new().with_type(
            aoi("P_DIn"),
            AoiDefinition::new().with_section("Status", Vec::<String>::new()),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        assert!(AoiConfig::new().validate().is_err());
    }

    #[test]
    fn test_restrict_to_keeps_configured_order() {
        let mut config = AoiConfig::new()
            .with_type(aoi("A"), AoiDefinition::new().with_section("S", ["x"]))
            .with_type(aoi("B"), AoiDefinition::new().with_section("S", ["x"]))
            .with_type(aoi("C"), AoiDefinition::new().with_section("S", ["x"]));

        config.restrict_to(&[aoi("C"), aoi("A")]).unwrap();
        let types: Vec<&str> = config.types().map(AoiType::as_str).collect();
        assert_eq!(types, vec!["A", "C"]);
    }

    #[test]
    fn test_restrict_to_unknown_type_fails() {
        let mut config =
            AoiConfig::new().with_type(aoi("A"), AoiDefinition::new().with_section("S", ["x"]));
        let err = config.restrict_to(&[aoi("Nope")]).unwrap_err();
        assert!(err.contains("Nope"));
    }
}
