//! Domain identifier types with validation
//!
//! Newtype wrappers for the names pax2yaml passes around. Each type ensures
//! type safety and rejects values that can never name anything on a controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Add-On Instruction type name
///
/// Names a controller-side structured data type such as a PlantPAX
/// `P_AIn` or `P_DIn` instruction. Matching against the controller's tag
/// database is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use pax2yaml::domain::ids::AoiType;
/// use std::str::FromStr;
///
/// let aoi = AoiType::from_str("P_DIn").unwrap();
/// assert_eq!(aoi.as_str(), "P_DIn");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AoiType(String);

impl AoiType {
    /// Creates a new AoiType from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(AoiType)` if the name is valid, `Err` otherwise
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("AOI type name cannot be empty".to_string());
        }
        if name.chars().any(char::is_whitespace) {
            return Err(format!("AOI type name cannot contain whitespace: '{name}'"));
        }
        Ok(Self(name))
    }

    /// Returns the AOI type name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AoiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AoiType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AoiType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AoiType> for String {
    fn from(value: AoiType) -> Self {
        value.0
    }
}

impl AsRef<str> for AoiType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AoiType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aoi_type_creation() {
        let aoi = AoiType::new("P_AIn").unwrap();
        assert_eq!(aoi.as_str(), "P_AIn");
        assert_eq!(format!("{aoi}"), "P_AIn");
    }

    #[test]
    fn test_aoi_type_empty_fails() {
        assert!(AoiType::new("").is_err());
        assert!(AoiType::new("   ").is_err());
    }

    #[test]
    fn test_aoi_type_whitespace_fails() {
        assert!(AoiType::new("P DIn").is_err());
    }

    #[test]
    fn test_aoi_type_compares_with_str() {
        let aoi: AoiType = "P_Motor".parse().unwrap();
        assert!(aoi == *"P_Motor");
        assert!(aoi != *"p_motor");
    }

    #[test]
    fn test_aoi_type_deserialize_rejects_empty() {
        let ok: AoiType = serde_yaml::from_str("P_DIn").unwrap();
        assert_eq!(ok.as_str(), "P_DIn");
        assert!(serde_yaml::from_str::<AoiType>("''").is_err());
    }
}
