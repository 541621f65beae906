//! Absolute tag addresses
//!
//! A [`TagPath`] is an opaque controller address following the grammar
//! `name(.name)*([index])*`, e.g. `Program:Main.LT101`, `Valves[3][1]` or
//! `Valves[3][1].Sts.Open`. Only index suffixes are validated when they are
//! appended; everything else treats the path as a string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Member separator between a base tag and a sub-tag
pub const MEMBER_SEPARATOR: char = '.';

/// Absolute tag path on a controller
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagPath(String);

impl TagPath {
    /// Creates a tag path from a string
    ///
    /// # Errors
    ///
    /// Returns an error for empty or whitespace-only paths
    pub fn new(path: impl Into<String>) -> Result<Self, String> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err("Tag path cannot be empty".to_string());
        }
        Ok(Self(path))
    }

    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Appends one `[i]` suffix per index, in order
    ///
    /// # Errors
    ///
    /// Returns an error when the path does not end in a name or an index, since
    /// an index can only follow one of those.
    ///
    /// # Examples
    ///
    /// ```
    /// use pax2yaml::domain::TagPath;
    ///
    /// let base = TagPath::new("Valves").unwrap();
    /// assert_eq!(base.indexed(&[2, 0]).unwrap().as_str(), "Valves[2][0]");
    /// ```
    pub fn indexed(&self, indices: &[usize]) -> Result<Self, String> {
        let last = self.0.chars().last().unwrap_or('.');
        if !(last.is_alphanumeric() || last == '_' || last == ']') {
            return Err(format!(
                "Cannot append an index to '{}': path must end in a name or index",
                self.0
            ));
        }
        let mut path = self.0.clone();
        for index in indices {
            path.push('[');
            path.push_str(&index.to_string());
            path.push(']');
        }
        Ok(Self(path))
    }

    /// Joins a relative sub-tag name onto this path as `self.relative`
    pub fn member(&self, relative: &str) -> Self {
        Self(format!("{}{}{}", self.0, MEMBER_SEPARATOR, relative))
    }

    /// Returns the part of this path below `base`
    ///
    /// The literal prefix `base.` is removed. Paths that do not start with that
    /// prefix are returned unchanged.
    pub fn relative_to<'a>(&'a self, base: &TagPath) -> &'a str {
        self.0
            .strip_prefix(base.as_str())
            .and_then(|rest| rest.strip_prefix(MEMBER_SEPARATOR))
            .unwrap_or(&self.0)
    }

    /// File name of the YAML document written for this instance
    pub fn document_file_name(&self) -> String {
        format!("{}.yml", self.0)
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TagPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TagPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TagPath> for String {
    fn from(value: TagPath) -> Self {
        value.0
    }
}

impl AsRef<str> for TagPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
