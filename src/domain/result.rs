//! Crate-wide `Result` shorthand

use super::errors::PaxError;

/// Every fallible call in pax2yaml fails with a [`PaxError`]
///
/// ```
/// use pax2yaml::domain::errors::PaxError;
/// use pax2yaml::domain::result::Result;
///
/// fn slot(text: &str) -> Result<u8> {
///     text.parse()
///         .map_err(|_| PaxError::Configuration(format!("bad slot '{text}'")))
/// }
///
/// assert_eq!(slot("3").unwrap(), 3);
/// assert!(slot("x").is_err());
/// ```
pub type Result<T> = std::result::Result<T, PaxError>;
