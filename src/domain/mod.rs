//! Domain models and types for pax2yaml.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed names** ([`AoiType`], [`TagPath`])
//! - **Values** ([`TagValue`] as read, [`NormalizedValue`] as written)
//! - **The document model** ([`Record`] → [`Section`] → leaf value)
//! - **Error types** ([`PaxError`], [`ControllerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! ```rust
//! use pax2yaml::domain::{AoiType, TagPath};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let aoi = AoiType::new("P_AIn")?;
//! let instance = TagPath::new("LT101")?;
//! let sub_tag = instance.member("Val");
//! assert_eq!(sub_tag.relative_to(&instance), "Val");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod tag_path;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::{ControllerError, PaxError};
pub use ids::AoiType;
pub use record::{Record, Section, AOI_KEY};
pub use result::Result;
pub use tag_path::TagPath;
pub use value::{NormalizedValue, TagValue};
