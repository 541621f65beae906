//! Record assembly

use crate::domain::{NormalizedValue, Section, TagPath};

/// Merges read values into one section keyed relative to `base`
///
/// Later values win for repeated keys. The literal prefix `base.` is stripped;
/// keys without that prefix are kept as they are.
pub fn assemble<I>(values: I, base: &TagPath) -> Section
where
    I: IntoIterator<Item = (TagPath, NormalizedValue)>,
{
    values
        .into_iter()
        .map(|(path, value)| (path.relative_to(base).to_string(), value))
        .collect()
}
