//! AOI instance discovery
//!
//! Finds every tag of a given AOI type in the controller's tag database and
//! expands arrays into one path per element.

use crate::adapters::plc::{PlcDriver, TagDatabase, TagDefinition};
use crate::domain::{AoiType, TagPath};
use itertools::Itertools;

/// Instance base paths of `aoi` on the driver's controller, in tag-database order
pub fn discover<D: PlcDriver + ?Sized>(driver: &D, aoi: &AoiType) -> Vec<TagPath> {
    instances(driver.tags(), aoi)
}

/// Instance base paths of `aoi` in `tags`
///
/// Alias tags are skipped. A scalar tag yields its own name; an array tag yields
/// `name[i][j]...` for every element, last axis varying fastest. Zero-sized
/// axes are ignored, and an array whose axes are all zero-sized yields its
/// name once.
pub fn instances(tags: &TagDatabase, aoi: &AoiType) -> Vec<TagPath> {
    tags.iter()
        .filter(|(_, def)| def.data_type_name == aoi.as_str() && !def.alias)
        .flat_map(|(name, def)| match expand(name, def) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!(tag = %name, aoi = %aoi, error = %e, "Skipping tag");
                Vec::new()
            }
        })
        .collect()
}

fn expand(name: &str, def: &TagDefinition) -> Result<Vec<TagPath>, String> {
    let base = TagPath::new(name)?;
    if def.dim == 0 {
        return Ok(vec![base]);
    }

    let axes: Vec<usize> = def.dimensions.iter().copied().filter(|d| *d != 0).collect();
    if axes.is_empty() {
        return Ok(vec![base]);
    }

    axes.into_iter()
        .map(|len| 0..len)
        .multi_cartesian_product()
        .map(|indices| base.indexed(&indices))
        .collect()
}
