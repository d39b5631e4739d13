//! Region registry. Loads every region definition from embedded TOML configs.
//!
//! Each `.toml` file in `packages/region/regions/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a new city means adding a
//! TOML file and an entry below.

use crate::RegionError;
use crate::region_def::{RegionDefinition, parse_region_toml};

/// Region generated when none is requested.
pub const DEFAULT_REGION_ID: &str = "baltimore_md";

/// TOML configs embedded at compile time.
const REGION_TOMLS: &[(&str, &str)] = &[
    ("baltimore_md", include_str!("../regions/baltimore_md.toml")),
    ("dc", include_str!("../regions/dc.toml")),
];

/// Returns all configured region definitions, parsed and validated.
///
/// # Errors
///
/// Returns [`RegionError`] if any embedded config is malformed or invalid.
pub fn all_regions() -> Result<Vec<RegionDefinition>, RegionError> {
    REGION_TOMLS
        .iter()
        .map(|(name, toml)| {
            let def = parse_region_toml(name, toml)?;
            def.validate()?;
            Ok(def)
        })
        .collect()
}

/// Looks up a region by id.
///
/// # Errors
///
/// Returns [`RegionError::UnknownRegion`] if no region has this id, or any
/// error from loading the registry.
pub fn find_region(id: &str) -> Result<RegionDefinition, RegionError> {
    all_regions()?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| RegionError::UnknownRegion { id: id.to_string() })
}
