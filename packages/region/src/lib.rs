#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region definitions for the gentrification map.
//!
//! Each mapped city is a TOML file embedded at compile time. See
//! [`registry`] for the list and [`region_def::RegionDefinition`] for the
//! schema.

pub mod region_def;
pub mod registry;

pub use region_def::{IntroText, RegionDefinition};
pub use registry::{DEFAULT_REGION_ID, all_regions, find_region};

/// Errors that can occur while loading region definitions.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// The TOML could not be parsed into a definition.
    #[error("Failed to parse {name}.toml: {message}")]
    Parse {
        /// Config file stem.
        name: String,
        /// Parser message.
        message: String,
    },

    /// The definition parsed but failed validation.
    #[error("Invalid region {id}: {message}")]
    Invalid {
        /// Region id.
        id: String,
        /// Description of what went wrong.
        message: String,
    },

    /// No region has the requested id.
    #[error("Unknown region: {id}")]
    UnknownRegion {
        /// Requested id.
        id: String,
    },
}
