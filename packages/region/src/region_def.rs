//! Config-driven region definition.
//!
//! [`RegionDefinition`] captures everything that differs between mapped
//! cities: which county to query, which ACS vintage, where to centre the
//! map, what the intro overlay says, and optional scoring overrides.

use gentrification_map_census_models::GeoScope;
use gentrification_map_scoring_models::ScoringConfig;
use serde::Deserialize;

use crate::RegionError;

/// A complete region definition loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionDefinition {
    /// Unique identifier (e.g., `"baltimore_md"`).
    pub id: String,
    /// Human-readable name used in titles (e.g., `"Baltimore"`).
    pub name: String,
    /// Two-digit state FIPS code.
    pub state_fips: String,
    /// Three-digit county FIPS code.
    pub county_fips: String,
    /// Map centre as `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Initial Leaflet zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// ACS 5-year vintage to query.
    pub acs_year: u16,
    /// Default output document filename.
    pub output_filename: String,
    /// BLS series used for the availability probe. No probe when absent.
    #[serde(default)]
    pub bls_series_id: Option<String>,
    /// Text of the intro overlay.
    pub intro: IntroText,
    /// Weight and threshold overrides.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Title and body paragraphs for the intro overlay.
#[derive(Debug, Clone, Deserialize)]
pub struct IntroText {
    pub title: String,
    pub paragraphs: Vec<String>,
}

const fn default_zoom() -> u8 {
    11
}

impl RegionDefinition {
    /// The county-wide tract scope for the data API.
    #[must_use]
    pub fn scope(&self) -> GeoScope {
        GeoScope {
            state_fips: self.state_fips.clone(),
            county_fips: self.county_fips.clone(),
        }
    }

    /// Map centre latitude.
    #[must_use]
    pub const fn center_lat(&self) -> f64 {
        self.center[0]
    }

    /// Map centre longitude.
    #[must_use]
    pub const fn center_lon(&self) -> f64 {
        self.center[1]
    }

    /// Checks FIPS code shapes and centre coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), RegionError> {
        let invalid = |message: String| RegionError::Invalid {
            id: self.id.clone(),
            message,
        };

        if !is_fips(&self.state_fips, 2) {
            return Err(invalid(format!(
                "state_fips must be 2 digits, got {:?}",
                self.state_fips
            )));
        }
        if !is_fips(&self.county_fips, 3) {
            return Err(invalid(format!(
                "county_fips must be 3 digits, got {:?}",
                self.county_fips
            )));
        }

        let [lat, lon] = self.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(invalid(format!("center out of range: [{lat}, {lon}]")));
        }

        if self.output_filename.trim().is_empty() {
            return Err(invalid("output_filename is empty".to_string()));
        }

        Ok(())
    }
}

fn is_fips(code: &str, len: usize) -> bool {
    code.len() == len && code.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a region definition from a TOML string.
///
/// # Errors
///
/// Returns [`RegionError::Parse`] if the TOML is malformed or missing
/// required fields.
pub fn parse_region_toml(name: &str, toml_str: &str) -> Result<RegionDefinition, RegionError> {
    toml::de::from_str(toml_str).map_err(|e| RegionError::Parse {
        name: name.to_string(),
        message: e.to_string(),
    })
}
