#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! American Community Survey variable codes and raw per-tract records.
//!
//! The Census Bureau data API answers a query with a two-dimensional array:
//! a header row of column names followed by one row per census tract. These
//! types describe that table and the [`RegionRecord`] rows built from it,
//! before any derived rates or scores are computed.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An ACS 5-year estimate variable requested from the data API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AcsVariable {
    /// Median household income in the past 12 months.
    #[strum(serialize = "B19013_001E")]
    #[serde(rename = "B19013_001E")]
    MedianIncome,
    /// Median gross rent.
    #[strum(serialize = "B25064_001E")]
    #[serde(rename = "B25064_001E")]
    MedianRent,
    /// Population 25+ whose highest attainment is a bachelor's degree.
    #[strum(serialize = "B15003_022E")]
    #[serde(rename = "B15003_022E")]
    BachelorsDegree,
    /// Population 25+ (educational attainment universe).
    #[strum(serialize = "B15003_001E")]
    #[serde(rename = "B15003_001E")]
    TotalEducation,
    /// Workers who did not work from home (travel time universe).
    #[strum(serialize = "B08303_001E")]
    #[serde(rename = "B08303_001E")]
    TotalCommute,
    /// Travel time bucket used as the public transit commute count.
    #[strum(serialize = "B08303_013E")]
    #[serde(rename = "B08303_013E")]
    PublicTransitCommute,
    /// Owner-occupied housing units.
    #[strum(serialize = "B25003_002E")]
    #[serde(rename = "B25003_002E")]
    OwnerOccupied,
    /// Occupied housing units (tenure universe).
    #[strum(serialize = "B25003_001E")]
    #[serde(rename = "B25003_001E")]
    TotalHousing,
    /// Workers commuting by public transportation.
    #[strum(serialize = "B08301_010E")]
    #[serde(rename = "B08301_010E")]
    PublicTransportWork,
}

impl AcsVariable {
    /// Every variable the pipeline requests, in request order.
    pub const ALL: &[Self] = &[
        Self::MedianIncome,
        Self::MedianRent,
        Self::BachelorsDegree,
        Self::TotalEducation,
        Self::TotalCommute,
        Self::PublicTransitCommute,
        Self::OwnerOccupied,
        Self::TotalHousing,
        Self::PublicTransportWork,
    ];

    /// Human-readable label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MedianIncome => "median income",
            Self::MedianRent => "median rent",
            Self::BachelorsDegree => "bachelor's degree",
            Self::TotalEducation => "total education",
            Self::TotalCommute => "total commute",
            Self::PublicTransitCommute => "public transit commute",
            Self::OwnerOccupied => "owner occupied",
            Self::TotalHousing => "total housing",
            Self::PublicTransportWork => "public transport to work",
        }
    }
}

/// Availability of a secondary data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    /// The API answered a probe with HTTP 200.
    Available,
    /// The probe failed or returned a non-success status.
    Unavailable,
    /// No probe was attempted.
    Skipped,
}

impl ApiStatus {
    /// Human-readable status label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
            Self::Skipped => "Not checked",
        }
    }
}

/// The geographic scope of a tract-level query: every tract in one county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoScope {
    /// Two-digit state FIPS code (e.g. "24").
    pub state_fips: String,
    /// Three-digit county FIPS code (e.g. "510").
    pub county_fips: String,
}

impl GeoScope {
    /// Value of the data API `in` predicate for this scope.
    #[must_use]
    pub fn in_predicate(&self) -> String {
        format!("state:{} county:{}", self.state_fips, self.county_fips)
    }
}

/// A raw statistics table as returned by the data API.
///
/// Cells are kept as the strings the API sent (or `None` for JSON `null`);
/// numeric interpretation happens when rows become [`RegionRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsTable {
    /// Column names from the first row of the payload.
    pub header: Vec<String>,
    /// Data rows, each the same width as `header`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl StatisticsTable {
    /// Returns the index of the named column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Raw ACS counts for one tract. `None` marks a missing or suppressed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCounts {
    pub median_income: Option<i64>,
    pub median_rent: Option<i64>,
    pub bachelors_degree: Option<i64>,
    pub total_education: Option<i64>,
    pub total_commute: Option<i64>,
    pub public_transit_commute: Option<i64>,
    pub owner_occupied: Option<i64>,
    pub total_housing: Option<i64>,
    pub public_transport_work: Option<i64>,
}

impl RawCounts {
    /// Stores `value` in the field backing `variable`.
    pub const fn set(&mut self, variable: AcsVariable, value: Option<i64>) {
        match variable {
            AcsVariable::MedianIncome => self.median_income = value,
            AcsVariable::MedianRent => self.median_rent = value,
            AcsVariable::BachelorsDegree => self.bachelors_degree = value,
            AcsVariable::TotalEducation => self.total_education = value,
            AcsVariable::TotalCommute => self.total_commute = value,
            AcsVariable::PublicTransitCommute => self.public_transit_commute = value,
            AcsVariable::OwnerOccupied => self.owner_occupied = value,
            AcsVariable::TotalHousing => self.total_housing = value,
            AcsVariable::PublicTransportWork => self.public_transport_work = value,
        }
    }

    /// Returns the value stored for `variable`.
    #[must_use]
    pub const fn get(&self, variable: AcsVariable) -> Option<i64> {
        match variable {
            AcsVariable::MedianIncome => self.median_income,
            AcsVariable::MedianRent => self.median_rent,
            AcsVariable::BachelorsDegree => self.bachelors_degree,
            AcsVariable::TotalEducation => self.total_education,
            AcsVariable::TotalCommute => self.total_commute,
            AcsVariable::PublicTransitCommute => self.public_transit_commute,
            AcsVariable::OwnerOccupied => self.owner_occupied,
            AcsVariable::TotalHousing => self.total_housing,
            AcsVariable::PublicTransportWork => self.public_transport_work,
        }
    }
}

/// One census tract as acquired, before derivation and scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Census GEOID (state FIPS + county FIPS + tract code, e.g. "24510010100").
    pub geoid: String,
    /// Raw ACS counts.
    pub counts: RawCounts,
}

impl RegionRecord {
    /// Six-digit tract code (the trailing part of the GEOID) used as a short
    /// display label.
    #[must_use]
    pub fn tract_code(&self) -> &str {
        tract_code(&self.geoid)
    }
}

/// Returns the trailing six characters of a GEOID, or the whole string when
/// it is shorter.
#[must_use]
pub fn tract_code(geoid: &str) -> &str {
    let start = geoid
        .char_indices()
        .rev()
        .nth(5)
        .map_or(0, |(idx, _)| idx);
    &geoid[start..]
}
