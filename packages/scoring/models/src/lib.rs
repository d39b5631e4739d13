#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Types for the gentrification risk scoring pipeline.
//!
//! A tract moves through two typed stages: [`DerivedRegion`] (raw medians
//! plus percentage rates) and [`ScoredRegion`] (normalized indicator scores
//! plus the weighted composite). Weights and tier thresholds travel as an
//! explicit [`ScoringConfig`] value.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A scoring input indicator.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Indicator {
    /// Median household income.
    Income,
    /// Bachelor's degree attainment rate.
    Education,
    /// Median gross rent.
    Rent,
    /// Homeownership rate. Scored with inverted polarity.
    Ownership,
}

impl Indicator {
    pub const ALL: &[Self] = &[Self::Income, Self::Education, Self::Rent, Self::Ownership];

    /// Whether a lower raw value means higher risk.
    ///
    /// Lower ownership is read as higher rental-market pressure.
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::Ownership)
    }
}

/// Composite score weights. The defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub income: f64,
    pub education: f64,
    pub rent: f64,
    pub ownership: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            income: 0.30,
            education: 0.25,
            rent: 0.25,
            ownership: 0.20,
        }
    }
}

impl ScoreWeights {
    /// Weight applied to `indicator`.
    #[must_use]
    pub const fn weight(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Income => self.income,
            Indicator::Education => self.education,
            Indicator::Rent => self.rent,
            Indicator::Ownership => self.ownership,
        }
    }

    /// Sum of all four weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.income + self.education + self.rent + self.ownership
    }
}

/// Boundaries between the low, medium, and high tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// Scores strictly above this are at least medium.
    pub low: f64,
    /// Scores strictly above this are high.
    pub high: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            low: 0.33,
            high: 0.66,
        }
    }
}

/// Weights and thresholds for one scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub thresholds: TierThresholds,
}

/// Three-level bucket for a normalized or composite score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Buckets `score` against `thresholds`. Boundary values fall into the
    /// lower tier.
    #[must_use]
    pub fn classify(score: f64, thresholds: &TierThresholds) -> Self {
        if score > thresholds.high {
            Self::High
        } else if score > thresholds.low {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A tract after indicator derivation and the data-quality filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRegion {
    /// Census GEOID.
    pub geoid: String,
    /// Median household income in dollars. Always positive.
    pub median_income: f64,
    /// Median gross rent in dollars. Always positive.
    pub median_rent: f64,
    /// Percent of the 25+ population with a bachelor's degree.
    pub education_rate: f64,
    /// Percent of commuters counted in the transit bucket.
    pub transit_rate: f64,
    /// Percent of occupied housing units that are owner-occupied.
    pub homeownership_rate: f64,
}

impl DerivedRegion {
    /// Raw (pre-normalization) value of `indicator`.
    #[must_use]
    pub const fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Income => self.median_income,
            Indicator::Education => self.education_rate,
            Indicator::Rent => self.median_rent,
            Indicator::Ownership => self.homeownership_rate,
        }
    }
}

/// Normalized component scores, each in `[0, 1]`.
///
/// `ownership` is already inverted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorScores {
    pub income: f64,
    pub education: f64,
    pub rent: f64,
    pub ownership: f64,
}

impl IndicatorScores {
    /// Score for `indicator`.
    #[must_use]
    pub const fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Income => self.income,
            Indicator::Education => self.education,
            Indicator::Rent => self.rent,
            Indicator::Ownership => self.ownership,
        }
    }

    /// Stores `score` for `indicator`.
    pub const fn set(&mut self, indicator: Indicator, score: f64) {
        match indicator {
            Indicator::Income => self.income = score,
            Indicator::Education => self.education = score,
            Indicator::Rent => self.rent = score,
            Indicator::Ownership => self.ownership = score,
        }
    }
}

/// A fully scored tract, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRegion {
    pub region: DerivedRegion,
    pub scores: IndicatorScores,
    /// Weighted composite of `scores`.
    pub composite: f64,
}
