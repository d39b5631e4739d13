#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Gentrification risk scoring.
//!
//! Two sequential passes over the tract set:
//!
//! 1. [`derive::derive_indicators`] turns raw ACS counts into percentage
//!    rates and drops tracts with missing or non-positive income or rent.
//! 2. [`score_regions`] min-max normalizes income, education rate, rent,
//!    and (inverted) homeownership rate across the set, then combines them
//!    with the configured weights.
//!
//! Both passes are total: degenerate ranges and zero denominators resolve
//! to `0.0` instead of erroring.

pub mod derive;
pub mod normalize;

use gentrification_map_scoring_models::{
    DerivedRegion, Indicator, IndicatorScores, ScoreWeights, ScoredRegion, ScoringConfig,
};

use crate::normalize::min_max_normalize;

/// Allowed deviation of the weight sum from 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Invalid scoring configuration.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// Weights are negative or do not sum to 1.0.
    #[error("Scoring weights must be non-negative and sum to 1.0 (got sum {sum})")]
    InvalidWeights {
        /// Actual sum of the configured weights.
        sum: f64,
    },

    /// Tier thresholds are out of order or outside `[0, 1]`.
    #[error("Tier thresholds must satisfy 0 <= low < high <= 1 (got low {low}, high {high})")]
    InvalidThresholds {
        /// Configured low threshold.
        low: f64,
        /// Configured high threshold.
        high: f64,
    },
}

/// Checks that the weights form a convex combination and the thresholds
/// are ordered within `[0, 1]`.
///
/// # Errors
///
/// Returns [`ScoringError`] describing the first violation found.
pub fn validate_config(config: &ScoringConfig) -> Result<(), ScoringError> {
    let weights = &config.weights;
    let sum = weights.sum();
    let non_negative = Indicator::ALL
        .iter()
        .all(|&i| weights.weight(i).is_finite() && weights.weight(i) >= 0.0);

    if !non_negative || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ScoringError::InvalidWeights { sum });
    }

    let thresholds = &config.thresholds;
    let ordered = 0.0 <= thresholds.low && thresholds.low < thresholds.high && thresholds.high <= 1.0;
    if !ordered {
        return Err(ScoringError::InvalidThresholds {
            low: thresholds.low,
            high: thresholds.high,
        });
    }

    Ok(())
}

/// Weighted sum of the component scores.
#[must_use]
pub fn composite(scores: &IndicatorScores, weights: &ScoreWeights) -> f64 {
    Indicator::ALL
        .iter()
        .map(|&i| scores.get(i) * weights.weight(i))
        .sum()
}

/// Normalizes every indicator across `regions` and attaches the composite
/// score. Output order matches input order; an empty input yields an empty
/// output.
#[must_use]
pub fn score_regions(regions: Vec<DerivedRegion>, weights: &ScoreWeights) -> Vec<ScoredRegion> {
    let mut scores = vec![IndicatorScores::default(); regions.len()];

    for &indicator in Indicator::ALL {
        let values: Vec<f64> = regions.iter().map(|r| r.value(indicator)).collect();
        let normalized = min_max_normalize(&values, indicator.is_inverted());
        for (score, value) in scores.iter_mut().zip(normalized) {
            score.set(indicator, value);
        }
    }

    let scored: Vec<ScoredRegion> = regions
        .into_iter()
        .zip(scores)
        .map(|(region, scores)| ScoredRegion {
            composite: composite(&scores, weights),
            region,
            scores,
        })
        .collect();

    log::debug!("Scored {} tracts", scored.len());

    scored
}

#[cfg(test)]
mod tests {
    use gentrification_map_scoring_models::TierThresholds;

    use super::*;

    fn region(geoid: &str, income: f64, education: f64, rent: f64, ownership: f64) -> DerivedRegion {
        DerivedRegion {
            geoid: geoid.to_string(),
            median_income: income,
            median_rent: rent,
            education_rate: education,
            transit_rate: 0.0,
            homeownership_rate: ownership,
        }
    }

    fn sample() -> Vec<DerivedRegion> {
        vec![
            region("a", 10.0, 0.0, 500.0, 80.0),
            region("b", 20.0, 100.0, 500.0, 20.0),
            region("c", 30.0, 50.0, 1_500.0, 20.0),
            region("d", 15.0, 25.0, 1_000.0, 50.0),
        ]
    }

    #[test]
    fn composite_matches_hand_computed_values() {
        let scored = score_regions(sample(), &ScoreWeights::default());

        let incomes: Vec<f64> = scored.iter().map(|s| s.scores.income).collect();
        assert_eq!(incomes, vec![0.0, 0.5, 1.0, 0.25]);

        // income, education, rent, ownership (inverted)
        // a: 0.0, 0.0, 0.0, 0.0  -> 0.0
        // b: 0.5, 1.0, 0.0, 1.0  -> 0.15 + 0.25 + 0.0 + 0.2 = 0.6
        // c: 1.0, 0.5, 1.0, 1.0  -> 0.3 + 0.125 + 0.25 + 0.2 = 0.875
        // d: 0.25, 0.25, 0.5, 0.5 -> 0.075 + 0.0625 + 0.125 + 0.1 = 0.3625
        let expected = [0.0, 0.6, 0.875, 0.3625];
        for (s, e) in scored.iter().zip(expected) {
            assert!(
                (s.composite - e).abs() < 1e-9,
                "{}: {} != {e}",
                s.region.geoid,
                s.composite
            );
        }
    }

    #[test]
    fn each_weight_is_isolated() {
        // Only one indicator varies per case; the composite of the top
        // tract must equal exactly that indicator's weight.
        let weights = ScoreWeights::default();
        let cases = [
            (region("hi", 2.0, 1.0, 1.0, 1.0), region("lo", 1.0, 1.0, 1.0, 1.0), 0.30),
            (region("hi", 1.0, 2.0, 1.0, 1.0), region("lo", 1.0, 1.0, 1.0, 1.0), 0.25),
            (region("hi", 1.0, 1.0, 2.0, 1.0), region("lo", 1.0, 1.0, 1.0, 1.0), 0.25),
            (region("hi", 1.0, 1.0, 1.0, 1.0), region("lo", 1.0, 1.0, 1.0, 2.0), 0.20),
        ];

        for (hi, lo, weight) in cases {
            let scored = score_regions(vec![hi, lo], &weights);
            assert!((scored[0].composite - weight).abs() < 1e-9);
            assert!(scored[1].composite.abs() < 1e-9);
        }
    }

    #[test]
    fn ownership_extremes_are_inverted() {
        let scored = score_regions(sample(), &ScoreWeights::default());
        // "a" has the highest homeownership rate, "b" and "c" the lowest.
        assert!(scored[0].scores.ownership.abs() < f64::EPSILON);
        assert!((scored[1].scores.ownership - 1.0).abs() < f64::EPSILON);
        assert!((scored[2].scores.ownership - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn identical_indicator_scores_zero_everywhere() {
        let regions = vec![
            region("a", 10.0, 40.0, 900.0, 50.0),
            region("b", 20.0, 40.0, 900.0, 50.0),
            region("c", 30.0, 40.0, 900.0, 50.0),
        ];
        let scored = score_regions(regions, &ScoreWeights::default());

        for s in &scored {
            assert!(s.scores.education.abs() < f64::EPSILON);
            assert!(s.scores.rent.abs() < f64::EPSILON);
            assert!(s.scores.ownership.abs() < f64::EPSILON);
            assert!(!s.composite.is_nan());
        }
    }

    #[test]
    fn single_region_is_fully_degenerate() {
        let scored = score_regions(
            vec![region("only", 50_000.0, 30.0, 1_200.0, 40.0)],
            &ScoreWeights::default(),
        );
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].scores, IndicatorScores::default());
        assert!(scored[0].composite.abs() < f64::EPSILON);
    }

    #[test]
    fn all_scores_stay_in_unit_interval() {
        let regions: Vec<DerivedRegion> = (0..50)
            .map(|i| {
                let x = f64::from(i);
                region(
                    &format!("{i}"),
                    20_000.0 + (x * 7_919.0) % 90_000.0,
                    (x * 13.0) % 100.0,
                    600.0 + (x * 37.0) % 1_400.0,
                    (x * 29.0) % 100.0,
                )
            })
            .collect();

        for s in score_regions(regions, &ScoreWeights::default()) {
            for &i in Indicator::ALL {
                let v = s.scores.get(i);
                assert!((0.0..=1.0).contains(&v), "{i} out of range: {v}");
            }
            assert!((0.0..=1.0).contains(&s.composite));
        }
    }

    #[test]
    fn empty_input_scores_nothing() {
        assert!(score_regions(Vec::new(), &ScoreWeights::default()).is_empty());
    }

    #[test]
    fn accepts_default_config() {
        assert!(validate_config(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                income: 0.5,
                ..ScoreWeights::default()
            },
            ..ScoringConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ScoringError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn rejects_negative_weights() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                income: -0.1,
                education: 0.35,
                rent: 0.35,
                ownership: 0.4,
            },
            ..ScoringConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ScoringError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = ScoringConfig {
            thresholds: TierThresholds {
                low: 0.7,
                high: 0.3,
            },
            ..ScoringConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ScoringError::InvalidThresholds { .. })
        ));
    }
}
