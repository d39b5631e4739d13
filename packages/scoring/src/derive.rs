//! Percentage rates derived from raw ACS counts, and the data-quality
//! filter applied before scoring.

use gentrification_map_census_models::RegionRecord;
use gentrification_map_scoring_models::DerivedRegion;

/// `numerator / denominator × 100`.
///
/// A missing operand or a zero denominator yields `0.0`. This conflates
/// "zero percent" with "unknown"; downstream scoring relies on it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn derive_rate(numerator: Option<i64>, denominator: Option<i64>) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0 => n as f64 / d as f64 * 100.0,
        _ => 0.0,
    }
}

/// Computes the education, transit, and homeownership rates for one record.
///
/// Returns `None` when median income or median rent is missing or not
/// positive; such tracts never reach scoring.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn derive_region(record: &RegionRecord) -> Option<DerivedRegion> {
    let counts = &record.counts;

    let median_income = counts.median_income.filter(|v| *v > 0)?;
    let median_rent = counts.median_rent.filter(|v| *v > 0)?;

    Some(DerivedRegion {
        geoid: record.geoid.clone(),
        median_income: median_income as f64,
        median_rent: median_rent as f64,
        education_rate: derive_rate(counts.bachelors_degree, counts.total_education),
        transit_rate: derive_rate(counts.public_transit_commute, counts.total_commute),
        homeownership_rate: derive_rate(counts.owner_occupied, counts.total_housing),
    })
}

/// Derives rates for every record and drops tracts that fail the
/// income/rent filter, preserving input order.
#[must_use]
pub fn derive_indicators(records: &[RegionRecord]) -> Vec<DerivedRegion> {
    let derived: Vec<DerivedRegion> = records.iter().filter_map(derive_region).collect();

    let dropped = records.len() - derived.len();
    if dropped > 0 {
        log::info!(
            "Dropped {dropped} of {} tracts with missing or non-positive income/rent",
            records.len()
        );
    }

    derived
}
