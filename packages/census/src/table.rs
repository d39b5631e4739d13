//! Conversion from a raw [`StatisticsTable`] to [`RegionRecord`]s.

use std::collections::BTreeSet;

use gentrification_map_census_models::{AcsVariable, RawCounts, RegionRecord, StatisticsTable};

use crate::CensusError;

/// Geography columns the data API appends to every tract-level response.
const GEOGRAPHY_COLUMNS: [&str; 3] = ["state", "county", "tract"];

/// Builds one [`RegionRecord`] per table row.
///
/// Every requested variable and the `state`/`county`/`tract` columns must be
/// present in the header. Counts that are null, unparseable, or negative
/// (the ACS annotation sentinels such as `-666666666`) become `None`.
///
/// # Errors
///
/// Returns [`CensusError::Malformed`] if a required column is missing, a
/// row has no geography identifier, or two rows share a GEOID.
pub fn into_records(
    table: &StatisticsTable,
    variables: &[AcsVariable],
) -> Result<Vec<RegionRecord>, CensusError> {
    let geo_indices = GEOGRAPHY_COLUMNS
        .iter()
        .map(|name| require_column(table, name))
        .collect::<Result<Vec<_>, _>>()?;

    let var_indices = variables
        .iter()
        .map(|v| require_column(table, v.as_ref()).map(|idx| (*v, idx)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(table.len());

    for (row_idx, row) in table.rows.iter().enumerate() {
        let mut geoid = String::with_capacity(11);
        for (&col, name) in geo_indices.iter().zip(GEOGRAPHY_COLUMNS) {
            let part = row
                .get(col)
                .and_then(Option::as_deref)
                .ok_or_else(|| CensusError::Malformed {
                    message: format!("Row {} has no {name} code", row_idx + 1),
                })?;
            geoid.push_str(part);
        }

        if !seen.insert(geoid.clone()) {
            return Err(CensusError::Malformed {
                message: format!("Duplicate tract GEOID {geoid}"),
            });
        }

        let mut counts = RawCounts::default();
        for &(variable, col) in &var_indices {
            let cell = row.get(col).and_then(Option::as_deref);
            counts.set(variable, parse_count(cell));
        }

        records.push(RegionRecord { geoid, counts });
    }

    log::debug!(
        "Converted {} table rows into region records",
        records.len()
    );
    for variable in variables {
        let missing = records
            .iter()
            .filter(|r| r.counts.get(*variable).is_none())
            .count();
        if missing > 0 {
            log::debug!("{} ({variable}): {missing} missing values", variable.label());
        }
    }

    Ok(records)
}

/// Parses a single count cell. Returns `None` for missing, unparseable,
/// non-finite, or negative values.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_count(cell: Option<&str>) -> Option<i64> {
    let s = cell?.trim();

    let value = match s.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
            f.trunc() as i64
        }
    };

    (value >= 0).then_some(value)
}

fn require_column(table: &StatisticsTable, name: &str) -> Result<usize, CensusError> {
    table
        .column_index(name)
        .ok_or_else(|| CensusError::Malformed {
            message: format!("Missing column {name} in Census response"),
        })
}
