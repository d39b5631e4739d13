//! ACS 5-year estimates client for the Census Bureau data API.
//!
//! A tract-level query looks like:
//!
//! ```text
//! GET https://api.census.gov/data/2021/acs/acs5
//!     ?get=B19013_001E,B25064_001E,...
//!     &for=tract:*
//!     &in=state:24 county:510
//! ```
//!
//! and answers with a JSON array of arrays whose first row is the header.
//! See <https://www.census.gov/data/developers/guidance/api-user-guide.html>

use std::time::Duration;

use async_trait::async_trait;
use gentrification_map_census_models::{AcsVariable, GeoScope, StatisticsTable};

use crate::{BODY_PREVIEW_LEN, CensusError, StatisticsSource, truncate_for_log};

/// Root of the Census Bureau data API.
pub const ACS_BASE_URL: &str = "https://api.census.gov/data";

/// Request timeout for the primary fetch.
pub const ACS_TIMEOUT: Duration = Duration::from_secs(15);

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("gentrification_map/", env!("CARGO_PKG_VERSION"));

/// Client for the ACS 5-year detailed tables endpoint of one vintage.
pub struct AcsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AcsClient {
    /// Creates a client for the given ACS vintage (e.g. `2021`).
    ///
    /// # Errors
    ///
    /// Returns [`CensusError`] if the HTTP client cannot be built.
    pub fn new(acs_year: u16) -> Result<Self, CensusError> {
        Self::with_endpoint(format!("{ACS_BASE_URL}/{acs_year}/acs/acs5"))
    }

    /// Creates a client that queries an explicit endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError`] if the HTTP client cannot be built.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, CensusError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(ACS_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint this client queries.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatisticsSource for AcsClient {
    fn name(&self) -> &str {
        "US Census Bureau"
    }

    async fn fetch_table(
        &self,
        scope: &GeoScope,
        variables: &[AcsVariable],
    ) -> Result<StatisticsTable, CensusError> {
        let params = query_params(scope, variables);

        log::info!(
            "Fetching {} ACS variables for tracts in {} from {}",
            variables.len(),
            scope.in_predicate(),
            self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let table = parse_response(status.as_u16(), &body)?;

        log::info!(
            "Census API returned {} tract rows ({} columns)",
            table.len(),
            table.header.len()
        );

        Ok(table)
    }
}

/// Comma-separated variable codes for the `get` parameter.
#[must_use]
pub fn variable_list(variables: &[AcsVariable]) -> String {
    variables
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",")
}

/// Query parameters for a tract-level request.
#[must_use]
pub fn query_params(scope: &GeoScope, variables: &[AcsVariable]) -> Vec<(&'static str, String)> {
    vec![
        ("get", variable_list(variables)),
        ("for", "tract:*".to_string()),
        ("in", scope.in_predicate()),
    ]
}

/// Validates the status code and parses the body of a data API response.
///
/// # Errors
///
/// Returns [`CensusError::Status`] for any non-2xx status, otherwise any
/// error from [`parse_payload`].
pub fn parse_response(status: u16, body: &str) -> Result<StatisticsTable, CensusError> {
    if !(200..300).contains(&status) {
        return Err(CensusError::Status {
            status,
            body: truncate_for_log(body, BODY_PREVIEW_LEN),
        });
    }

    parse_payload(body)
}

/// Parses the data API's header-plus-rows JSON array into a table.
///
/// String and numeric cells are kept as strings; `null` becomes `None`.
///
/// # Errors
///
/// Returns [`CensusError::Json`] if the body is not a JSON array of arrays,
/// or [`CensusError::Malformed`] if the header is missing or a row does not
/// match the header width.
pub fn parse_payload(body: &str) -> Result<StatisticsTable, CensusError> {
    let raw: Vec<Vec<serde_json::Value>> = serde_json::from_str(body)?;
    let mut raw_rows = raw.into_iter();

    let header = raw_rows
        .next()
        .ok_or_else(|| CensusError::Malformed {
            message: "Empty payload (no header row)".to_string(),
        })?
        .into_iter()
        .map(|cell| match cell {
            serde_json::Value::String(s) => Ok(s),
            other => Err(CensusError::Malformed {
                message: format!("Non-string header cell: {other}"),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for (idx, raw_row) in raw_rows.enumerate() {
        if raw_row.len() != header.len() {
            return Err(CensusError::Malformed {
                message: format!(
                    "Row {} has {} cells, expected {}",
                    idx + 1,
                    raw_row.len(),
                    header.len()
                ),
            });
        }

        let row = raw_row
            .into_iter()
            .map(|cell| match cell {
                serde_json::Value::Null => Ok(None),
                serde_json::Value::String(s) => Ok(Some(s)),
                serde_json::Value::Number(n) => Ok(Some(n.to_string())),
                other => Err(CensusError::Malformed {
                    message: format!("Unexpected cell in row {}: {other}", idx + 1),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(row);
    }

    Ok(StatisticsTable { header, rows })
}
