//! Bureau of Labor Statistics availability probe.
//!
//! Posts a minimal time-series query to the public BLS v2 API and reports
//! whether it answered with HTTP 200. The response body is ignored; the
//! result only feeds the data-source status shown to the operator.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::{ApiStatus, AvailabilityProbe, CensusError};

/// BLS public API time-series endpoint.
pub const BLS_TIMESERIES_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// Request timeout for the probe.
pub const BLS_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Display name of the BLS service.
pub const BLS_SOURCE_NAME: &str = "Bureau of Labor Statistics";

#[derive(Serialize)]
struct TimeSeriesRequest<'a> {
    seriesid: [&'a str; 1],
}

/// Probes the BLS API with a single series id.
pub struct BlsProbe {
    client: reqwest::Client,
    url: String,
    series_id: String,
}

impl BlsProbe {
    /// Creates a probe against the public BLS endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError`] if the HTTP client cannot be built.
    pub fn new(series_id: impl Into<String>) -> Result<Self, CensusError> {
        Self::with_url(BLS_TIMESERIES_URL, series_id)
    }

    /// Creates a probe against an explicit URL.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError`] if the HTTP client cannot be built.
    pub fn with_url(
        url: impl Into<String>,
        series_id: impl Into<String>,
    ) -> Result<Self, CensusError> {
        let client = reqwest::Client::builder()
            .timeout(BLS_PROBE_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            series_id: series_id.into(),
        })
    }
}

#[async_trait]
impl AvailabilityProbe for BlsProbe {
    fn name(&self) -> &str {
        BLS_SOURCE_NAME
    }

    async fn probe(&self) -> ApiStatus {
        let request = TimeSeriesRequest {
            seriesid: [self.series_id.as_str()],
        };

        match self.client.post(&self.url).json(&request).send().await {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => ApiStatus::Available,
            Ok(resp) => {
                log::warn!("BLS probe returned HTTP {}", resp.status());
                ApiStatus::Unavailable
            }
            Err(e) => {
                log::warn!("BLS probe failed: {e}");
                ApiStatus::Unavailable
            }
        }
    }
}
