#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tract-level statistics acquisition from the US Census Bureau.
//!
//! The [`StatisticsSource`] trait is the seam between the scoring pipeline
//! and the remote data API. [`acs::AcsClient`] is the production
//! implementation; it issues exactly one request per run and never retries
//! or substitutes data. Any failure surfaces as a [`CensusError`] and the
//! caller is expected to abort.
//!
//! [`bls::BlsProbe`] is a secondary, non-fatal availability check whose
//! result is only reported, never used for scoring.

pub mod acs;
pub mod bls;
pub mod table;

use async_trait::async_trait;
pub use gentrification_map_census_models::ApiStatus;
use gentrification_map_census_models::{AcsVariable, GeoScope, StatisticsTable};

/// Maximum length of a response body preview kept in errors and logs.
pub(crate) const BODY_PREVIEW_LEN: usize = 500;

/// Errors that can occur while acquiring statistics.
///
/// Every variant is fatal for the pipeline; there is no fallback data.
#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    /// Network-level failure (connect error, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Census API returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The response body was not valid JSON of the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but is missing required columns or rows.
    #[error("Malformed Census payload: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },
}

/// A capability that produces a raw statistics table for a county.
#[async_trait]
pub trait StatisticsSource: Send + Sync {
    /// Human-readable name of the upstream service.
    fn name(&self) -> &str;

    /// Fetches the requested variables for every tract in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError`] on any network, status, or payload failure.
    async fn fetch_table(
        &self,
        scope: &GeoScope,
        variables: &[AcsVariable],
    ) -> Result<StatisticsTable, CensusError>;
}

/// A capability that reports whether a secondary API is reachable.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Human-readable name of the probed service.
    fn name(&self) -> &str;

    /// Probes the service. Never fails; problems map to
    /// [`ApiStatus::Unavailable`].
    async fn probe(&self) -> ApiStatus;
}

/// Truncates a string for logging, appending "..." if it exceeds `max_len`.
pub(crate) fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_bodies() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; cutting at 2 would split it.
        assert_eq!(truncate_for_log("aébc", 2), "a...");
    }

    #[test]
    fn status_error_mentions_code() {
        let err = CensusError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Census API returned status 503: unavailable"
        );
    }
}
