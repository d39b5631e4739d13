//! Generation pipeline: probe, fetch, score, render.
//!
//! Acquisition failures abort the run before anything is written, so a map
//! on disk always reflects real data.

use std::path::{Path, PathBuf};

use gentrification_map_census::bls::BLS_SOURCE_NAME;
use gentrification_map_census::{AvailabilityProbe, CensusError, StatisticsSource, table};
use gentrification_map_census_models::{AcsVariable, ApiStatus};
use gentrification_map_cli_utils::ProgressCallback;
use gentrification_map_region::{RegionDefinition, RegionError};
use gentrification_map_render::{RenderError, SourceStatus};
use gentrification_map_scoring::ScoringError;
use gentrification_map_scoring_models::{ScoredRegion, Tier};

/// Steps of a generation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Probe,
    Fetch,
    Score,
    Render,
}

impl PipelineStep {
    pub const ALL: &[Self] = &[Self::Probe, Self::Fetch, Self::Score, Self::Render];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Probe => "Checking data sources",
            Self::Fetch => "Fetching census tracts",
            Self::Score => "Scoring tracts",
            Self::Render => "Rendering map",
        }
    }
}

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Census data could not be acquired.
    #[error("Census data acquisition failed: {0}")]
    Census(#[from] CensusError),

    /// The region's scoring configuration is invalid.
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// The region definition could not be loaded.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// The map document could not be produced.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Every tract was filtered out, so there is nothing to map.
    #[error("No tracts with valid income and rent data for {region}")]
    NoRegions {
        /// Region id.
        region: String,
    },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub output: PathBuf,
    pub tracts_fetched: usize,
    pub tracts_scored: usize,
    pub high_risk: usize,
    pub probe_status: ApiStatus,
}

/// Runs the full generation pipeline for `region` and writes the map to
/// `output`.
///
/// A `None` probe is reported as [`ApiStatus::Skipped`].
///
/// # Errors
///
/// * [`PipelineError::Scoring`] - If the region's weights or thresholds are invalid
/// * [`PipelineError::Census`] - If the statistics table cannot be fetched or parsed
/// * [`PipelineError::NoRegions`] - If no tract survives filtering
/// * [`PipelineError::Render`] - If the document cannot be rendered or written
pub async fn run(
    source: &dyn StatisticsSource,
    probe: Option<&dyn AvailabilityProbe>,
    region: &RegionDefinition,
    output: &Path,
    progress: &dyn ProgressCallback,
) -> Result<PipelineSummary, PipelineError> {
    gentrification_map_scoring::validate_config(&region.scoring)?;

    progress.set_message(PipelineStep::Probe.label().to_string());
    let (probe_name, probe_status) = match probe {
        Some(probe) => {
            let status = probe.probe().await;
            (probe.name().to_string(), status)
        }
        None => (BLS_SOURCE_NAME.to_string(), ApiStatus::Skipped),
    };
    log::info!("{probe_name}: {}", probe_status.label());
    progress.inc(1);

    progress.set_message(PipelineStep::Fetch.label().to_string());
    log::info!(
        "Fetching ACS {} tract data for {} from {}",
        region.acs_year,
        region.name,
        source.name()
    );
    let raw = source.fetch_table(&region.scope(), AcsVariable::ALL).await?;
    let records = table::into_records(&raw, AcsVariable::ALL)?;
    log::info!("Fetched {} census tracts", records.len());
    progress.inc(1);

    progress.set_message(PipelineStep::Score.label().to_string());
    let derived = gentrification_map_scoring::derive::derive_indicators(&records);
    if derived.is_empty() {
        return Err(PipelineError::NoRegions {
            region: region.id.clone(),
        });
    }
    let scored = gentrification_map_scoring::score_regions(derived, &region.scoring.weights);
    let high_risk = count_high_risk(&scored, region);
    log::info!(
        "Scored {} tracts, {high_risk} at high gentrification risk",
        scored.len()
    );
    progress.inc(1);

    progress.set_message(PipelineStep::Render.label().to_string());
    let sources = [
        SourceStatus {
            name: source.name().to_string(),
            status: ApiStatus::Available,
            detail: Some(format!("{} tracts (REAL DATA)", scored.len())),
        },
        SourceStatus {
            name: probe_name,
            status: probe_status,
            detail: None,
        },
    ];
    let html = gentrification_map_render::render_document(region, &sources, &scored)?;
    gentrification_map_render::write_document(output, &html)?;
    progress.inc(1);

    Ok(PipelineSummary {
        output: output.to_path_buf(),
        tracts_fetched: records.len(),
        tracts_scored: scored.len(),
        high_risk,
        probe_status,
    })
}

fn count_high_risk(scored: &[ScoredRegion], region: &RegionDefinition) -> usize {
    scored
        .iter()
        .filter(|s| Tier::classify(s.composite, &region.scoring.thresholds) == Tier::High)
        .count()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use gentrification_map_census_models::{GeoScope, StatisticsTable};
    use gentrification_map_cli_utils::NullProgress;
    use gentrification_map_region::find_region;

    use super::*;

    /// Serves fixed rows of nine variable values followed by a tract code.
    struct FakeSource {
        rows: Option<Vec<[&'static str; 10]>>,
    }

    #[async_trait]
    impl StatisticsSource for FakeSource {
        fn name(&self) -> &str {
            "Fake Census"
        }

        async fn fetch_table(
            &self,
            scope: &GeoScope,
            variables: &[AcsVariable],
        ) -> Result<StatisticsTable, CensusError> {
            let Some(rows) = &self.rows else {
                return Err(CensusError::Status {
                    status: 503,
                    body: "Service Unavailable".to_string(),
                });
            };

            let mut header: Vec<String> =
                variables.iter().map(|v| v.as_ref().to_string()).collect();
            header.extend(["state", "county", "tract"].map(String::from));

            let rows = rows
                .iter()
                .map(|row| {
                    let mut cells: Vec<Option<String>> = row[..9]
                        .iter()
                        .map(|c| Some((*c).to_string()))
                        .collect();
                    cells.push(Some(scope.state_fips.clone()));
                    cells.push(Some(scope.county_fips.clone()));
                    cells.push(Some(row[9].to_string()));
                    cells
                })
                .collect();

            Ok(StatisticsTable { header, rows })
        }
    }

    struct FakeProbe(ApiStatus);

    #[async_trait]
    impl AvailabilityProbe for FakeProbe {
        fn name(&self) -> &str {
            "Fake Probe"
        }

        async fn probe(&self) -> ApiStatus {
            self.0
        }
    }

    /// Values in `AcsVariable::ALL` order, then the tract code.
    const TRACTS: [[&str; 10]; 3] = [
        ["30000", "800", "100", "1000", "500", "100", "600", "1000", "90", "010100"],
        ["60000", "1400", "400", "1000", "500", "50", "300", "1000", "45", "010200"],
        ["45000", "1100", "250", "1000", "500", "75", "450", "1000", "70", "010300"],
    ];

    fn temp_output(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gentrification_map_pipeline_{name}.html"));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[tokio::test]
    async fn acquisition_failure_writes_nothing() {
        let region = find_region("baltimore_md").unwrap();
        let output = temp_output("failure");
        let source = FakeSource { rows: None };

        let err = run(&source, None, &region, &output, &NullProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Census(CensusError::Status { status: 503, .. })
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn empty_region_set_writes_nothing() {
        let region = find_region("baltimore_md").unwrap();
        let output = temp_output("empty");
        let source = FakeSource {
            rows: Some(vec![[
                "-666666666", "800", "1", "10", "1", "1", "1", "10", "1", "010100",
            ]]),
        };

        let err = run(&source, None, &region, &output, &NullProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoRegions { .. }));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn writes_map_for_real_rows() {
        let region = find_region("baltimore_md").unwrap();
        let output = temp_output("success");
        let source = FakeSource {
            rows: Some(TRACTS.to_vec()),
        };
        let probe = FakeProbe(ApiStatus::Unavailable);

        let summary = run(&source, Some(&probe), &region, &output, &NullProgress)
            .await
            .unwrap();

        assert_eq!(summary.tracts_fetched, 3);
        assert_eq!(summary.tracts_scored, 3);
        assert_eq!(summary.probe_status, ApiStatus::Unavailable);
        // Tract 010200 has the highest income, education, and rent and the
        // lowest ownership, so it scores 1.0.
        assert_eq!(summary.high_risk, 1);

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Fake Census: 3 tracts (REAL DATA)"));
        assert!(html.contains("Fake Probe: Unavailable"));
        assert!(html.contains("Census Tract 010200"));
        std::fs::remove_file(&output).unwrap();
    }

    #[tokio::test]
    async fn skipped_probe_is_reported() {
        let region = find_region("baltimore_md").unwrap();
        let output = temp_output("skipped");
        let source = FakeSource {
            rows: Some(TRACTS.to_vec()),
        };

        let summary = run(&source, None, &region, &output, &NullProgress)
            .await
            .unwrap();

        assert_eq!(summary.probe_status, ApiStatus::Skipped);
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Bureau of Labor Statistics: Not checked"));
        std::fs::remove_file(&output).unwrap();
    }

    #[tokio::test]
    async fn invalid_weights_fail_before_fetching() {
        let mut region = find_region("baltimore_md").unwrap();
        region.scoring.weights.income = 0.9;
        let output = temp_output("invalid_weights");
        let source = FakeSource { rows: None };

        let err = run(&source, None, &region, &output, &NullProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Scoring(ScoringError::InvalidWeights { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn steps_are_ordered() {
        assert_eq!(
            PipelineStep::ALL,
            &[
                PipelineStep::Probe,
                PipelineStep::Fetch,
                PipelineStep::Score,
                PipelineStep::Render,
            ]
        );
    }
}
