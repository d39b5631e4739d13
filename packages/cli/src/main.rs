#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generates a gentrification risk map from live Census ACS data.
//!
//! With no arguments the default region is generated to its configured
//! output file. Uses `indicatif-log-bridge` (via
//! [`gentrification_map_cli_utils::init_logger`]) so log lines and the step
//! progress bar never fight for the terminal.

mod pipeline;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use gentrification_map_census::AvailabilityProbe;
use gentrification_map_census::acs::AcsClient;
use gentrification_map_census::bls::BlsProbe;
use gentrification_map_cli_utils::IndicatifProgress;
use gentrification_map_region::{DEFAULT_REGION_ID, all_regions, find_region};

use crate::pipeline::PipelineStep;

#[derive(Parser)]
#[command(
    name = "gentrification_map",
    about = "Gentrification risk map generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch tract data, score it, and write the HTML map
    Generate {
        /// Region id (see `regions`)
        #[arg(long, default_value = DEFAULT_REGION_ID)]
        region: String,

        /// Output path (defaults to the region's configured filename)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Don't probe the secondary labor statistics API
        #[arg(long)]
        skip_probe: bool,
    },
    /// List the configured regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = gentrification_map_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Generate {
        region: DEFAULT_REGION_ID.to_string(),
        output: None,
        skip_probe: false,
    }) {
        Commands::Generate {
            region,
            output,
            skip_probe,
        } => {
            let start = Instant::now();
            let region = find_region(&region)?;
            let output = output.unwrap_or_else(|| PathBuf::from(&region.output_filename));

            let source = AcsClient::new(region.acs_year)?;
            let probe = match (&region.bls_series_id, skip_probe) {
                (Some(series_id), false) => Some(BlsProbe::new(series_id.as_str())?),
                _ => None,
            };

            let total = u64::try_from(PipelineStep::ALL.len())?;
            let progress = IndicatifProgress::steps_bar(&multi, "Generating", total);

            let summary = pipeline::run(
                &source,
                probe.as_ref().map(|p| p as &dyn AvailabilityProbe),
                &region,
                &output,
                progress.as_ref(),
            )
            .await?;
            progress.finish(format!("Done in {:.1}s", start.elapsed().as_secs_f64()));

            println!();
            println!("{} gentrification map", region.name);
            println!("  Tracts fetched:  {}", summary.tracts_fetched);
            println!("  Tracts mapped:   {}", summary.tracts_scored);
            println!("  High risk:       {}", summary.high_risk);
            println!("  Labor stats API: {}", summary.probe_status.label());
            println!("  Output:          {}", summary.output.display());
        }
        Commands::Regions => {
            for region in all_regions()? {
                println!(
                    "{:<16} {} (state {}, county {}, ACS {})",
                    region.id, region.name, region.state_fips, region.county_fips, region.acs_year
                );
            }
        }
    }

    Ok(())
}
