use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use compute::ZoningParameters;

#[derive(Parser, Debug)]
#[command(name = "site", version, about = "Site massing metrics and scene assembly")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print land area, footprint, height, volume and centroid as JSON
    Metrics(SiteArgs),

    /// Print the full snapshot (metrics, scene description, view) as JSON
    Scene(SiteArgs),

    /// Write the dataset back out as canonical GeoJSON
    Export {
        #[command(flatten)]
        site: SiteArgs,

        /// Output path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Command {
    pub fn site(&self) -> &SiteArgs {
        match self {
            Command::Metrics(site) | Command::Scene(site) => site,
            Command::Export { site, .. } => site,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SiteArgs {
    /// GeoJSON FeatureCollection to load (default: built-in sample site)
    pub file: Option<PathBuf>,

    /// Lot coverage in percent (0-100)
    #[arg(long, env = "SITE_LOT_COVERAGE")]
    pub lot_coverage: Option<f64>,

    /// Number of floors
    #[arg(long, env = "SITE_FLOOR_COUNT")]
    pub floor_count: Option<u32>,

    /// Height of one floor in meters
    #[arg(long, env = "SITE_FLOOR_HEIGHT")]
    pub floor_height: Option<f64>,

    /// Camera records (JSON array or Point FeatureCollection)
    #[arg(long, env = "SITE_OBSERVATIONS")]
    pub observations: Option<PathBuf>,

    /// Session config (JSON)
    #[arg(long, env = "SITE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl SiteArgs {
    pub fn has_parameter_overrides(&self) -> bool {
        self.lot_coverage.is_some() || self.floor_count.is_some() || self.floor_height.is_some()
    }

    /// `base` with every flag that was given applied on top.
    pub fn parameters(&self, base: ZoningParameters) -> ZoningParameters {
        ZoningParameters {
            lot_coverage_percent: self.lot_coverage.unwrap_or(base.lot_coverage_percent),
            floor_count: self.floor_count.unwrap_or(base.floor_count),
            floor_height_m: self.floor_height.unwrap_or(base.floor_height_m),
        }
    }
}
